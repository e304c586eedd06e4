use super::*;

#[test]
fn parse_accepts_known_values_loosely() {
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse(" Light\n"), Some(Theme::Light));
    assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
}

#[test]
fn parse_rejects_unknown_values() {
    assert_eq!(Theme::parse(""), None);
    assert_eq!(Theme::parse("auto"), None);
    assert!("sepia".parse::<Theme>().is_err());
}

#[test]
fn inverse_is_symmetric() {
    assert_eq!(Theme::Light.inverse(), Theme::Dark);
    assert_eq!(Theme::Dark.inverse(), Theme::Light);
    assert_eq!(Theme::Dark.inverse().inverse(), Theme::Dark);
}

#[test]
fn attribute_absence_means_light() {
    assert_eq!(Theme::from_attribute(None), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
}

#[test]
fn toggle_icon_advertises_the_other_theme() {
    assert_eq!(Theme::Light.toggle_icon(), ToggleIcon::Moon);
    assert_eq!(Theme::Dark.toggle_icon(), ToggleIcon::Sun);
    assert_eq!(Theme::Light.toggle_icon().name(), "moon");
    assert_eq!(Theme::Dark.toggle_icon().name(), "sun");
    assert_eq!(ToggleIcon::Moon.aria_label(), "Toggle dark theme");
    assert_eq!(ToggleIcon::Sun.aria_label(), "Toggle light theme");
}

#[test]
fn icon_markup_uses_font_awesome_classes() {
    assert_eq!(ToggleIcon::Sun.markup(), "<i class=\"fas fa-sun\"></i>");
    assert_eq!(ToggleIcon::Moon.markup(), "<i class=\"fas fa-moon\"></i>");
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
    assert_eq!(parsed, Theme::Light);
}
