use super::*;

#[test]
fn parses_names_hex_and_indices() {
    assert_eq!(parse_color("dark_gray"), Some(Color::DarkGray));
    assert_eq!(parse_color("Light-Blue"), Some(Color::LightBlue));
    assert_eq!(parse_color("#102030"), Some(Color::Rgb(0x10, 0x20, 0x30)));
    assert_eq!(parse_color("208"), Some(Color::Indexed(208)));
    assert_eq!(parse_color("reset"), Some(Color::Reset));
    assert_eq!(parse_color("chartreuse-ish"), None);
    assert_eq!(parse_color(""), None);
}

#[test]
fn settings_override_defaults_and_skip_bad_values() {
    let settings = ThemeSettings {
        menu_bg: Some("#000080".to_string()),
        status_fg: Some("nonsense".to_string()),
        ..ThemeSettings::default()
    };
    let theme = UiTheme::from_settings(&settings);
    assert_eq!(theme.menu_bg, Color::Rgb(0, 0, 0x80));
    assert_eq!(theme.status_fg, Color::White);
    assert_eq!(theme.menu_selected_bg, Color::Cyan);
}

#[test]
fn black_text_uses_terminal_foreground() {
    let theme = UiTheme::default();
    assert_eq!(theme.text_color(TextColor::BLACK), Color::Reset);
    assert_eq!(
        theme.text_color(TextColor::rgb(200, 10, 10)),
        Color::Rgb(200, 10, 10)
    );
}

#[test]
fn text_color_degrades_on_limited_terminals() {
    let theme = UiTheme::default().with_support(ColorSupport::Ansi16);
    assert_eq!(theme.text_color(TextColor::rgb(250, 0, 0)), Color::Indexed(9));

    let theme = UiTheme::default().with_support(ColorSupport::Ansi256);
    assert_eq!(theme.text_color(TextColor::rgb(255, 0, 0)), Color::Indexed(196));
    assert_eq!(
        theme.text_color(TextColor::rgb(128, 128, 128)),
        Color::Indexed(244)
    );
}

#[test]
fn color_support_from_env_values() {
    assert_eq!(ColorSupport::from_env("truecolor", "xterm"), ColorSupport::TrueColor);
    assert_eq!(ColorSupport::from_env("", "xterm-256color"), ColorSupport::Ansi256);
    assert_eq!(ColorSupport::from_env("", "vt100"), ColorSupport::Ansi16);
}
