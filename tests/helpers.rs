use reticle::model::{parse_coordinate, CrosshairStyle};
use reticle::{style_label, tr_key, window_title, Language};

#[test]
fn tr_key_english_returns_key_text() {
    assert_eq!(tr_key("Center", Language::English), "Center");
    assert_eq!(tr_key("Hide to tray", Language::English), "Hide to tray");
}

#[test]
fn tr_key_chinese_translates() {
    assert_eq!(tr_key("Center", Language::Chinese), "居中");
    assert_eq!(tr_key("Quit", Language::Chinese), "退出");
    assert_eq!(tr_key("Presets", Language::Chinese), "预设配置");
}

#[test]
fn tr_key_unknown_key_falls_back_to_key() {
    assert_eq!(tr_key("No such label", Language::English), "No such label");
    assert_eq!(tr_key("No such label", Language::Chinese), "No such label");
}

#[test]
fn tr_key_export_warning_is_a_sentence() {
    let en = tr_key("custom image export warning", Language::English);
    assert!(en.contains("custom image"));
    assert!(en.ends_with('?'));
}

#[test]
fn language_from_langid_uses_primary_language() {
    assert_eq!(Language::from_langid(0x0804), Language::Chinese); // zh-CN
    assert_eq!(Language::from_langid(0x0404), Language::Chinese); // zh-TW
    assert_eq!(Language::from_langid(0x0409), Language::English); // en-US
    assert_eq!(Language::from_langid(0x040C), Language::English); // fr-FR
    assert_eq!(Language::default(), Language::English);
}

#[test]
fn window_title_shows_privilege_level() {
    assert_eq!(window_title(true, Language::English), "Reticle - Administrator");
    assert_eq!(window_title(false, Language::English), "Reticle - Standard");
    assert_eq!(window_title(true, Language::Chinese), "Reticle - 管理员");
}

#[test]
fn style_labels_follow_language() {
    assert_eq!(style_label(CrosshairStyle::Both, Language::English), "Both");
    assert_eq!(style_label(CrosshairStyle::Both, Language::Chinese), "混合");
    assert_eq!(style_label(CrosshairStyle::Custom, Language::Chinese), "自定义");
}

#[test]
fn parse_coordinate_accepts_what_the_fields_accept() {
    assert_eq!(parse_coordinate("100"), Some(100));
    assert_eq!(parse_coordinate("100.75"), Some(100));
    assert_eq!(parse_coordinate("-5"), Some(-5));
    assert_eq!(parse_coordinate(""), None);
    assert_eq!(parse_coordinate("-"), None);
}
