//! Pure helpers and domain logic used by the app. Keep this file free of
//! Win32 FFI so tests can run as normal integration tests on any platform.

pub mod events;
pub mod launch;
pub mod logging;
pub mod model;
pub mod panel;
pub mod render;
pub mod storage;

#[cfg(target_os = "windows")]
pub mod platform;

use std::borrow::Cow;

use model::CrosshairStyle;

// Re-export model types for convenience
pub use model::{CrosshairConfig, Position, Presets, Rgb};

// Re-export event types for convenience
pub use events::{AppEvent, EventBus, EventPublisher};

pub use panel::{ControlPanel, OverlaySurface, StyleOutcome, Trigger};

/// UI language. Picked once from the OS at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    /// Map a Windows LANGID (or any id whose low 10 bits are the primary
    /// language) to a UI language.
    pub fn from_langid(langid: u16) -> Self {
        const LANG_CHINESE: u16 = 0x04;
        if langid & 0x3FF == LANG_CHINESE {
            Language::Chinese
        } else {
            Language::English
        }
    }
}

/// Display label of a style in `lang`.
pub fn style_label(style: CrosshairStyle, lang: Language) -> &'static str {
    match lang {
        Language::English => style.label(),
        Language::Chinese => style.chinese_label(),
    }
}

/// Very small localisation helper used by the control panel and tray.
pub fn tr_key(key: &str, lang: Language) -> Cow<'static, str> {
    use Language::{Chinese as Zh, English as En};

    match (key, lang) {
        ("Administrator", Zh) => Cow::Borrowed("管理员"),
        ("Administrator", En) => Cow::Borrowed("Administrator"),

        ("Standard", Zh) => Cow::Borrowed("普通"),
        ("Standard", En) => Cow::Borrowed("Standard"),

        // Style group
        ("Style", Zh) => Cow::Borrowed("样式"),
        ("Style", En) => Cow::Borrowed("Style"),

        ("Type:", Zh) => Cow::Borrowed("类型:"),
        ("Type:", En) => Cow::Borrowed("Type:"),

        ("Choose image...", Zh) => Cow::Borrowed("选择图片"),
        ("Choose image...", En) => Cow::Borrowed("Choose image..."),

        ("Color:", Zh) => Cow::Borrowed("颜色:"),
        ("Color:", En) => Cow::Borrowed("Color:"),

        ("Choose...", Zh) => Cow::Borrowed("选择"),
        ("Choose...", En) => Cow::Borrowed("Choose..."),

        // Size group
        ("Size", Zh) => Cow::Borrowed("尺寸"),
        ("Size", En) => Cow::Borrowed("Size"),

        ("Length", Zh) => Cow::Borrowed("大小"),
        ("Length", En) => Cow::Borrowed("Length"),

        ("Thickness", Zh) => Cow::Borrowed("粗细"),
        ("Thickness", En) => Cow::Borrowed("Thickness"),

        ("Dot size", Zh) => Cow::Borrowed("圆点大小"),
        ("Dot size", En) => Cow::Borrowed("Dot size"),

        // Position group
        ("Position (arrow keys nudge)", Zh) => Cow::Borrowed("位置 (使用方向键微调)"),
        ("Position (arrow keys nudge)", En) => Cow::Borrowed("Position (arrow keys nudge)"),

        ("Center", Zh) => Cow::Borrowed("居中"),
        ("Center", En) => Cow::Borrowed("Center"),

        ("Hold here and drag", Zh) => Cow::Borrowed("按住拖动准心"),
        ("Hold here and drag", En) => Cow::Borrowed("Hold here and drag"),

        // Presets
        ("Presets", Zh) => Cow::Borrowed("预设配置"),
        ("Presets", En) => Cow::Borrowed("Presets"),

        ("Preset:", Zh) => Cow::Borrowed("方案:"),
        ("Preset:", En) => Cow::Borrowed("Preset:"),

        ("<-- select a preset -->", Zh) => Cow::Borrowed("<-- 选择方案 -->"),
        ("<-- select a preset -->", En) => Cow::Borrowed("<-- select a preset -->"),

        ("Save", Zh) => Cow::Borrowed("保存"),
        ("Save", En) => Cow::Borrowed("Save"),

        ("Delete", Zh) => Cow::Borrowed("删除"),
        ("Delete", En) => Cow::Borrowed("Delete"),

        ("Import", Zh) => Cow::Borrowed("导入"),
        ("Import", En) => Cow::Borrowed("Import"),

        ("Share", Zh) => Cow::Borrowed("分享"),
        ("Share", En) => Cow::Borrowed("Share"),

        ("Share preset", Zh) => Cow::Borrowed("分享方案"),
        ("Share preset", En) => Cow::Borrowed("Share preset"),

        ("Import preset", Zh) => Cow::Borrowed("导入方案"),
        ("Import preset", En) => Cow::Borrowed("Import preset"),

        ("Share warning", Zh) => Cow::Borrowed("分享警告"),
        ("Share warning", En) => Cow::Borrowed("Share warning"),

        ("custom image export warning", Zh) => Cow::Borrowed(
            "该方案使用了自定义图片。\n\n分享方案仅包含配置信息，不包含图片文件。\n接收方需要手动设置同名图片才能正常显示。\n\n是否继续？",
        ),
        ("custom image export warning", En) => Cow::Borrowed(
            "This preset uses a custom image.\n\nThe shared file contains the settings only, not the image file.\nThe recipient has to place an image at the same path for it to show.\n\nContinue?",
        ),

        // System row
        ("Hide to tray", Zh) => Cow::Borrowed("隐藏到托盘"),
        ("Hide to tray", En) => Cow::Borrowed("Hide to tray"),

        ("Autostart: on", Zh) => Cow::Borrowed("开机自启：开"),
        ("Autostart: on", En) => Cow::Borrowed("Autostart: on"),

        ("Autostart: off", Zh) => Cow::Borrowed("开机自启：关"),
        ("Autostart: off", En) => Cow::Borrowed("Autostart: off"),

        ("Run as administrator", Zh) => Cow::Borrowed("管理员启动"),
        ("Run as administrator", En) => Cow::Borrowed("Run as administrator"),

        ("Run unelevated", Zh) => Cow::Borrowed("取消管理员"),
        ("Run unelevated", En) => Cow::Borrowed("Run unelevated"),

        // Dialogs
        ("Select image", Zh) => Cow::Borrowed("选择图片"),
        ("Select image", En) => Cow::Borrowed("Select image"),

        ("Image Files", Zh) => Cow::Borrowed("图片文件"),
        ("Image Files", En) => Cow::Borrowed("Image Files"),

        ("JSON Files", Zh) => Cow::Borrowed("JSON 文件"),
        ("JSON Files", En) => Cow::Borrowed("JSON Files"),

        ("Error", Zh) => Cow::Borrowed("错误"),
        ("Error", En) => Cow::Borrowed("Error"),

        ("Could not change the autostart setting", Zh) => Cow::Borrowed("无法修改开机启动设置"),
        ("Could not change the autostart setting", En) => {
            Cow::Borrowed("Could not change the autostart setting")
        }

        ("Could not restart as administrator", Zh) => Cow::Borrowed("无法以管理员身份重启"),
        ("Could not restart as administrator", En) => {
            Cow::Borrowed("Could not restart as administrator")
        }

        ("Could not restart", Zh) => Cow::Borrowed("无法重启"),
        ("Could not restart", En) => Cow::Borrowed("Could not restart"),

        // Tray menu
        ("Show settings", Zh) => Cow::Borrowed("显示设置"),
        ("Show settings", En) => Cow::Borrowed("Show settings"),

        ("Quit", Zh) => Cow::Borrowed("退出"),
        ("Quit", En) => Cow::Borrowed("Quit"),

        _ => Cow::Owned(key.to_string()),
    }
}

/// Main window title for the current privilege level.
pub fn window_title(is_elevated: bool, lang: Language) -> String {
    let level = if is_elevated {
        tr_key("Administrator", lang)
    } else {
        tr_key("Standard", lang)
    };
    format!("{} - {}", model::APP_NAME, level)
}
