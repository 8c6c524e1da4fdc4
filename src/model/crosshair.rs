//! Crosshair style and configuration (pure Rust, no FFI).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::color::Rgb;
use super::constants::*;

/// Shape drawn by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrosshairStyle {
    /// Two perpendicular line segments.
    #[default]
    Cross,
    /// Filled circle.
    Dot,
    /// Cross and dot together.
    Both,
    /// Unfilled ring.
    Circle,
    /// User supplied image.
    Custom,
}

impl CrosshairStyle {
    /// All styles in combo-box order.
    pub const ALL: [CrosshairStyle; 5] = [
        CrosshairStyle::Cross,
        CrosshairStyle::Dot,
        CrosshairStyle::Both,
        CrosshairStyle::Circle,
        CrosshairStyle::Custom,
    ];

    /// Canonical label written to settings and preset files.
    pub fn label(self) -> &'static str {
        match self {
            CrosshairStyle::Cross => "Cross",
            CrosshairStyle::Dot => "Dot",
            CrosshairStyle::Both => "Both",
            CrosshairStyle::Circle => "Circle",
            CrosshairStyle::Custom => "Custom",
        }
    }

    /// Chinese label, shown in the UI and found in older settings files.
    pub fn chinese_label(self) -> &'static str {
        match self {
            CrosshairStyle::Cross => "十字",
            CrosshairStyle::Dot => "圆点",
            CrosshairStyle::Both => "混合",
            CrosshairStyle::Circle => "圆圈",
            CrosshairStyle::Custom => "自定义",
        }
    }

    /// Parse an English (case-insensitive) or Chinese label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|style| {
            style.label().eq_ignore_ascii_case(label) || style.chinese_label() == label
        })
    }

    /// Position in [`CrosshairStyle::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Does this style draw the two line segments?
    pub fn draws_cross(self) -> bool {
        matches!(self, CrosshairStyle::Cross | CrosshairStyle::Both)
    }

    /// Does this style draw the filled dot?
    pub fn draws_dot(self) -> bool {
        matches!(self, CrosshairStyle::Dot | CrosshairStyle::Both)
    }
}

impl fmt::Display for CrosshairStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CrosshairStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown crosshair style: {s:?}"))
    }
}

/// Everything that decides what the overlay draws.
///
/// Position is deliberately not part of this: presets copy a config, never a
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosshairConfig {
    pub style: CrosshairStyle,
    /// Arm length for the cross, diameter for the ring. [5, 100]
    pub size: i32,
    /// Line and ring stroke width. [1, 10]
    pub thickness: i32,
    /// Dot diameter. [1, 20]
    pub dot_size: i32,
    pub color: Rgb,
    /// Image drawn by [`CrosshairStyle::Custom`].
    pub image_path: Option<PathBuf>,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            style: CrosshairStyle::default(),
            size: DEFAULT_SIZE,
            thickness: DEFAULT_THICKNESS,
            dot_size: DEFAULT_DOT_SIZE,
            color: DEFAULT_COLOR,
            image_path: None,
        }
    }
}

impl CrosshairConfig {
    /// Clamps every numeric field into its range and drops the transparent key color.
    pub fn validate(&mut self) {
        self.size = self.size.clamp(MIN_SIZE, MAX_SIZE);
        self.thickness = self.thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        self.dot_size = self.dot_size.clamp(MIN_DOT_SIZE, MAX_DOT_SIZE);
        self.color = self.color.selectable();
        if self
            .image_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.image_path = None;
        }
    }

    /// Builder-style [`validate`](Self::validate).
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }

    pub fn has_image(&self) -> bool {
        self.image_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for style in CrosshairStyle::ALL {
            assert_eq!(CrosshairStyle::from_label(style.label()), Some(style));
            assert_eq!(CrosshairStyle::from_label(style.chinese_label()), Some(style));
        }
    }

    #[test]
    fn english_labels_ignore_case() {
        assert_eq!(CrosshairStyle::from_label("circle"), Some(CrosshairStyle::Circle));
        assert_eq!(CrosshairStyle::from_label(" BOTH "), Some(CrosshairStyle::Both));
        assert_eq!(CrosshairStyle::from_label("ring"), None);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, style) in CrosshairStyle::ALL.into_iter().enumerate() {
            assert_eq!(style.index(), i);
            assert_eq!(CrosshairStyle::from_index(i), Some(style));
        }
        assert_eq!(CrosshairStyle::from_index(5), None);
    }

    #[test]
    fn validate_drops_empty_image_path() {
        let mut config = CrosshairConfig {
            image_path: Some(PathBuf::new()),
            ..Default::default()
        };
        config.validate();
        assert!(config.image_path.is_none());
    }
}
