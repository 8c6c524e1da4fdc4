//! Named crosshair presets.

use std::collections::BTreeMap;

use super::crosshair::CrosshairConfig;

/// Preset mapping, keyed by user-chosen name. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presets {
    entries: BTreeMap<String, CrosshairConfig>,
}

impl Presets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `config` under the trimmed `name`, replacing any previous entry.
    ///
    /// Returns the stored name, or `None` when the name is blank.
    pub fn insert(&mut self, name: &str, config: CrosshairConfig) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.entries.insert(name.to_string(), config);
        Some(name.to_string())
    }

    pub fn get(&self, name: &str) -> Option<&CrosshairConfig> {
        self.entries.get(name.trim())
    }

    pub fn remove(&mut self, name: &str) -> Option<CrosshairConfig> {
        self.entries.remove(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name.trim())
    }

    /// Names in sorted order (the order shown in the combo box).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CrosshairConfig)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CrosshairConfig)> for Presets {
    fn from_iter<T: IntoIterator<Item = (String, CrosshairConfig)>>(iter: T) -> Self {
        let mut presets = Presets::new();
        for (name, config) in iter {
            presets.insert(&name, config);
        }
        presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrosshairStyle;

    #[test]
    fn blank_names_are_rejected() {
        let mut presets = Presets::new();
        assert_eq!(presets.insert("   ", CrosshairConfig::default()), None);
        assert!(presets.is_empty());
    }

    #[test]
    fn names_are_trimmed_and_last_write_wins() {
        let mut presets = Presets::new();
        presets.insert(" sniper ", CrosshairConfig::default());
        let dot = CrosshairConfig {
            style: CrosshairStyle::Dot,
            ..Default::default()
        };
        presets.insert("sniper", dot.clone());
        assert_eq!(presets.len(), 1);
        assert_eq!(presets.get("sniper"), Some(&dot));
    }

    #[test]
    fn names_are_sorted() {
        let presets: Presets = ["b", "a", "c"]
            .into_iter()
            .map(|n| (n.to_string(), CrosshairConfig::default()))
            .collect();
        assert_eq!(presets.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
