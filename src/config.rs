//! Player tuning and showcase configuration documents.

use std::time::Duration;

use crate::{Catalog, CatalogError, Item, SpringConfig};

/// Tuning for [`SequencePlayer`](crate::SequencePlayer).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PlayerConfig {
    /// Seconds for a full open or close pass over the sequence
    pub transition_secs: f64,
    /// Scrub units per pixel of horizontal drag
    pub drag_sensitivity: f64,
    /// Smoothing applied to the raw scrub position
    pub spring: SpringConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            transition_secs: 1.4,
            drag_sensitivity: 0.5,
            spring: SpringConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Transition length as a `Duration`. Non-positive values read as zero.
    pub fn transition(&self) -> Duration {
        Duration::try_from_secs_f64(self.transition_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Scripted playback speed in frames per second for `frame_count` frames.
    ///
    /// A zero-length transition plays instantly.
    pub fn playback_rate(&self, frame_count: usize) -> f64 {
        if self.transition_secs > 0.0 {
            frame_count as f64 / self.transition_secs
        } else {
            f64::INFINITY
        }
    }
}

/// A showcase document: player tuning plus the item catalog.
#[derive(Clone, Debug, Default)]
pub struct ShowcaseConfig {
    pub player: PlayerConfig,
    pub catalog: Catalog,
}

impl ShowcaseConfig {
    pub fn new(player: PlayerConfig, items: Vec<Item>) -> Result<Self, CatalogError> {
        Ok(Self {
            player,
            catalog: Catalog::new(items)?,
        })
    }

    /// Parse a TOML document with an optional `[player]` table and `[[items]]`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        #[derive(serde::Deserialize)]
        struct Document {
            #[serde(default)]
            player: PlayerConfig,
            #[serde(default)]
            items: Vec<Item>,
        }
        let doc: Document = toml::from_str(s)?;
        Self::new(doc.player, doc.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.transition(), Duration::from_millis(1400));
        assert_eq!(config.drag_sensitivity, 0.5);
        assert_eq!(config.spring.stiffness, 200.0);
        assert_eq!(config.spring.damping, 50.0);
    }

    #[test]
    fn test_playback_rate() {
        let config = PlayerConfig {
            transition_secs: 2.0,
            ..PlayerConfig::default()
        };
        assert_eq!(config.playback_rate(100), 50.0);

        let instant = PlayerConfig {
            transition_secs: 0.0,
            ..PlayerConfig::default()
        };
        assert!(instant.playback_rate(10).is_infinite());
        assert_eq!(instant.transition(), Duration::ZERO);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_bundled_catalog_loads() {
        let config = ShowcaseConfig::from_toml_str(include_str!("../assets/catalog.toml")).unwrap();
        assert_eq!(config.catalog.len(), 5);
        assert_eq!(config.player, PlayerConfig::default());
        let ids: Vec<&str> = config.catalog.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "power-supply",
                "stm32",
                "buck-converter",
                "mosfet-trigger",
                "emi-filter"
            ]
        );
        for item in config.catalog.items() {
            assert_eq!(item.image_sequence.frame_count, 127);
        }
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_player_table_overrides() {
        let doc = r#"
            [player]
            transitionSecs = 0.8

            [player.spring]
            stiffness = 300.0
        "#;
        let config = ShowcaseConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.player.transition_secs, 0.8);
        assert_eq!(config.player.drag_sensitivity, 0.5);
        assert_eq!(config.player.spring.stiffness, 300.0);
        assert_eq!(config.player.spring.damping, 50.0);
        assert!(config.catalog.is_empty());
    }
}
