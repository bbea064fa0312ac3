//! Core data structures for showcased items and their frame sequences.

use crate::color::parse_color;

/// Zero-padded width of the frame number in a resource path.
pub const FRAME_NUMBER_WIDTH: usize = 3;

/// Extension appended to every frame resource path.
pub const FRAME_EXTENSION: &str = ".jpg";

/// An ordered, 1-indexed, contiguous set of frame images.
///
/// Frame `k` (1-indexed) resolves to `prefix + zero_pad(k, 3) + ".jpg"`.
/// Internally frames are addressed by a 0-based index in
/// `[0, frame_count - 1]`.
///
/// ## Example
///
/// ```rust
/// use showcase_core_view::ImageSequence;
///
/// let seq = ImageSequence::new("/assets/stm32/ezgif-frame-", 127);
/// assert_eq!(seq.frame_path(0), "/assets/stm32/ezgif-frame-001.jpg");
/// assert_eq!(seq.frame_path(126), "/assets/stm32/ezgif-frame-127.jpg");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImageSequence {
    /// Path template; the frame number and extension are appended to it
    pub prefix: String,
    /// Number of frames in the sequence
    pub frame_count: usize,
}

impl ImageSequence {
    /// Create a new sequence description.
    pub fn new(prefix: impl Into<String>, frame_count: usize) -> Self {
        Self {
            prefix: prefix.into(),
            frame_count,
        }
    }

    /// Resource path for the frame at a 0-based index.
    pub fn frame_path(&self, index: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            index + 1,
            FRAME_EXTENSION,
            width = FRAME_NUMBER_WIDTH
        )
    }

    /// All frame resource paths in display order.
    pub fn frame_paths(&self) -> Vec<String> {
        (0..self.frame_count).map(|i| self.frame_path(i)).collect()
    }

    /// Largest valid frame index, or 0 for an empty sequence.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }
}

/// A labelled technical specification value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

impl SpecEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One showcased subject.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Display name (e.g. "STM32F411 Black Pill")
    pub display_name: String,
    /// One-line headline shown under the name
    #[cfg_attr(feature = "serde", serde(default))]
    pub headline: String,
    /// CSS-style color string used for accents
    pub theme_color: String,
    /// Specs in display order
    #[cfg_attr(feature = "serde", serde(default))]
    pub specs: Vec<SpecEntry>,
    /// Short feature entries in display order
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<String>,
    /// Frame sequence rendered by the item viewer
    pub image_sequence: ImageSequence,
}

impl Item {
    /// Parsed theme color, falling back to white for unparseable values.
    pub fn theme_rgb(&self) -> (u8, u8, u8) {
        parse_color(&self.theme_color).unwrap_or((255, 255, 255))
    }

    /// Look up a spec value by its label.
    pub fn spec(&self, label: &str) -> Option<&str> {
        self.specs
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value.as_str())
    }

    /// First character of the display name, used for compact navigation badges.
    pub fn initial(&self) -> Option<char> {
        self.display_name.chars().next()
    }
}
