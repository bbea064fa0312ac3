//! The fixed, ordered collection of showcased items.

use std::collections::HashSet;

use crate::Item;

/// Error type for catalog construction.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// An item was given an empty id
    EmptyId { position: usize },
    /// Two items share the same id
    DuplicateId { id: String },
    /// An item's frame sequence has no frames
    EmptySequence { id: String },
    /// The catalog document could not be decoded
    #[cfg(feature = "toml")]
    Decode(toml::de::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::EmptyId { position } => {
                write!(f, "Item at position {} has an empty id", position)
            }
            CatalogError::DuplicateId { id } => write!(f, "Duplicate item id: {}", id),
            CatalogError::EmptySequence { id } => {
                write!(f, "Item {} has an image sequence with no frames", id)
            }
            #[cfg(feature = "toml")]
            CatalogError::Decode(err) => write!(f, "Invalid catalog document: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Decode(err)
    }
}

/// Read-only, ordered item collection with unique ids.
///
/// ## Example
///
/// ```rust
/// use showcase_core_view::{Catalog, ImageSequence, Item};
///
/// let item = |id: &str| Item {
///     id: id.into(),
///     display_name: id.to_uppercase(),
///     headline: String::new(),
///     theme_color: "#fff".into(),
///     specs: Vec::new(),
///     features: Vec::new(),
///     image_sequence: ImageSequence::new(format!("/{id}/"), 5),
/// };
///
/// let catalog = Catalog::new(vec![item("a"), item("b"), item("c")]).unwrap();
/// assert_eq!(catalog.next_id("c"), Some("a"));
/// assert_eq!(catalog.prev_id("a"), Some("c"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Validate and wrap an ordered item list.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(CatalogError::EmptyId { position });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: item.id.clone(),
                });
            }
            if item.image_sequence.frame_count == 0 {
                return Err(CatalogError::EmptySequence {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Parse a TOML document containing an `[[items]]` array.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        #[derive(serde::Deserialize)]
        struct Document {
            #[serde(default)]
            items: Vec<Item>,
        }
        let doc: Document = toml::from_str(s)?;
        Self::new(doc.items)
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of an item in display order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Cyclic successor of `id`. `None` for unknown ids or an empty catalog.
    pub fn next_id(&self, id: &str) -> Option<&str> {
        let idx = self.index_of(id)?;
        let next = (idx + 1) % self.items.len();
        Some(self.items[next].id.as_str())
    }

    /// Cyclic predecessor of `id`. `None` for unknown ids or an empty catalog.
    pub fn prev_id(&self, id: &str) -> Option<&str> {
        let idx = self.index_of(id)?;
        let len = self.items.len();
        let prev = (idx + len - 1) % len;
        Some(self.items[prev].id.as_str())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ImageSequence;

    pub(crate) fn item(id: &str, frames: usize) -> Item {
        Item {
            id: id.into(),
            display_name: id.to_uppercase(),
            headline: String::new(),
            theme_color: "#C0C0C0".into(),
            specs: Vec::new(),
            features: Vec::new(),
            image_sequence: ImageSequence::new(format!("/assets/{id}/frame-"), frames),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![item("a", 5), item("a", 5)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId { id: "a".into() });
    }

    #[test]
    fn rejects_empty_id_and_empty_sequence() {
        assert_eq!(
            Catalog::new(vec![item("a", 5), item("", 5)]).unwrap_err(),
            CatalogError::EmptyId { position: 1 }
        );
        assert_eq!(
            Catalog::new(vec![item("a", 0)]).unwrap_err(),
            CatalogError::EmptySequence { id: "a".into() }
        );
    }

    #[test]
    fn next_cycles_back_to_start() {
        let catalog = Catalog::new(vec![item("a", 5), item("b", 5), item("c", 5)]).unwrap();
        for start in ["a", "b", "c"] {
            let mut id = start.to_string();
            for _ in 0..catalog.len() {
                id = catalog.next_id(&id).unwrap().to_string();
            }
            assert_eq!(id, start);
        }
    }

    #[test]
    fn prev_inverts_next() {
        let catalog = Catalog::new(vec![item("a", 5), item("b", 5), item("c", 5)]).unwrap();
        for x in ["a", "b", "c"] {
            let next = catalog.next_id(x).unwrap();
            assert_eq!(catalog.prev_id(next), Some(x));
        }
    }

    #[test]
    fn single_item_is_its_own_neighbour() {
        let catalog = Catalog::new(vec![item("solo", 1)]).unwrap();
        assert_eq!(catalog.next_id("solo"), Some("solo"));
        assert_eq!(catalog.prev_id("solo"), Some("solo"));
    }

    #[test]
    fn unknown_and_empty_lookups() {
        let empty = Catalog::default();
        assert!(empty.is_empty());
        assert_eq!(empty.next_id("a"), None);
        assert_eq!(empty.prev_id("a"), None);

        let catalog = Catalog::new(vec![item("a", 5)]).unwrap();
        assert_eq!(catalog.next_id("zzz"), None);
        assert!(catalog.get("zzz").is_none());
        assert_eq!(catalog.index_of("a"), Some(0));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml_document() {
        let doc = r##"
            [[items]]
            id = "stm32"
            displayName = "STM32F411 Black Pill"
            themeColor = "#FFD700"
            specs = [{ label = "Chip", value = "ARM Cortex-M4" }]
            features = ["USB-C Interface"]
            imageSequence = { prefix = "/assets/stm32/ezgif-frame-", frameCount = 127 }
        "##;
        let catalog = Catalog::from_toml_str(doc).unwrap();
        assert_eq!(catalog.len(), 1);
        let item = catalog.get("stm32").unwrap();
        assert_eq!(item.spec("Chip"), Some("ARM Cortex-M4"));
        assert_eq!(item.image_sequence.frame_count, 127);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_duplicate_ids_fail_validation() {
        let doc = r#"
            [[items]]
            id = "a"
            displayName = "A"
            themeColor = "red"
            imageSequence = { prefix = "/a/", frameCount = 2 }

            [[items]]
            id = "a"
            displayName = "A again"
            themeColor = "red"
            imageSequence = { prefix = "/a/", frameCount = 2 }
        "#;
        assert!(matches!(
            Catalog::from_toml_str(doc),
            Err(CatalogError::DuplicateId { .. })
        ));
    }
}
