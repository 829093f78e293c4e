//! What a renderer should draw for a given snapshot.

use crate::types::{Character, SearchSnapshot};

/// One rendered result: an image followed by the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRow {
    pub key: u64,
    pub image_src: String,
    pub alt: String,
    pub label: String,
}

impl From<&Character> for CharacterRow {
    fn from(c: &Character) -> Self {
        Self { key: c.id, image_src: c.image.clone(), alt: c.name.clone(), label: c.name.clone() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchView {
    pub show_loading: bool,
    pub rows: Vec<CharacterRow>,
}

impl SearchView {
    pub fn show_results(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl From<&SearchSnapshot> for SearchView {
    fn from(s: &SearchSnapshot) -> Self {
        Self { show_loading: s.loading, rows: s.results.iter().map(CharacterRow::from).collect() }
    }
}
