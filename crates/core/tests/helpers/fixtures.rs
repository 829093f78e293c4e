//! Canned API payloads for integration tests.

use charscope_core::{Character, CharacterPage};

/// Raw body of a real `/character/?name=rick` response, trimmed to two entries.
pub fn rick_page_json() -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rick_page.json");
    std::fs::read_to_string(&path).expect("Failed to read rick_page.json fixture")
}

pub fn rick_page() -> CharacterPage {
    CharacterPage::from_results(vec![Character::new(1, "Rick Sanchez", "u1")])
}

pub fn morty_page() -> CharacterPage {
    CharacterPage::from_results(vec![Character::new(2, "Morty Smith", "u2")])
}
