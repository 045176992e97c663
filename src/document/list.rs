use serde::{Deserialize, Serialize};

use super::Document;
use crate::titlecase;

/// The shopping list: an ordered sequence of item names with no
/// duplicates.
///
/// Duplicates are checked against the normalized display form at
/// insertion time; removal is exact-match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<String>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    /// Append the normalized display form of `item` unless it is already
    /// present. Returns whether the list changed.
    pub fn add(&mut self, item: &str) -> bool {
        let item = titlecase::normalize(item);
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the exact entry. Returns whether it was present.
    pub fn remove(&mut self, item: &str) -> bool {
        match self.items.iter().position(|existing| existing == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Re-derive display casing after a load. Insertion order is kept.
    pub fn canonicalize(&mut self) {
        for item in &mut self.items {
            *item = titlecase::normalize(item);
        }
    }
}

impl Document for ShoppingList {
    const TABLE: &'static str = "grocery_list";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_normalizes_and_deduplicates() {
        let mut list = ShoppingList::new();

        assert!(list.add("milk"));
        assert!(!list.add("milk"));
        assert!(!list.add("MILK"));

        assert_eq!(list.items(), ["Milk"]);
    }

    #[test]
    fn remove_is_exact_match() {
        let mut list = ShoppingList::new();
        list.add("milk");

        assert!(!list.remove("milk"), "stored form is the display form");
        assert!(list.remove("Milk"));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_missing_is_a_noop() {
        let mut list = ShoppingList::new();
        assert!(!list.remove("Bread"));
    }

    #[test]
    fn canonicalize_fixes_casing_in_place() {
        let json = r#"["whole milk", "EGGS"]"#;
        let mut list: ShoppingList = serde_json::from_str(json).unwrap();

        list.canonicalize();

        assert_eq!(list.items(), ["Whole Milk", "Eggs"]);
    }

    #[test]
    fn serializes_as_a_bare_array() {
        let mut list = ShoppingList::new();
        list.add("milk");
        list.add("bread");

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["Milk","Bread"]"#);
    }
}
