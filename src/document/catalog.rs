use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Document;
use crate::category::Category;
use crate::titlecase;

/// The catalog of known groceries: every category from the fixed
/// enumeration maps to an ordered item list.
///
/// Every category key is always present (empty list when it has no
/// items). Item uniqueness is per category, so the same name may exist
/// in several categories. Sort order is a presentation concern,
/// re-derived on load by [`canonicalize`](Catalog::canonicalize), never
/// an invariant of the write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    groceries: BTreeMap<Category, Vec<String>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog with every category present.
    pub fn new() -> Self {
        Catalog {
            groceries: Category::ALL
                .iter()
                .map(|&category| (category, Vec::new()))
                .collect(),
        }
    }

    pub fn items(&self, category: Category) -> &[String] {
        self.groceries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: Category, item: &str) -> bool {
        self.items(category).iter().any(|existing| existing == item)
    }

    pub fn item_count(&self, category: Category) -> usize {
        self.items(category).len()
    }

    pub fn total_items(&self) -> usize {
        self.groceries.values().map(Vec::len).sum()
    }

    /// Item count per category, for the column layout.
    pub fn item_counts(&self) -> BTreeMap<Category, usize> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.item_count(category)))
            .collect()
    }

    /// Append the normalized display form of `item` to `category` unless
    /// that category already holds it. Returns whether the catalog
    /// changed.
    pub fn add(&mut self, category: Category, item: &str) -> bool {
        let item = titlecase::normalize(item);
        let items = self.groceries.entry(category).or_default();
        if items.contains(&item) {
            return false;
        }
        items.push(item);
        true
    }

    /// Remove at most one occurrence of `item`, scanning categories in
    /// display order. Returns the category it was removed from.
    pub fn remove_first(&mut self, item: &str) -> Option<Category> {
        for category in Category::ALL {
            if let Some(items) = self.groceries.get_mut(&category) {
                if let Some(index) = items.iter().position(|existing| existing == item) {
                    items.remove(index);
                    return Some(category);
                }
            }
        }
        None
    }

    /// Restore the document's shape after a load: every category key
    /// present, item casing normalized, each category sorted for
    /// presentation.
    pub fn canonicalize(&mut self) {
        for category in Category::ALL {
            let items = self.groceries.entry(category).or_default();
            for item in items.iter_mut() {
                *item = titlecase::normalize(item);
            }
            items.sort();
        }
    }
}

impl Document for Catalog {
    const TABLE: &'static str = "default_groceries";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_catalog_has_every_category() {
        let catalog = Catalog::new();
        for category in Category::ALL {
            assert!(catalog.items(category).is_empty());
        }
        assert_eq!(catalog.total_items(), 0);
    }

    #[test]
    fn add_deduplicates_within_a_category_only() {
        let mut catalog = Catalog::new();

        assert!(catalog.add(Category::DairyEggs, "eggs"));
        assert!(!catalog.add(Category::DairyEggs, "EGGS"));
        // The same name in another category is legitimate.
        assert!(catalog.add(Category::FreshProduce, "eggs"));

        assert_eq!(catalog.items(Category::DairyEggs), ["Eggs"]);
        assert_eq!(catalog.items(Category::FreshProduce), ["Eggs"]);
    }

    #[test]
    fn remove_first_takes_one_occurrence_in_display_order() {
        let mut catalog = Catalog::new();
        catalog.add(Category::FreshProduce, "eggs");
        catalog.add(Category::DairyEggs, "eggs");

        let removed = catalog.remove_first("Eggs");

        assert_eq!(removed, Some(Category::FreshProduce));
        assert!(catalog.items(Category::FreshProduce).is_empty());
        assert_eq!(catalog.items(Category::DairyEggs), ["Eggs"]);
    }

    #[test]
    fn remove_first_missing_is_a_noop() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.remove_first("Tofu"), None);
    }

    #[test]
    fn canonicalize_restores_missing_categories_and_sorts() {
        let json = r#"{"Dairy & Eggs": ["yogurt", "EGGS", "milk"]}"#;
        let mut catalog: Catalog = serde_json::from_str(json).unwrap();

        catalog.canonicalize();

        assert_eq!(
            catalog.items(Category::DairyEggs),
            ["Eggs", "Milk", "Yogurt"]
        );
        for category in Category::ALL {
            if category != Category::DairyEggs {
                assert!(catalog.items(category).is_empty());
            }
        }
    }

    #[test]
    fn serializes_keyed_by_display_name() {
        let mut catalog = Catalog::new();
        catalog.add(Category::PetSupplies, "kibble");

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains(r#""Pet Supplies":["Kibble"]"#));
    }

    #[test]
    fn item_counts_cover_every_category() {
        let mut catalog = Catalog::new();
        catalog.add(Category::Beverages, "coffee");
        catalog.add(Category::Beverages, "tea");

        let counts = catalog.item_counts();

        assert_eq!(counts.len(), 14);
        assert_eq!(counts[&Category::Beverages], 2);
        assert_eq!(counts[&Category::PetSupplies], 0);
    }
}
