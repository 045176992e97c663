use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of catalog categories, in display order.
///
/// Serializes to and from the display name, so documents stored as JSON
/// maps are keyed by the human-readable category name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "Fresh Produce")]
    FreshProduce,
    #[serde(rename = "Meat & Seafood")]
    MeatSeafood,
    #[serde(rename = "Dairy & Eggs")]
    DairyEggs,
    #[serde(rename = "Bread & Bakery")]
    BreadBakery,
    #[serde(rename = "Pantry Staples")]
    PantryStaples,
    #[serde(rename = "Frozen Foods")]
    FrozenFoods,
    #[serde(rename = "Snacks & Sweets")]
    SnacksSweets,
    #[serde(rename = "Beverages")]
    Beverages,
    #[serde(rename = "Condiments & Sauces")]
    CondimentsSauces,
    #[serde(rename = "Breakfast & Cereal")]
    BreakfastCereal,
    #[serde(rename = "Health Food")]
    HealthFood,
    #[serde(rename = "Household & Cleaning Supplies")]
    HouseholdCleaning,
    #[serde(rename = "Personal Care & Hygiene")]
    PersonalCare,
    #[serde(rename = "Pet Supplies")]
    PetSupplies,
}

impl Category {
    /// Every category, in the fixed display order.
    pub const ALL: [Category; 14] = [
        Category::FreshProduce,
        Category::MeatSeafood,
        Category::DairyEggs,
        Category::BreadBakery,
        Category::PantryStaples,
        Category::FrozenFoods,
        Category::SnacksSweets,
        Category::Beverages,
        Category::CondimentsSauces,
        Category::BreakfastCereal,
        Category::HealthFood,
        Category::HouseholdCleaning,
        Category::PersonalCare,
        Category::PetSupplies,
    ];

    /// The display name.
    pub fn name(self) -> &'static str {
        match self {
            Category::FreshProduce => "Fresh Produce",
            Category::MeatSeafood => "Meat & Seafood",
            Category::DairyEggs => "Dairy & Eggs",
            Category::BreadBakery => "Bread & Bakery",
            Category::PantryStaples => "Pantry Staples",
            Category::FrozenFoods => "Frozen Foods",
            Category::SnacksSweets => "Snacks & Sweets",
            Category::Beverages => "Beverages",
            Category::CondimentsSauces => "Condiments & Sauces",
            Category::BreakfastCereal => "Breakfast & Cereal",
            Category::HealthFood => "Health Food",
            Category::HouseholdCleaning => "Household & Cleaning Supplies",
            Category::PersonalCare => "Personal Care & Hygiene",
            Category::PetSupplies => "Pet Supplies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A category name outside the fixed enumeration. User-input validation,
/// recoverable; the interactive layer rejects the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCategory(pub String);

impl fmt::Display for InvalidCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for InvalidCategory {}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_category_once() {
        assert_eq!(Category::ALL.len(), 14);
        for window in Category::ALL.windows(2) {
            assert!(window[0] < window[1], "display order must match enum order");
        }
    }

    #[test]
    fn parse_round_trips_every_name() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "Automotive".parse::<Category>().unwrap_err();
        assert_eq!(err, InvalidCategory("Automotive".to_string()));
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Category::DairyEggs).unwrap();
        assert_eq!(json, r#""Dairy & Eggs""#);
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::DairyEggs);
    }
}
