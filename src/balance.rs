use std::collections::BTreeMap;

use crate::category::Category;

/// Supported column counts for the catalog layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    Two,
    Three,
}

impl Columns {
    pub fn count(self) -> usize {
        match self {
            Columns::Two => 2,
            Columns::Three => 3,
        }
    }
}

/// Partition `categories` into contiguous column groups of roughly equal
/// cumulative item count.
///
/// The target per column is `total / columns` (integer division, no
/// offset). A single running total is kept across the walk: a category
/// is placed in column `g` while the running total is below
/// `target * (g + 1)`, and the category that crosses the threshold lands
/// in the column being filled, not the next one. The last column absorbs
/// whatever remains, so when the total is zero every category lands
/// there.
///
/// The result always has exactly `columns.count()` groups, every input
/// category appears in exactly one group, and input order is preserved
/// within each group. Categories missing from `item_counts` count as
/// empty.
pub fn split_categories(
    categories: &[Category],
    item_counts: &BTreeMap<Category, usize>,
    columns: Columns,
) -> Vec<Vec<Category>> {
    let column_count = columns.count();
    let total: usize = categories
        .iter()
        .map(|category| item_counts.get(category).copied().unwrap_or(0))
        .sum();
    let target = total / column_count;

    let mut groups: Vec<Vec<Category>> = vec![Vec::new(); column_count];
    let mut running = 0;
    let mut group = 0;

    for &category in categories {
        while group < column_count - 1 && running >= target * (group + 1) {
            group += 1;
        }
        groups[group].push(category);
        running += item_counts.get(&category).copied().unwrap_or(0);
    }

    groups
}
