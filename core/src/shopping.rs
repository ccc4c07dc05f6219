use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::Recipe;

/// Ordered list of ingredient strings with set-like inserts.
///
/// Items compare by exact string equality, so "морковь 1шт" and
/// "морковь 2шт" are two different entries. Checked marks are positions
/// into `items` and are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<String>,
    #[serde(skip)]
    checked: BTreeSet<usize>,
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
        self.items.iter().any(|i| i == item)
    }

    /// Append every item that was not in the list before the call, in input
    /// order. Repeats within `new_items` itself are all kept.
    /// Returns how many items were added.
    pub fn add_all<I, S>(&mut self, new_items: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.items.len();
        for item in new_items {
            let item = item.as_ref();
            if !self.items[..before].iter().any(|i| i == item) {
                self.items.push(item.to_string());
            }
        }
        let added = self.items.len() - before;
        tracing::debug!(added, total = self.items.len(), "extended shopping list");
        added
    }

    pub fn add_recipe(&mut self, recipe: &Recipe) -> usize {
        self.add_all(&recipe.ingredients)
    }

    /// Drop the item at `index`. Out-of-range indexes leave the list untouched.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.checked = self
            .checked
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        tracing::debug!(index, item = %removed, "removed shopping list item");
        Some(removed)
    }

    /// Tick or untick the item at `index`; returns whether it is now checked.
    pub fn toggle_checked(&mut self, index: usize) -> Option<bool> {
        if index >= self.items.len() {
            return None;
        }
        if self.checked.remove(&index) {
            Some(false)
        } else {
            self.checked.insert(index);
            Some(true)
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.contains(&index)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.checked.clear();
    }

    /// One item per line, in list order.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            out.push_str(item);
            out.push('\n');
        }
        out
    }
}

impl<S: AsRef<str>> FromIterator<S> for ShoppingList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ShoppingList::new();
        list.add_all(iter);
        list
    }
}

/// Russian noun form for an item count, as shown next to the list header.
pub fn item_count_label(count: usize) -> &'static str {
    if count == 1 {
        "товар"
    } else if count < 5 {
        "товара"
    } else {
        "товаров"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_add_all_to_empty() {
        let mut list = ShoppingList::new();
        assert_eq!(list.add_all(["флаг"]), 1);
        assert_eq!(list.items(), ["флаг"]);
    }

    #[test]
    fn test_add_all_skips_existing() {
        let mut list: ShoppingList = ["флаг"].into_iter().collect();
        assert_eq!(list.add_all(["флаг", "новый"]), 1);
        assert_eq!(list.items(), ["флаг", "новый"]);
    }

    #[test]
    fn test_add_all_keeps_repeats_within_batch() {
        let mut list: ShoppingList = ["x"].into_iter().collect();
        assert_eq!(list.add_all(["a", "x", "a"]), 2);
        assert_eq!(list.items(), ["x", "a", "a"]);
        // Both copies now count as present
        assert_eq!(list.add_all(["a"]), 0);
    }

    #[test]
    fn test_add_all_is_exact_match() {
        let mut list = ShoppingList::new();
        list.add_all(["морковь 1шт", "Морковь 1шт", "морковь 2шт"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_add_recipes_shares_ingredients() {
        let recipes = catalog::builtin();
        let mut list = ShoppingList::new();
        // Salmon and chicken both use "морковь 1шт"
        assert_eq!(list.add_recipe(&recipes[1]), 5);
        assert_eq!(list.add_recipe(&recipes[3]), 3);
        assert_eq!(list.len(), 8);
        assert_eq!(list.items()[2], "морковь 1шт");
        assert_eq!(list.items()[6], "гречка 80г");
        // Adding the same recipe twice changes nothing
        assert_eq!(list.add_recipe(&recipes[1]), 0);
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn test_remove_at() {
        let mut list: ShoppingList = ["a", "b", "c"].into_iter().collect();
        assert_eq!(list.remove_at(1).as_deref(), Some("b"));
        assert_eq!(list.items(), ["a", "c"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut list: ShoppingList = ["a", "b", "c"].into_iter().collect();
        assert!(list.remove_at(3).is_none());
        assert_eq!(list.items(), ["a", "b", "c"]);
        let mut empty = ShoppingList::new();
        assert!(empty.remove_at(0).is_none());
    }

    #[test]
    fn test_toggle_checked() {
        let mut list: ShoppingList = ["a", "b"].into_iter().collect();
        assert_eq!(list.toggle_checked(1), Some(true));
        assert!(list.is_checked(1));
        assert!(!list.is_checked(0));
        assert_eq!(list.checked_count(), 1);
        assert_eq!(list.toggle_checked(1), Some(false));
        assert!(!list.is_checked(1));
        assert_eq!(list.toggle_checked(2), None);
        assert_eq!(list.checked_count(), 0);
    }

    #[test]
    fn test_checked_mark_follows_item_on_remove() {
        let mut list: ShoppingList = ["a", "b", "c"].into_iter().collect();
        list.toggle_checked(0);
        list.toggle_checked(2);
        list.remove_at(0);
        assert_eq!(list.items(), ["b", "c"]);
        assert!(!list.is_checked(0));
        assert!(list.is_checked(1));
        assert_eq!(list.checked_count(), 1);

        list.clear();
        assert_eq!(list.checked_count(), 0);
    }

    #[test]
    fn test_export_text() {
        let list: ShoppingList = ["киноа 100г", "огурец 1шт"].into_iter().collect();
        assert_eq!(list.export_text(), "киноа 100г\nогурец 1шт\n");
        assert_eq!(ShoppingList::new().export_text(), "");
    }

    #[test]
    fn test_item_count_label() {
        assert_eq!(item_count_label(1), "товар");
        assert_eq!(item_count_label(0), "товара");
        assert_eq!(item_count_label(3), "товара");
        assert_eq!(item_count_label(5), "товаров");
        assert_eq!(item_count_label(21), "товаров");
    }

    #[test]
    fn test_serializes_as_array() {
        let mut list: ShoppingList = ["a", "b"].into_iter().collect();
        list.toggle_checked(0);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);
    }
}
