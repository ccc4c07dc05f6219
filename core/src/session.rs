use serde::Serialize;

use crate::catalog;
use crate::estimate::CalorieEstimate;
use crate::filter::{FilterCriteria, filter_recipes};
use crate::models::{CalorieRange, Profile, Recipe, Tab, TimeBucket};
use crate::shopping::ShoppingList;

/// Everything a running front end mutates: active tab, filter, catalog
/// like-flags, shopping list and profile.
///
/// The catalog is fixed at construction. Only `liked` flags change.
#[derive(Debug, Clone)]
pub struct Session {
    active_tab: Tab,
    recipes: Vec<Recipe>,
    criteria: FilterCriteria,
    shopping: ShoppingList,
    profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub recipes_total: usize,
    pub recipes_visible: usize,
    pub liked: usize,
    pub shopping_items: usize,
    pub shopping_checked: usize,
    pub calorie_target: CalorieEstimate,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(catalog::builtin())
    }
}

impl Session {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Session {
            active_tab: Tab::default(),
            recipes,
            criteria: FilterCriteria::default(),
            shopping: ShoppingList::new(),
            profile: Profile::default(),
        }
    }

    #[must_use]
    pub fn with_calorie_range(mut self, range: CalorieRange) -> Self {
        self.criteria.calories = range;
        self
    }

    // --- Tabs ---

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    // --- Catalog ---

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, id: i64) -> Option<&Recipe> {
        catalog::find(&self.recipes, id)
    }

    pub fn toggle_like(&mut self, id: i64) -> Option<bool> {
        catalog::toggle_like(&mut self.recipes, id)
    }

    pub fn liked_recipes(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| r.liked).collect()
    }

    // --- Filter ---

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_calorie_range(&mut self, range: CalorieRange) {
        tracing::debug!(low = range.low, high = range.high, "calorie range changed");
        self.criteria.calories = range;
    }

    pub fn toggle_time_tag(&mut self, tag: TimeBucket) -> bool {
        self.criteria.toggle_time_tag(tag)
    }

    pub fn clear_time_tags(&mut self) {
        self.criteria.time_tags.clear();
    }

    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        filter_recipes(&self.recipes, &self.criteria)
    }

    // --- Shopping list ---

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping
    }

    /// Add a recipe's ingredients to the list. `None` if the id is unknown.
    pub fn add_recipe_to_shopping_list(&mut self, id: i64) -> Option<usize> {
        let recipe = catalog::find(&self.recipes, id)?;
        Some(self.shopping.add_recipe(recipe))
    }

    pub fn remove_shopping_item(&mut self, index: usize) -> Option<String> {
        self.shopping.remove_at(index)
    }

    /// Tick or untick a shopping list item. `None` if there is no such position.
    pub fn toggle_shopping_item(&mut self, index: usize) -> Option<bool> {
        self.shopping.toggle_checked(index)
    }

    pub fn clear_shopping_list(&mut self) {
        self.shopping.clear();
    }

    // --- Profile ---

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn calorie_target(&self) -> CalorieEstimate {
        self.profile.calorie_target()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            recipes_total: self.recipes.len(),
            recipes_visible: self.visible_recipes().len(),
            liked: self.recipes.iter().filter(|r| r.liked).count(),
            shopping_items: self.shopping.len(),
            shopping_checked: self.shopping.checked_count(),
            calorie_target: self.calorie_target(),
        }
    }
}
