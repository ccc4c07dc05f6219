use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{CalorieRange, Recipe, TimeBucket};

/// Calorie interval plus the set of selected time tags.
///
/// An empty tag set places no restriction on preparation time. Several tags
/// combine with OR since a recipe falls into exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub calories: CalorieRange,
    pub time_tags: BTreeSet<TimeBucket>,
}

impl FilterCriteria {
    pub fn new(calories: CalorieRange) -> Self {
        FilterCriteria {
            calories,
            time_tags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I: IntoIterator<Item = TimeBucket>>(mut self, tags: I) -> Self {
        self.time_tags.extend(tags);
        self
    }

    /// Add `tag` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_time_tag(&mut self, tag: TimeBucket) -> bool {
        let selected = if self.time_tags.remove(&tag) {
            false
        } else {
            self.time_tags.insert(tag);
            true
        };
        tracing::debug!(tag = tag.as_str(), selected, "toggled time tag");
        selected
    }

    pub fn matches_calories(&self, recipe: &Recipe) -> bool {
        self.calories.contains(recipe.calories)
    }

    pub fn matches_time(&self, recipe: &Recipe) -> bool {
        self.time_tags.is_empty() || self.time_tags.contains(&TimeBucket::of(recipe.time))
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_calories(recipe) && self.matches_time(recipe)
    }
}

/// Recipes satisfying both the calorie and the time test, in catalog order.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], criteria: &FilterCriteria) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| criteria.matches(r)).collect()
}
