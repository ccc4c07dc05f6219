use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use plated_core::estimate::CalorieEstimate;
use plated_core::models::{Profile, Recipe, TimeBucket};
use plated_core::shopping::{ShoppingList, item_count_label};

pub(crate) fn parse_time_tags(tags: &[String]) -> Result<BTreeSet<TimeBucket>> {
    tags.iter().map(|t| t.parse::<TimeBucket>()).collect()
}

pub(crate) fn render_recipe_table(recipes: &[&Recipe]) -> String {
    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Kcal")]
        calories: u32,
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Difficulty")]
        difficulty: &'static str,
        #[tabled(rename = "♥")]
        liked: &'static str,
    }

    let rows: Vec<RecipeRow> = recipes
        .iter()
        .map(|r| RecipeRow {
            id: r.id,
            name: truncate(&r.name, 35),
            calories: r.calories,
            time: format!("{} min", r.time),
            difficulty: r.difficulty.label(),
            liked: if r.liked { "♥" } else { "" },
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .to_string()
}

pub(crate) fn render_recipe_detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    let heart = if recipe.liked { " ♥" } else { "" };
    let _ = writeln!(out, "=== {}{heart} ===", recipe.name);
    let _ = writeln!(
        out,
        "  {} kcal  |  {} min  |  {}\n",
        recipe.calories,
        recipe.time,
        recipe.difficulty.label()
    );
    out.push_str("  INGREDIENTS:\n");
    for ing in &recipe.ingredients {
        let _ = writeln!(out, "    {ing}");
    }
    out
}

pub(crate) fn render_shopping_list(list: &ShoppingList) -> String {
    if list.is_empty() {
        return "Shopping list is empty. Add recipes to fill it.\n".to_string();
    }

    let mut out = String::new();
    let count = list.len();
    let _ = writeln!(out, "Shopping list: {count} {}", item_count_label(count));
    for (i, item) in list.items().iter().enumerate() {
        let mark = if list.is_checked(i) { 'x' } else { ' ' };
        let _ = writeln!(out, "  {i:>2}. [{mark}] {item}");
    }
    out
}

pub(crate) fn render_profile(profile: &Profile, target: CalorieEstimate) -> String {
    fn field(raw: &str) -> &str {
        let raw = raw.trim();
        if raw.is_empty() { "-" } else { raw }
    }

    let mut out = String::new();
    let name = if profile.name.is_empty() {
        "-"
    } else {
        profile.name.as_str()
    };
    let _ = writeln!(out, "Name:         {name}");
    let _ = writeln!(out, "Age:          {}", field(&profile.age));
    let _ = writeln!(out, "Weight (kg):  {}", field(&profile.weight_kg));
    let _ = writeln!(out, "Height (cm):  {}", field(&profile.height_cm));
    let _ = writeln!(out, "Goal:         {}", profile.goal.as_str());
    let _ = writeln!(out, "Activity:     {}", profile.activity.as_str());
    let restrictions: Vec<&str> = profile.restrictions.iter().map(|r| r.label()).collect();
    let restrictions = if restrictions.is_empty() {
        "-".to_string()
    } else {
        restrictions.join(", ")
    };
    let _ = writeln!(out, "Restrictions: {restrictions}");
    let _ = writeln!(out, "Daily target: {target}");
    out
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
