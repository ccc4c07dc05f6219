use anyhow::Result;
use std::process;

use plated_core::catalog;
use plated_core::filter::{FilterCriteria, filter_recipes};
use plated_core::models::{CalorieRange, Recipe};

use super::helpers::{json_error, parse_time_tags, render_recipe_detail, render_recipe_table};

pub(crate) fn cmd_recipes(
    recipes: &[Recipe],
    range: CalorieRange,
    time: &[String],
    liked_only: bool,
    json: bool,
) -> Result<()> {
    let criteria = FilterCriteria::new(range).with_tags(parse_time_tags(time)?);
    let matched: Vec<&Recipe> = filter_recipes(recipes, &criteria)
        .into_iter()
        .filter(|r| !liked_only || r.liked)
        .collect();
    tracing::debug!(
        total = recipes.len(),
        matched = matched.len(),
        low = range.low,
        high = range.high,
        "filtered recipes"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&matched)?);
    } else if matched.is_empty() {
        eprintln!("No recipes match {range}. Try widening the calorie range or clearing time tags.");
    } else {
        println!("{}", render_recipe_table(&matched));
    }

    Ok(())
}

pub(crate) fn cmd_show(recipes: &[Recipe], id: i64, json: bool) -> Result<()> {
    let Some(recipe) = catalog::find(recipes, id) else {
        if json {
            println!("{}", json_error(&format!("Recipe {id} not found")));
        } else {
            eprintln!("Recipe {id} not found");
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
    } else {
        print!("{}", render_recipe_detail(recipe));
    }

    Ok(())
}
