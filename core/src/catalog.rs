use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::models::{Difficulty, Recipe, validate_recipe};

const DEFAULT_IMAGE: &str = "https://cdn.poehali.dev/projects/65eb7456-62ce-40d4-99dd-ff6097f16b3a/files/302a35bd-699a-446b-902f-e8c7776d4b90.jpg";

fn recipe(
    id: i64,
    name: &str,
    calories: u32,
    time: u32,
    difficulty: Difficulty,
    ingredients: &[&str],
) -> Recipe {
    Recipe {
        id,
        name: name.to_string(),
        calories,
        time,
        difficulty,
        image: DEFAULT_IMAGE.to_string(),
        ingredients: ingredients.iter().map(|s| (*s).to_string()).collect(),
        liked: false,
    }
}

/// The catalog shipped with the binary.
pub fn builtin() -> Vec<Recipe> {
    vec![
        recipe(
            1,
            "Греческий салат с киноа",
            350,
            15,
            Difficulty::Easy,
            &[
                "киноа 100г",
                "огурец 1шт",
                "помидор 2шт",
                "фета 50г",
                "оливки 30г",
                "оливковое масло 1ст.л",
            ],
        ),
        recipe(
            2,
            "Запечённый лосось с овощами",
            450,
            35,
            Difficulty::Medium,
            &[
                "лосось 150г",
                "брокколи 100г",
                "морковь 1шт",
                "лимон 0.5шт",
                "специи",
            ],
        ),
        recipe(
            3,
            "Овсяная каша с ягодами",
            280,
            10,
            Difficulty::Easy,
            &["овсянка 50г", "молоко 200мл", "ягоды 100г", "мёд 1ч.л"],
        ),
        recipe(
            4,
            "Куриная грудка с гречкой",
            420,
            30,
            Difficulty::Medium,
            &["куриная грудка 150г", "гречка 80г", "лук 1шт", "морковь 1шт"],
        ),
        recipe(
            5,
            "Фруктовый смузи-боул",
            320,
            5,
            Difficulty::Easy,
            &[
                "банан 2шт",
                "ягоды 150г",
                "греческий йогурт 100г",
                "гранола 30г",
                "мёд 1ч.л",
            ],
        ),
        recipe(
            6,
            "Борщ диетический",
            180,
            60,
            Difficulty::Hard,
            &[
                "свёкла 1шт",
                "капуста 200г",
                "морковь 1шт",
                "картофель 2шт",
                "томатная паста 2ст.л",
                "говядина 100г",
            ],
        ),
    ]
}

/// Parse a JSON array of recipes and validate it as a catalog.
pub fn parse(json: &str) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> = serde_json::from_str(json).context("Invalid catalog JSON")?;
    validate(&recipes)?;
    Ok(recipes)
}

pub fn load(path: &Path) -> Result<Vec<Recipe>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let recipes = parse(&data).with_context(|| format!("Invalid catalog: {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = recipes.len(), "loaded recipe catalog");
    Ok(recipes)
}

pub fn validate(recipes: &[Recipe]) -> Result<()> {
    let mut seen = HashSet::new();
    for r in recipes {
        validate_recipe(r)?;
        if !seen.insert(r.id) {
            bail!("Duplicate recipe id {} ('{}')", r.id, r.name);
        }
    }
    Ok(())
}

pub fn find(recipes: &[Recipe], id: i64) -> Option<&Recipe> {
    recipes.iter().find(|r| r.id == id)
}

/// Flip the liked flag of the recipe with `id`.
///
/// Returns the new flag, or `None` (and leaves the catalog untouched) when no
/// recipe has that id.
pub fn toggle_like(recipes: &mut [Recipe], id: i64) -> Option<bool> {
    let recipe = recipes.iter_mut().find(|r| r.id == id)?;
    recipe.liked = !recipe.liked;
    tracing::debug!(id, liked = recipe.liked, "toggled like");
    Some(recipe.liked)
}
