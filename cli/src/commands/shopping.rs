use anyhow::{Result, bail};
use std::process;

use plated_core::catalog;
use plated_core::models::Recipe;
use plated_core::shopping::ShoppingList;

use super::helpers::{json_error, render_shopping_list};

/// Build a shopping list from the given recipes, in the order given.
pub(crate) fn build_shopping_list(recipes: &[Recipe], ids: &[i64]) -> Result<ShoppingList> {
    let mut list = ShoppingList::new();
    for &id in ids {
        let Some(recipe) = catalog::find(recipes, id) else {
            bail!("Recipe {id} not found");
        };
        list.add_recipe(recipe);
    }
    Ok(list)
}

pub(crate) fn cmd_shop(recipes: &[Recipe], ids: &[i64], export: bool, json: bool) -> Result<()> {
    let list = match build_shopping_list(recipes, ids) {
        Ok(list) => list,
        Err(e) => {
            if json {
                println!("{}", json_error(&e.to_string()));
            } else {
                eprintln!("{e}");
            }
            process::exit(2);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if export {
        print!("{}", list.export_text());
    } else {
        print!("{}", render_shopping_list(&list));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_shopping_list_dedups_across_recipes() {
        let recipes = catalog::builtin();
        // Chicken then borscht: "морковь 1шт" appears in both
        let list = build_shopping_list(&recipes, &[4, 6]).unwrap();
        assert_eq!(list.len(), 9);
        assert_eq!(list.items()[0], "куриная грудка 150г");
        assert_eq!(
            list.items().iter().filter(|i| *i == "морковь 1шт").count(),
            1
        );
    }

    #[test]
    fn test_build_shopping_list_repeated_id() {
        let recipes = catalog::builtin();
        let list = build_shopping_list(&recipes, &[3, 3]).unwrap();
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_build_shopping_list_unknown_recipe() {
        let recipes = catalog::builtin();
        let err = build_shopping_list(&recipes, &[1, 77]).unwrap_err();
        assert_eq!(err.to_string(), "Recipe 77 not found");
    }
}
