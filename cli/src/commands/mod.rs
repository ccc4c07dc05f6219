mod helpers;
mod recipes;
mod session;
mod shopping;
mod target;

use anyhow::Result;
use std::io::{self, IsTerminal};
use std::path::Path;

use plated_core::catalog;
use plated_core::models::{CalorieRange, Recipe};
use plated_core::session::Session;

pub(crate) use recipes::{cmd_recipes, cmd_show};
pub(crate) use shopping::cmd_shop;
pub(crate) use target::{TargetInput, cmd_restrictions, cmd_target};

/// Load the recipe catalog once at start-up: from `path` if given, otherwise built in.
pub(crate) fn load_recipes(path: Option<&Path>) -> Result<Vec<Recipe>> {
    match path {
        Some(path) => catalog::load(path),
        None => Ok(catalog::builtin()),
    }
}

/// Run an interactive session on stdin/stdout for the lifetime of the process.
pub(crate) fn cmd_session(recipes: Vec<Recipe>, range: CalorieRange) -> Result<()> {
    let mut session = Session::new(recipes).with_calorie_range(range);
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout();
    session::run_session(&mut session, stdin.lock(), &mut stdout, interactive)?;
    tracing::debug!(stats = ?session.stats(), "session ended");
    Ok(())
}
