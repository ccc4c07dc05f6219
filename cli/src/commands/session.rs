use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

use plated_core::models::{
    ActivityLevel, CalorieRange, DIETARY_RESTRICTIONS, DietaryRestriction, Goal, Tab, TimeBucket,
};
use plated_core::session::Session;

use super::helpers::{render_profile, render_recipe_detail, render_recipe_table, render_shopping_list};

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true, name = "session")]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// List recipes matching the current filter
    List,
    /// Show a recipe with its ingredients
    Show { id: i64 },
    /// Like or unlike a recipe
    Like { id: i64 },
    /// List liked recipes
    Liked,
    /// Set the calorie range (snapped to 100-800, step 50)
    Range { low: u32, high: u32 },
    /// Toggle a time tag: quick, medium, long
    Tag { tag: TimeBucket },
    /// Clear all time tags
    ClearTags,
    /// Show the current filter
    Filter,
    /// Add a recipe's ingredients to the shopping list
    Add { id: i64 },
    /// Remove a shopping list item by position
    Remove { index: usize },
    /// Tick or untick a shopping list item by position
    Check { index: usize },
    /// Show the shopping list
    Shop,
    /// Print the shopping list as plain text
    Export,
    /// Empty the shopping list
    ClearShop,
    /// Show or switch the active tab
    Tab { tab: Option<Tab> },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },
    /// Show the recommended daily calorie intake
    Target,
    /// Show session statistics
    Stats,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Set the display name
    Name {
        #[arg(trailing_var_arg = true, num_args = 0..)]
        name: Vec<String>,
    },
    /// Set age in years (blank clears)
    Age { value: Option<String> },
    /// Set weight in kg (blank clears)
    Weight { value: Option<String> },
    /// Set height in cm (blank clears)
    Height { value: Option<String> },
    /// Set goal: lose, maintain, gain
    Goal { goal: Goal },
    /// Set activity level: low, moderate, high
    Activity { activity: ActivityLevel },
    /// Toggle a dietary restriction
    Restrict { restriction: DietaryRestriction },
}

enum Flow {
    Continue,
    Quit,
}

/// Read commands line by line until `quit` or end of input.
pub(crate) fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<()> {
    if interactive {
        writeln!(out, "plated session. Type `help` for commands, `quit` to leave.")?;
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if !words.is_empty() {
            match SessionLine::try_parse_from(words.iter().copied()) {
                Ok(parsed) => {
                    if let Flow::Quit = execute(session, parsed.command, out)? {
                        return Ok(());
                    }
                }
                Err(e) => write!(out, "{}", e.render())?,
            }
        }
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_lines)]
fn execute<W: Write>(session: &mut Session, command: SessionCommand, out: &mut W) -> Result<Flow> {
    match command {
        SessionCommand::List => {
            let visible = session.visible_recipes();
            if visible.is_empty() {
                writeln!(out, "No recipes match the current filter")?;
            } else {
                writeln!(out, "{}", render_recipe_table(&visible))?;
            }
        }
        SessionCommand::Show { id } => match session.recipe(id) {
            Some(recipe) => write!(out, "{}", render_recipe_detail(recipe))?,
            None => writeln!(out, "Recipe {id} not found")?,
        },
        SessionCommand::Like { id } => match session.toggle_like(id) {
            Some(true) => writeln!(out, "Liked recipe {id}")?,
            Some(false) => writeln!(out, "Unliked recipe {id}")?,
            None => writeln!(out, "Recipe {id} not found")?,
        },
        SessionCommand::Liked => {
            let liked = session.liked_recipes();
            if liked.is_empty() {
                writeln!(out, "No liked recipes yet")?;
            } else {
                writeln!(out, "{}", render_recipe_table(&liked))?;
            }
        }
        SessionCommand::Range { low, high } => {
            let range = CalorieRange::from_slider(low, high);
            session.set_calorie_range(range);
            writeln!(out, "Calories: {range}")?;
        }
        SessionCommand::Tag { tag } => {
            let state = if session.toggle_time_tag(tag) {
                "on"
            } else {
                "off"
            };
            writeln!(out, "{} ({}): {state}", tag.as_str(), tag.label())?;
        }
        SessionCommand::ClearTags => {
            session.clear_time_tags();
            writeln!(out, "Time tags cleared")?;
        }
        SessionCommand::Filter => {
            let criteria = session.criteria();
            let tags: Vec<&str> = criteria.time_tags.iter().map(|t| t.as_str()).collect();
            let tags = if tags.is_empty() {
                "any".to_string()
            } else {
                tags.join(", ")
            };
            writeln!(out, "Calories: {}  |  Time: {tags}", criteria.calories)?;
        }
        SessionCommand::Add { id } => match session.add_recipe_to_shopping_list(id) {
            Some(added) => writeln!(
                out,
                "Added {added} item(s), {} in list",
                session.shopping_list().len()
            )?,
            None => writeln!(out, "Recipe {id} not found")?,
        },
        SessionCommand::Remove { index } => match session.remove_shopping_item(index) {
            Some(item) => writeln!(out, "Removed {item}")?,
            None => writeln!(out, "No item at position {index}")?,
        },
        SessionCommand::Check { index } => match session.toggle_shopping_item(index) {
            Some(true) => writeln!(out, "Checked {}", session.shopping_list().items()[index])?,
            Some(false) => writeln!(out, "Unchecked {}", session.shopping_list().items()[index])?,
            None => writeln!(out, "No item at position {index}")?,
        },
        SessionCommand::Shop => write!(out, "{}", render_shopping_list(session.shopping_list()))?,
        SessionCommand::Export => write!(out, "{}", session.shopping_list().export_text())?,
        SessionCommand::ClearShop => {
            session.clear_shopping_list();
            writeln!(out, "Shopping list cleared")?;
        }
        SessionCommand::Tab { tab } => {
            if let Some(tab) = tab {
                session.set_active_tab(tab);
            }
            writeln!(out, "Tab: {}", session.active_tab().as_str())?;
        }
        SessionCommand::Profile { command } => {
            if let Some(command) = command {
                update_profile(session, command, out)?;
            } else {
                write!(
                    out,
                    "{}",
                    render_profile(session.profile(), session.calorie_target())
                )?;
            }
        }
        SessionCommand::Target => writeln!(out, "Daily target: {}", session.calorie_target())?,
        SessionCommand::Stats => {
            let stats = session.stats();
            writeln!(out, "Recipes:        {}", stats.recipes_total)?;
            writeln!(out, "Matching:       {}", stats.recipes_visible)?;
            writeln!(out, "Liked:          {}", stats.liked)?;
            writeln!(
                out,
                "Shopping items: {} ({} checked)",
                stats.shopping_items, stats.shopping_checked
            )?;
            writeln!(out, "Daily target:   {}", stats.calorie_target)?;
        }
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn update_profile<W: Write>(session: &mut Session, command: ProfileCommand, out: &mut W) -> Result<()> {
    let profile = session.profile_mut();
    match command {
        ProfileCommand::Name { name } => profile.name = name.join(" "),
        ProfileCommand::Age { value } => profile.age = value.unwrap_or_default(),
        ProfileCommand::Weight { value } => profile.weight_kg = value.unwrap_or_default(),
        ProfileCommand::Height { value } => profile.height_cm = value.unwrap_or_default(),
        ProfileCommand::Goal { goal } => profile.goal = goal,
        ProfileCommand::Activity { activity } => profile.activity = activity,
        ProfileCommand::Restrict { restriction } => {
            let state = if profile.toggle_restriction(restriction) {
                "on"
            } else {
                "off"
            };
            writeln!(out, "{}: {state}", restriction.label())?;
            let selected = profile.restrictions.len();
            writeln!(out, "{selected} of {} restrictions selected", DIETARY_RESTRICTIONS.len())?;
        }
    }
    writeln!(out, "Daily target: {}", session.calorie_target())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run_session(session, script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_filter_and_like() {
        let mut session = Session::default();
        let out = run(&mut session, "tag quick\nrange 100 300\nlike 3\nlike 42\nfilter\n");
        assert!(out.contains("quick (5-15 min): on"));
        assert!(out.contains("Calories: 100 - 300 kcal"));
        assert!(out.contains("Liked recipe 3"));
        assert!(out.contains("Recipe 42 not found"));
        assert!(out.contains("Time: quick"));

        let ids: Vec<i64> = session.visible_recipes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
        assert!(session.recipe(3).unwrap().liked);
    }

    #[test]
    fn test_session_shopping_list() {
        let mut session = Session::default();
        let out = run(&mut session, "add 3\nadd 5\nremove 0\nremove 50\nexport\n");
        assert!(out.contains("Added 4 item(s), 4 in list"));
        assert!(out.contains("Added 4 item(s), 8 in list"));
        assert!(out.contains("Removed овсянка 50г"));
        assert!(out.contains("No item at position 50"));
        assert!(out.contains("молоко 200мл\nягоды 100г\n"));
        assert_eq!(session.shopping_list().len(), 7);
    }

    #[test]
    fn test_session_profile_target() {
        let mut session = Session::default();
        let out = run(
            &mut session,
            "profile name Anna Petrova\nprofile weight 70\nprofile height 175\ntarget\nprofile age 30\nprofile goal lose\nprofile restrict vegan\n",
        );
        assert!(out.contains("Daily target: incomplete"));
        assert!(out.contains("Daily target: 2172 kcal/day"));
        assert!(out.contains("Vegan: on"));
        assert!(out.contains("1 of 8 restrictions selected"));
        assert_eq!(session.profile().name, "Anna Petrova");
        assert_eq!(session.profile().goal, Goal::Lose);
    }

    #[test]
    fn test_session_profile_keeps_raw_text() {
        let mut session = Session::default();
        let out = run(
            &mut session,
            "profile weight 70\nprofile height 175\nprofile age abc\nprofile\nprofile age\n",
        );
        assert_eq!(session.profile().weight_kg, "70");
        assert!(out.contains("Age:          abc"));
        assert!(out.contains("Daily target: incomplete"));
        assert!(session.profile().age.is_empty());
    }

    #[test]
    fn test_session_check_shopping_items() {
        let mut session = Session::default();
        let out = run(&mut session, "add 3\ncheck 1\ncheck 9\nshop\ncheck 1\n");
        assert!(out.contains("Checked молоко 200мл"));
        assert!(out.contains("No item at position 9"));
        assert!(out.contains("   1. [x] молоко 200мл"));
        assert!(out.contains("Unchecked молоко 200мл"));
        assert_eq!(session.shopping_list().checked_count(), 0);
    }

    #[test]
    fn test_session_quit_stops_reading() {
        let mut session = Session::default();
        let out = run(&mut session, "like 1\nquit\nlike 2\n");
        assert!(out.contains("Liked recipe 1"));
        assert!(!out.contains("Liked recipe 2"));
        assert!(!session.recipe(2).unwrap().liked);
    }

    #[test]
    fn test_session_reports_parse_errors_and_continues() {
        let mut session = Session::default();
        let out = run(&mut session, "tag slow\nfrobnicate\n\ntab shopping\n");
        assert!(out.contains("Invalid time tag 'slow'"));
        assert!(out.contains("frobnicate"));
        assert!(out.contains("Tab: shopping"));
        assert_eq!(session.active_tab(), Tab::Shopping);
    }

    #[test]
    fn test_session_stats() {
        let mut session = Session::default();
        let out = run(&mut session, "like 1\nadd 1\nstats\n");
        assert!(out.contains("Recipes:        6"));
        assert!(out.contains("Matching:       5"));
        assert!(out.contains("Liked:          1"));
        assert!(out.contains("Shopping items: 6 (0 checked)"));
        assert!(out.contains("Daily target:   incomplete"));
    }
}
