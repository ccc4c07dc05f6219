use anyhow::Result;

use plated_core::estimate::{CalorieEstimate, estimate_daily_calories, parse_measurement};
use plated_core::models::{ActivityLevel, DIETARY_RESTRICTIONS, Goal};

/// Raw profile fields as typed on the command line.
pub(crate) struct TargetInput<'a> {
    pub weight: Option<&'a str>,
    pub height: Option<&'a str>,
    pub age: Option<&'a str>,
    pub activity: &'a str,
    pub goal: &'a str,
}

pub(crate) fn estimate_from_input(input: &TargetInput<'_>) -> Result<CalorieEstimate> {
    let activity: ActivityLevel = input.activity.parse()?;
    let goal: Goal = input.goal.parse()?;
    Ok(estimate_daily_calories(
        input.weight.and_then(parse_measurement),
        input.height.and_then(parse_measurement),
        input.age.and_then(parse_measurement),
        activity,
        goal,
    ))
}

pub(crate) fn cmd_target(input: &TargetInput<'_>, json: bool) -> Result<()> {
    let estimate = estimate_from_input(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        match estimate {
            CalorieEstimate::Target { kcal } => {
                println!("Recommended intake: {kcal} kcal/day");
            }
            CalorieEstimate::Incomplete => {
                eprintln!("Incomplete: provide a positive --weight, --height and --age");
            }
        }
    }

    Ok(())
}

pub(crate) fn cmd_restrictions(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(DIETARY_RESTRICTIONS)?);
    } else {
        for r in DIETARY_RESTRICTIONS {
            println!("{:<14} {}", r.as_str(), r.label());
        }
    }
    Ok(())
}
