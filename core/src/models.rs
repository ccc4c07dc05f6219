use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Lowest value the calorie slider can take.
pub const CALORIE_SLIDER_MIN: u32 = 100;
/// Highest value the calorie slider can take.
pub const CALORIE_SLIDER_MAX: u32 = 800;
pub const CALORIE_SLIDER_STEP: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => bail!("Invalid difficulty '{s}'. Must be one of: easy, medium, hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub calories: u32,
    /// Preparation time in minutes.
    pub time: u32,
    pub difficulty: Difficulty,
    pub image: String,
    /// Free-text "item + quantity" strings, in recipe order.
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub liked: bool,
}

/// Preparation-time class used for tag filtering.
///
/// The buckets partition the positive integers: `quick` is up to 15 minutes,
/// `medium` is 16 to 30, `long` is anything above 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Quick,
    Medium,
    Long,
}

pub const TIME_BUCKETS: &[TimeBucket] = &[TimeBucket::Quick, TimeBucket::Medium, TimeBucket::Long];

impl TimeBucket {
    pub fn of(minutes: u32) -> TimeBucket {
        if minutes <= 15 {
            TimeBucket::Quick
        } else if minutes <= 30 {
            TimeBucket::Medium
        } else {
            TimeBucket::Long
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeBucket::Quick => "quick",
            TimeBucket::Medium => "medium",
            TimeBucket::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::Quick => "5-15 min",
            TimeBucket::Medium => "30 min",
            TimeBucket::Long => "weekend",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(TimeBucket::Quick),
            "medium" => Ok(TimeBucket::Medium),
            "long" => Ok(TimeBucket::Long),
            _ => bail!("Invalid time tag '{s}'. Must be one of: quick, medium, long"),
        }
    }
}

/// Inclusive calorie interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieRange {
    pub low: u32,
    pub high: u32,
}

impl Default for CalorieRange {
    fn default() -> Self {
        CalorieRange {
            low: 200,
            high: 600,
        }
    }
}

impl CalorieRange {
    pub fn new(low: u32, high: u32) -> Self {
        CalorieRange { low, high }
    }

    /// An inverted range contains nothing.
    pub fn contains(self, calories: u32) -> bool {
        self.low <= calories && calories <= self.high
    }

    /// Snap both ends to the slider grid and order them.
    pub fn from_slider(low: u32, high: u32) -> Self {
        let (a, b) = (snap_to_slider(low), snap_to_slider(high));
        CalorieRange {
            low: a.min(b),
            high: a.max(b),
        }
    }
}

impl fmt::Display for CalorieRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} kcal", self.low, self.high)
    }
}

fn snap_to_slider(value: u32) -> u32 {
    let clamped = value.clamp(CALORIE_SLIDER_MIN, CALORIE_SLIDER_MAX);
    let offset = clamped - CALORIE_SLIDER_MIN;
    let steps = (offset + CALORIE_SLIDER_STEP / 2) / CALORIE_SLIDER_STEP;
    (CALORIE_SLIDER_MIN + steps * CALORIE_SLIDER_STEP).min(CALORIE_SLIDER_MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }
}

impl FromStr for Goal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            _ => bail!("Invalid goal '{s}'. Must be one of: lose, maintain, gain"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            _ => bail!("Invalid activity level '{s}'. Must be one of: low, moderate, high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    LactoseFree,
    NutFree,
    LowCarb,
    LowSugar,
    Halal,
}

pub const DIETARY_RESTRICTIONS: &[DietaryRestriction] = &[
    DietaryRestriction::Vegetarian,
    DietaryRestriction::Vegan,
    DietaryRestriction::GlutenFree,
    DietaryRestriction::LactoseFree,
    DietaryRestriction::NutFree,
    DietaryRestriction::LowCarb,
    DietaryRestriction::LowSugar,
    DietaryRestriction::Halal,
];

impl DietaryRestriction {
    pub fn as_str(self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "vegetarian",
            DietaryRestriction::Vegan => "vegan",
            DietaryRestriction::GlutenFree => "gluten_free",
            DietaryRestriction::LactoseFree => "lactose_free",
            DietaryRestriction::NutFree => "nut_free",
            DietaryRestriction::LowCarb => "low_carb",
            DietaryRestriction::LowSugar => "low_sugar",
            DietaryRestriction::Halal => "halal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Gluten-free",
            DietaryRestriction::LactoseFree => "Lactose-free",
            DietaryRestriction::NutFree => "Nut-free",
            DietaryRestriction::LowCarb => "Low-carb",
            DietaryRestriction::LowSugar => "Low-sugar",
            DietaryRestriction::Halal => "Halal",
        }
    }
}

impl FromStr for DietaryRestriction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        DIETARY_RESTRICTIONS
            .iter()
            .copied()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = DIETARY_RESTRICTIONS.iter().map(|r| r.as_str()).collect();
                anyhow::anyhow!(
                    "Invalid dietary restriction '{s}'. Must be one of: {}",
                    names.join(", ")
                )
            })
    }
}

/// Personal profile as filled in on the profile tab.
///
/// Age, weight and height keep the text as typed, blank when unset.
/// They are only read as numbers when the calorie target is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: String,
    pub weight_kg: String,
    pub height_cm: String,
    pub goal: Goal,
    pub activity: ActivityLevel,
    pub restrictions: BTreeSet<DietaryRestriction>,
}

impl Profile {
    /// Flip membership of `restriction`; returns whether it is now selected.
    pub fn toggle_restriction(&mut self, restriction: DietaryRestriction) -> bool {
        if self.restrictions.remove(&restriction) {
            false
        } else {
            self.restrictions.insert(restriction);
            true
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Generator,
    Shopping,
    Profile,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Generator => "generator",
            Tab::Shopping => "shopping",
            Tab::Profile => "profile",
        }
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Tab::Home),
            "generator" | "recipes" => Ok(Tab::Generator),
            "shopping" => Ok(Tab::Shopping),
            "profile" => Ok(Tab::Profile),
            _ => bail!("Invalid tab '{s}'. Must be one of: home, generator, shopping, profile"),
        }
    }
}

pub fn validate_recipe(recipe: &Recipe) -> Result<()> {
    if recipe.name.trim().is_empty() {
        bail!("Recipe {} has an empty name", recipe.id);
    }
    if recipe.calories == 0 {
        bail!("Recipe '{}' must have calories greater than 0", recipe.name);
    }
    if recipe.time == 0 {
        bail!(
            "Recipe '{}' must have a preparation time greater than 0",
            recipe.name
        );
    }
    Ok(())
}
