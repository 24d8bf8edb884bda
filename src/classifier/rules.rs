//! Ordered pattern table for utterance classification.
//!
//! Rules are tested top to bottom and the first one that both matches and
//! extracts cleanly wins. Order runs from the most distinctive patterns
//! (water quantities, lift verbs) down to the most generic ("... habit"),
//! which would otherwise shadow everything above it.
//!
//! All patterns run against the normalized (trimmed, lower-cased) text.
//! Verbs are anchored on a word boundary so they are not found inside other
//! words ("ate" in "water").

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::model::{
    ActionData, DurationUnit, ExerciseCategory, FoodData, HabitData, Meal, PersonalRecordData,
    ProposedAction, RecipeData, TimerData, WaterUnit, WeightUnit, WorkoutData,
};
use super::numbers::{
    capitalize, group_thousands, parse_count, parse_decimal, parse_step_count, pluralize,
};

// ── Confidence per category ─────────────────────────────────────────

pub const WATER_CONFIDENCE: f64 = 0.95;
pub const LIFT_CONFIDENCE: f64 = 0.9;
pub const NEW_PR_CONFIDENCE: f64 = 0.98;
pub const TIMER_CONFIDENCE: f64 = 0.95;
pub const MEDITATION_CONFIDENCE: f64 = 0.9;
pub const SLEEP_CONFIDENCE: f64 = 0.92;
pub const STEPS_CONFIDENCE: f64 = 0.95;
pub const WORKOUT_CONFIDENCE: f64 = 0.88;
pub const FOOD_CONFIDENCE: f64 = 0.75;
pub const RECIPE_CONFIDENCE: f64 = 0.85;
pub const HABIT_CONFIDENCE: f64 = 0.7;

// ── Defaults ────────────────────────────────────────────────────────

const DEFAULT_MEDITATION_MINUTES: u32 = 10;
const DEFAULT_WORKOUT_DURATION: u32 = 30;
const DEFAULT_REPS: u32 = 1;
const DEFAULT_LIFT: &str = "lift";
const DEFAULT_TIMER_TYPE: &str = "timer";
const NEW_PR_PREFIX: &str = "🎉 New PR! ";

// ── Patterns ────────────────────────────────────────────────────────

const WATER: &str = r"(?i)\b(?:drank|drink|had|log(?:ged)?)\s*([0-9]+)\s*(?:glass(?:es)?|cups?|oz|ounces?|ml|liters?|l)\s*(?:of\s*)?water";
const WATER_SIMPLE: &str = r"(?i)([0-9]+)\s*(?:glass(?:es)?|cups?)\s*(?:of\s*)?water";
const LIFT: &str = r"(?i)\b(?:bench(?:e[sd]|ing)?|squat(?:s|ted|ting)?|deadlift(?:s|ed|ing)?|press(?:e[sd]|ing)?|curl(?:s|ed|ing)?|lift(?:s|ed|ing)?)\s*([0-9]+)\s*(?:lbs?|kg|pounds?|kilos?)?\s*(?:for\s*)?([0-9]+)?\s*(?:reps?)?";
const TIMER: &str = r"(?i)\b(?:start|set|begin)\s*(?:a\s*)?([0-9]+)\s*(?:minutes?|mins?|seconds?|secs?|hours?|hrs?)?\s*(timer|countdown|amrap|emom|tabata)";
const MEDITATION: &str = r"(?i)\bmeditat(?:ed?|ing|ion)\s*(?:for\s*)?([0-9]+)?\s*(?:minutes?|mins?)?";
const SLEEP: &str = r"(?i)\b(?:slept|sleep)\s*(?:for\s*)?([0-9]+(?:\.[0-9]+)?)\s*(?:hours?|hrs?)";
const STEPS: &str = r"(?i)\b(?:walk(?:ed)?|took|did)\s*([0-9]+(?:,[0-9]{3})?)\s*steps?";
const WORKOUT: &str = r"(?i)\b(?:did|completed?|finished|log(?:ged)?)\s*(?:an?\s+)?([0-9]+)?\s*(?:minutes?|mins?|hours?|hrs?)?\s*(?:of\s+)?(workout|exercise|training|session|cardio|hiit|yoga|run|jog|walk|swim|bike|cycling)";
const FOOD: &str = r"(?i)\b(?:ate|had|log(?:ged)?|eaten)\s+(?:an?\s+)?([\w\s,]+)";
const RECIPE: &str = r"(?i)\b(?:find|search|show|get)\s+(?:me\s+)?(?:for\s+)?(?:an?\s+)?([\w\s]+?)\s*recipes?";
const HABIT: &str = r"(?i)\b(?:completed?|did|finished|log(?:ged)?)\s+(?:my\s+)?([\w\s]+?)\s*habit";

/// First lift stem in the utterance, for the exercise name ("bench press" is a bench).
static LIFT_STEM: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:bench|squat|deadlift|press|curl|lift)"));

/// Calories anywhere in the utterance.
static CALORIES: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([0-9]+)\s*(?:calories?|cals?|kcal)"));

/// Grams of protein anywhere in the utterance.
static PROTEIN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([0-9]+)\s*(?:g|grams?)\s*(?:of\s*)?protein"));

/// Trailing "[for] breakfast|lunch|dinner|snack" on a food description,
/// optionally followed by a comma-separated tail (", 650 calories"). A bare
/// "for lunch" leaves an empty description.
static MEAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?is)^(.*?)(?:(?:^|[\s,]+)for)?[\s,]+(breakfast|lunch|dinner|snack)(?:\s*,.*)?$",
    )
});

/// The rule table, in precedence order. Built once per process.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(default_rules);

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in classifier pattern must compile")
}

// ── Rule table ──────────────────────────────────────────────────────

/// Identifies a rule in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    Water,
    PersonalRecord,
    Timer,
    Meditation,
    Sleep,
    Steps,
    Workout,
    Food,
    Recipe,
    Habit,
}

impl RuleId {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::PersonalRecord => "personal_record",
            Self::Timer => "timer",
            Self::Meditation => "meditation",
            Self::Sleep => "sleep",
            Self::Steps => "steps",
            Self::Workout => "workout",
            Self::Food => "food",
            Self::Recipe => "recipe",
            Self::Habit => "habit",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds an action from a pattern's captures and the full normalized text.
/// `None` means the captures did not yield a usable action (numeric
/// overflow, empty free text) and the next rule should be tried.
type Extractor = fn(&Captures<'_>, &str) -> Option<ProposedAction>;

/// A single classification rule: one or more patterns sharing an extractor.
pub struct Rule {
    /// Which category this rule emits.
    pub id: RuleId,
    /// Alternative patterns, tried in order.
    pub patterns: Vec<Regex>,
    extract: Extractor,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl Rule {
    fn new(id: RuleId, patterns: &[&str], extract: Extractor) -> Self {
        Self {
            id,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
            extract,
        }
    }

    /// Try this rule against normalized text.
    pub fn apply(&self, text: &str) -> Option<ProposedAction> {
        self.patterns
            .iter()
            .filter_map(|re| re.captures(text))
            .find_map(|caps| (self.extract)(&caps, text))
    }
}

/// The built-in rules in precedence order.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(RuleId::Water, &[WATER, WATER_SIMPLE], extract_water),
        Rule::new(RuleId::PersonalRecord, &[LIFT], extract_personal_record),
        Rule::new(RuleId::Timer, &[TIMER], extract_timer),
        Rule::new(RuleId::Meditation, &[MEDITATION], extract_meditation),
        Rule::new(RuleId::Sleep, &[SLEEP], extract_sleep),
        Rule::new(RuleId::Steps, &[STEPS], extract_steps),
        Rule::new(RuleId::Workout, &[WORKOUT], extract_workout),
        Rule::new(RuleId::Food, &[FOOD], extract_food),
        Rule::new(RuleId::Recipe, &[RECIPE], extract_recipe),
        Rule::new(RuleId::Habit, &[HABIT], extract_habit),
    ]
}

// ── Extractors ──────────────────────────────────────────────────────

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

/// Free text trimmed of surrounding whitespace and commas; empty is `None`.
fn free_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c == ',' || c.is_whitespace());
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn contains_hours(text: &str) -> bool {
    text.contains("hour") || text.contains("hr")
}

fn extract_water(caps: &Captures<'_>, _text: &str) -> Option<ProposedAction> {
    let amount = parse_count(group(caps, 1)?)?;
    let message = format!("Log {amount} {} of water?", pluralize("glass", "es", amount));

    Some(ProposedAction::new(
        ActionData::Habit(HabitData::Water {
            amount,
            unit: WaterUnit::Glasses,
        }),
        message,
        WATER_CONFIDENCE,
    ))
}

fn extract_personal_record(caps: &Captures<'_>, text: &str) -> Option<ProposedAction> {
    let weight = parse_count(group(caps, 1)?)?;
    let reps = match group(caps, 2) {
        Some(digits) => parse_count(digits)?,
        None => DEFAULT_REPS,
    };
    let stem = LIFT_STEM
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_LIFT);
    let unit = if text.contains("kg") {
        WeightUnit::Kg
    } else {
        WeightUnit::Lbs
    };
    let is_new_pr =
        text.contains("pr") || text.contains("personal record") || text.contains("new");

    let (prefix, confidence) = if is_new_pr {
        (NEW_PR_PREFIX, NEW_PR_CONFIDENCE)
    } else {
        ("", LIFT_CONFIDENCE)
    };
    let message = format!(
        "{prefix}Log {stem} at {weight}{unit} for {reps} {}?",
        pluralize("rep", "s", reps)
    );

    Some(ProposedAction::new(
        ActionData::PersonalRecord(PersonalRecordData {
            exercise_name: capitalize(stem),
            max_weight: weight,
            max_reps: reps,
            unit,
            category: ExerciseCategory::Strength,
        }),
        message,
        confidence,
    ))
}

fn extract_timer(caps: &Captures<'_>, text: &str) -> Option<ProposedAction> {
    let duration = parse_count(group(caps, 1)?)?;
    let timer_type = group(caps, 2).unwrap_or(DEFAULT_TIMER_TYPE).to_uppercase();

    // Hours are checked last and win over seconds.
    let mut unit = DurationUnit::Minutes;
    if text.contains("sec") {
        unit = DurationUnit::Seconds;
    }
    if contains_hours(text) {
        unit = DurationUnit::Hours;
    }

    let message = format!("Start a {duration} {unit} {timer_type}?");
    Some(ProposedAction::new(
        ActionData::Timer(TimerData {
            duration,
            unit,
            timer_type,
        }),
        message,
        TIMER_CONFIDENCE,
    ))
}

fn extract_meditation(caps: &Captures<'_>, _text: &str) -> Option<ProposedAction> {
    let duration = match group(caps, 1) {
        Some(digits) => parse_count(digits)?,
        None => DEFAULT_MEDITATION_MINUTES,
    };

    Some(ProposedAction::new(
        ActionData::Habit(HabitData::Meditation {
            duration,
            unit: DurationUnit::Minutes,
        }),
        format!("Log {duration} minutes of meditation?"),
        MEDITATION_CONFIDENCE,
    ))
}

fn extract_sleep(caps: &Captures<'_>, _text: &str) -> Option<ProposedAction> {
    let hours = parse_decimal(group(caps, 1)?)?;

    Some(ProposedAction::new(
        ActionData::Habit(HabitData::Sleep {
            duration: hours,
            unit: DurationUnit::Hours,
        }),
        format!("Log {hours} hours of sleep?"),
        SLEEP_CONFIDENCE,
    ))
}

fn extract_steps(caps: &Captures<'_>, _text: &str) -> Option<ProposedAction> {
    let value = parse_step_count(group(caps, 1)?)?;

    Some(ProposedAction::new(
        ActionData::Habit(HabitData::Steps { value }),
        format!("Log {} steps?", group_thousands(value)),
        STEPS_CONFIDENCE,
    ))
}

fn extract_workout(caps: &Captures<'_>, text: &str) -> Option<ProposedAction> {
    let duration = match group(caps, 1) {
        Some(digits) => parse_count(digits)?,
        None => DEFAULT_WORKOUT_DURATION,
    };
    let workout_type = group(caps, 2)?.to_string();
    let unit = if contains_hours(text) {
        DurationUnit::Hours
    } else {
        DurationUnit::Minutes
    };

    let message = format!("Log a {duration} {} {workout_type}?", unit.singular());
    Some(ProposedAction::new(
        ActionData::Workout(WorkoutData {
            workout_type,
            duration,
            unit,
        }),
        message,
        WORKOUT_CONFIDENCE,
    ))
}

fn extract_food(caps: &Captures<'_>, text: &str) -> Option<ProposedAction> {
    let raw = free_text(group(caps, 1)?)?;
    let split = MEAL_SUFFIX.captures(&raw).map(|suffix| {
        let meal = group(&suffix, 2)
            .and_then(|m| m.parse::<Meal>().ok())
            .unwrap_or_default();
        (group(&suffix, 1).and_then(free_text), meal)
    });
    let (description, meal) = match split {
        Some((description, meal)) => (description?, meal),
        None => (raw, Meal::default()),
    };

    // Nutrients come from the whole utterance, not just the description.
    let calories = CALORIES
        .captures(text)
        .and_then(|c| group(&c, 1).and_then(parse_count));
    let protein = PROTEIN
        .captures(text)
        .and_then(|c| group(&c, 1).and_then(parse_count));

    let message = format!("Log \"{description}\" as {meal}?");
    Some(ProposedAction::new(
        ActionData::Food(FoodData {
            description,
            meal,
            calories,
            protein,
        }),
        message,
        FOOD_CONFIDENCE,
    ))
}

fn extract_recipe(caps: &Captures<'_>, _text: &str) -> Option<ProposedAction> {
    let query = free_text(group(caps, 1)?)?;
    // "get me a recipe" names no dish
    if matches!(query.as_str(), "a" | "an") {
        return None;
    }
    let message = format!("Search for {query} recipes?");

    Some(ProposedAction::new(
        ActionData::Recipe(RecipeData { query }),
        message,
        RECIPE_CONFIDENCE,
    ))
}

fn extract_habit(caps: &Captures<'_>, _text: &str) -> Option<ProposedAction> {
    let name = free_text(group(caps, 1)?)?;
    let message = format!("Mark \"{name}\" habit as complete?");

    Some(ProposedAction::new(
        ActionData::Habit(HabitData::Custom {
            name,
            completed: true,
        }),
        message,
        HABIT_CONFIDENCE,
    ))
}
