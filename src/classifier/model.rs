//! Proposed action data model: the classifier's output types.
//!
//! `ActionData` is a tagged union: the `kind` tag and the `data` payload are
//! one value, so a payload can never be attached to the wrong kind. On the
//! wire it serializes as `{ "kind": ..., "data": { ... } }`, flattened into
//! the surrounding `ProposedAction`.

use serde::{Deserialize, Serialize};

/// Which category an utterance was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Workout,
    Food,
    Habit,
    PersonalRecord,
    Timer,
    Recipe,
    Unknown,
}

impl ActionKind {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Food => "food",
            Self::Habit => "habit",
            Self::PersonalRecord => "personal_record",
            Self::Timer => "timer",
            Self::Recipe => "recipe",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workout" => Ok(Self::Workout),
            "food" => Ok(Self::Food),
            "habit" => Ok(Self::Habit),
            "personal_record" => Ok(Self::PersonalRecord),
            "timer" => Ok(Self::Timer),
            "recipe" => Ok(Self::Recipe),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown action kind: {}", s)),
        }
    }
}

// ── Units ───────────────────────────────────────────────────────────

/// Time unit for timers, workouts and duration-based habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    /// Singular form ("minute"), used in "a 30 minute run".
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Seconds => "second",
            Self::Minutes => "minute",
            Self::Hours => "hour",
        }
    }
}

impl std::fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds => write!(f, "seconds"),
            Self::Minutes => write!(f, "minutes"),
            Self::Hours => write!(f, "hours"),
        }
    }
}

/// Weight unit for lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Lbs,
    Kg,
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lbs => write!(f, "lbs"),
            Self::Kg => write!(f, "kg"),
        }
    }
}

/// Water is always tracked in glasses, whatever unit the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterUnit {
    #[default]
    Glasses,
}

/// Meal slot for a food log. `Meal` is the catch-all when none was named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    #[default]
    Meal,
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakfast => write!(f, "breakfast"),
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Snack => write!(f, "snack"),
            Self::Meal => write!(f, "meal"),
        }
    }
}

impl std::str::FromStr for Meal {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            "meal" => Ok(Self::Meal),
            _ => Err(format!("Unknown meal: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    #[default]
    Strength,
}

// ── Payloads ────────────────────────────────────────────────────────

/// A logged workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutData {
    /// Workout keyword as typed ("run", "yoga", "hiit", ...).
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration: u32,
    pub unit: DurationUnit,
}

/// A food log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodData {
    pub description: String,
    pub meal: Meal,
    /// Calories mentioned anywhere in the utterance.
    pub calories: Option<u32>,
    /// Grams of protein mentioned anywhere in the utterance.
    pub protein: Option<u32>,
}

/// Habit payloads, discriminated by `habitType` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "habitType", rename_all = "snake_case")]
pub enum HabitData {
    Water { amount: u32, unit: WaterUnit },
    Meditation { duration: u32, unit: DurationUnit },
    Sleep { duration: f64, unit: DurationUnit },
    Steps { value: u64 },
    /// Any other named habit, marked complete.
    Custom { name: String, completed: bool },
}

/// A lift that may be a personal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecordData {
    /// Capitalised display name ("Bench", "Deadlift").
    pub exercise_name: String,
    pub max_weight: u32,
    pub max_reps: u32,
    pub unit: WeightUnit,
    pub category: ExerciseCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerData {
    pub duration: u32,
    pub unit: DurationUnit,
    /// Upper-cased timer keyword ("TIMER", "AMRAP", "EMOM", ...).
    pub timer_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeData {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownData {
    /// The caller's input, untouched (not trimmed, not lower-cased).
    pub raw_input: String,
}

/// Kind-tagged payload of a proposed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ActionData {
    Workout(WorkoutData),
    Food(FoodData),
    Habit(HabitData),
    PersonalRecord(PersonalRecordData),
    Timer(TimerData),
    Recipe(RecipeData),
    Unknown(UnknownData),
}

impl ActionData {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Workout(_) => ActionKind::Workout,
            Self::Food(_) => ActionKind::Food,
            Self::Habit(_) => ActionKind::Habit,
            Self::PersonalRecord(_) => ActionKind::PersonalRecord,
            Self::Timer(_) => ActionKind::Timer,
            Self::Recipe(_) => ActionKind::Recipe,
            Self::Unknown(_) => ActionKind::Unknown,
        }
    }
}

// ── Proposed action ─────────────────────────────────────────────────

/// Help text returned with every `unknown` action.
pub const HELP_MESSAGE: &str = "I'm not sure what you'd like to do. Try:\n\
• \"Log 8 glasses of water\"\n\
• \"Benched 225 for 5 reps\"\n\
• \"Did a 30 minute run\"\n\
• \"Ate chicken salad for lunch\"";

/// The classifier's single output: a best-guess action awaiting the user's
/// yes/no confirmation.
///
/// Built once per call and never mutated; fields are only readable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAction {
    #[serde(flatten)]
    data: ActionData,
    confirmation_message: String,
    confidence: f64,
}

impl ProposedAction {
    /// Create a proposed action. Confidence is clamped into `[0, 1]`.
    pub fn new(data: ActionData, confirmation_message: impl Into<String>, confidence: f64) -> Self {
        Self {
            data,
            confirmation_message: confirmation_message.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The fallback action for input no category matched.
    pub fn unknown(raw_input: impl Into<String>) -> Self {
        Self::new(
            ActionData::Unknown(UnknownData {
                raw_input: raw_input.into(),
            }),
            HELP_MESSAGE,
            0.0,
        )
    }

    pub fn kind(&self) -> ActionKind {
        self.data.kind()
    }

    pub fn data(&self) -> &ActionData {
        &self.data
    }

    pub fn confirmation_message(&self) -> &str {
        &self.confirmation_message
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.data, ActionData::Unknown(_))
    }

    pub fn into_data(self) -> ActionData {
        self.data
    }
}
