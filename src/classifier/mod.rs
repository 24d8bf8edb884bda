//! Natural-language fitness-action classifier.
//!
//! `classify` turns one short utterance ("benched 225 for 5 reps", "drank 3
//! glasses of water") into a single [`ProposedAction`]. It is pure and
//! stateless: the rule table is immutable and built once, and every input,
//! including the empty string, yields a well-formed action. Anything no rule
//! recognises comes back as `unknown` with confidence 0 and a help message.

pub mod model;
pub mod numbers;
pub mod rules;

use tracing::debug;

pub use model::{
    ActionData, ActionKind, DurationUnit, ExerciseCategory, FoodData, HELP_MESSAGE, HabitData,
    Meal, PersonalRecordData, ProposedAction, RecipeData, TimerData, UnknownData, WaterUnit,
    WeightUnit, WorkoutData,
};
pub use rules::{RULES, Rule, RuleId};

/// Trim and lower-case an utterance before matching.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Classify a single utterance into a proposed action.
///
/// Rules are tested in fixed precedence order and the first that matches
/// wins; there is no scoring between categories.
pub fn classify(input: &str) -> ProposedAction {
    let text = normalize(input);

    for rule in RULES.iter() {
        if let Some(action) = rule.apply(&text) {
            debug!(
                rule = %rule.id,
                kind = %action.kind(),
                confidence = action.confidence(),
                "Utterance matched rule"
            );
            return action;
        }
    }

    debug!(len = input.len(), "No rule matched, proposing unknown action");
    ProposedAction::unknown(input)
}

/// The rule that would classify `input`, if any.
pub fn matching_rule(input: &str) -> Option<RuleId> {
    let text = normalize(input);
    RULES
        .iter()
        .find(|rule| rule.apply(&text).is_some())
        .map(|rule| rule.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_unknown() {
        let action = classify("");
        assert_eq!(action.kind(), ActionKind::Unknown);
        assert_eq!(action.confidence(), 0.0);
        assert_eq!(
            action.data(),
            &ActionData::Unknown(UnknownData {
                raw_input: String::new()
            })
        );
        assert_eq!(action.confirmation_message(), HELP_MESSAGE);
    }

    #[test]
    fn unknown_keeps_raw_input_verbatim() {
        let action = classify("  What's The Weather?  ");
        assert_eq!(
            action.data(),
            &ActionData::Unknown(UnknownData {
                raw_input: "  What's The Weather?  ".into()
            })
        );
    }

    #[test]
    fn water_glasses() {
        let action = classify("Drank 3 glasses of water");
        assert_eq!(action.kind(), ActionKind::Habit);
        assert_eq!(
            action.data(),
            &ActionData::Habit(HabitData::Water {
                amount: 3,
                unit: WaterUnit::Glasses
            })
        );
        assert_eq!(action.confirmation_message(), "Log 3 glasses of water?");
        assert_eq!(action.confidence(), 0.95);
    }

    #[test]
    fn new_pr_bench() {
        let action = classify("benched 225 for 5 reps, new pr!");
        assert_eq!(action.kind(), ActionKind::PersonalRecord);
        assert_eq!(
            action.data(),
            &ActionData::PersonalRecord(PersonalRecordData {
                exercise_name: "Bench".into(),
                max_weight: 225,
                max_reps: 5,
                unit: WeightUnit::Lbs,
                category: ExerciseCategory::Strength,
            })
        );
        assert_eq!(action.confidence(), 0.98);
        assert!(action.confirmation_message().contains("🎉 New PR!"));
        assert_eq!(
            action.confirmation_message(),
            "🎉 New PR! Log bench at 225lbs for 5 reps?"
        );
    }

    #[test]
    fn plain_lift_is_not_a_new_pr() {
        let action = classify("Benched 225 for 5 reps");
        assert_eq!(action.confidence(), 0.9);
        assert_eq!(action.confirmation_message(), "Log bench at 225lbs for 5 reps?");
    }

    #[test]
    fn single_rep_is_singular() {
        let action = classify("curled 50 lbs");
        assert_eq!(action.confirmation_message(), "Log curl at 50lbs for 1 rep?");
    }

    #[test]
    fn timer_type_upper_cased() {
        let action = classify("start a 20 minute amrap");
        assert_eq!(
            action.data(),
            &ActionData::Timer(TimerData {
                duration: 20,
                unit: DurationUnit::Minutes,
                timer_type: "AMRAP".into(),
            })
        );
        assert_eq!(action.confirmation_message(), "Start a 20 minutes AMRAP?");
        assert_eq!(action.confidence(), 0.95);
    }

    #[test]
    fn meditation_with_duration() {
        let action = classify("Meditated for 15 minutes");
        assert_eq!(
            action.data(),
            &ActionData::Habit(HabitData::Meditation {
                duration: 15,
                unit: DurationUnit::Minutes
            })
        );
        assert_eq!(action.confidence(), 0.9);
    }

    #[test]
    fn sleep_decimal_hours() {
        let action = classify("slept for 7.5 hours");
        assert_eq!(action.kind(), ActionKind::Habit);
        assert_eq!(
            action.data(),
            &ActionData::Habit(HabitData::Sleep {
                duration: 7.5,
                unit: DurationUnit::Hours
            })
        );
        assert_eq!(action.confidence(), 0.92);
        assert_eq!(action.confirmation_message(), "Log 7.5 hours of sleep?");
    }

    #[test]
    fn steps_thousands_separator() {
        let action = classify("walked 10,000 steps");
        assert_eq!(
            action.data(),
            &ActionData::Habit(HabitData::Steps { value: 10_000 })
        );
        assert_eq!(action.confirmation_message(), "Log 10,000 steps?");
        assert_eq!(action.confidence(), 0.95);
    }

    #[test]
    fn workout_defaults() {
        let action = classify("did a workout");
        assert_eq!(
            action.data(),
            &ActionData::Workout(WorkoutData {
                workout_type: "workout".into(),
                duration: 30,
                unit: DurationUnit::Minutes,
            })
        );
        assert_eq!(action.confidence(), 0.88);
        assert_eq!(action.confirmation_message(), "Log a 30 minute workout?");
    }

    #[test]
    fn workout_beats_generic_habit() {
        let action = classify("completed a 30 minute run");
        assert_eq!(action.kind(), ActionKind::Workout);
        assert_eq!(matching_rule("completed a 30 minute run"), Some(RuleId::Workout));
    }

    #[test]
    fn lift_beats_workout() {
        assert_eq!(matching_rule("benched 225 for 5 pr"), Some(RuleId::PersonalRecord));
    }

    #[test]
    fn food_with_meal_and_nutrients() {
        let action = classify("Ate grilled chicken and rice for dinner, 650 calories");
        assert_eq!(action.kind(), ActionKind::Food);
        match action.data() {
            ActionData::Food(food) => {
                assert_eq!(food.description, "grilled chicken and rice");
                assert_eq!(food.meal, Meal::Dinner);
                assert_eq!(food.calories, Some(650));
                assert_eq!(food.protein, None);
            }
            other => panic!("Expected food, got {:?}", other),
        }
        assert_eq!(action.confidence(), 0.75);
    }

    #[test]
    fn recipe_search() {
        let action = classify("Show me a chicken curry recipe");
        assert_eq!(
            action.data(),
            &ActionData::Recipe(RecipeData {
                query: "chicken curry".into()
            })
        );
        assert_eq!(action.confidence(), 0.85);
    }

    #[test]
    fn habit_without_quantity_is_generic_habit_not_food() {
        let action = classify("completed my water habit");
        assert_eq!(
            action.data(),
            &ActionData::Habit(HabitData::Custom {
                name: "water".into(),
                completed: true
            })
        );
        assert_eq!(action.confirmation_message(), "Mark \"water\" habit as complete?");
        assert_eq!(action.confidence(), 0.7);
    }

    #[test]
    fn habit_with_quantity_is_water() {
        let action = classify("completed my water habit, drank 2 glasses of water");
        assert_eq!(
            action.data(),
            &ActionData::Habit(HabitData::Water {
                amount: 2,
                unit: WaterUnit::Glasses
            })
        );
    }

    #[test]
    fn help_examples_classify_into_their_categories() {
        let examples: Vec<&str> = HELP_MESSAGE
            .lines()
            .skip(1)
            .map(|line| line.trim_start_matches("• ").trim_matches('"'))
            .collect();
        assert_eq!(examples.len(), 4);

        let kinds: Vec<ActionKind> = examples.iter().map(|e| classify(e).kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Habit,
                ActionKind::PersonalRecord,
                ActionKind::Workout,
                ActionKind::Food,
            ]
        );
    }

    #[test]
    fn classification_is_idempotent() {
        for input in ["benched 225 for 5 reps, new pr!", "walked 10,000 steps", "", "hello"] {
            assert_eq!(classify(input), classify(input));
        }
    }

    #[test]
    fn punctuation_only_is_unknown() {
        assert!(classify("?!...,,").is_unknown());
        assert_eq!(matching_rule("?!...,,"), None);
    }
}
