use std::collections::HashSet;

use mealweek_shared::{DayPlan, MealCategory, MealOption, Result, WeeklyPlan};
use rand::Rng;
use strum::VariantArray;
use time::{Date, Duration};
use validator::Validate;

use crate::{GenerationConfig, select_meal};

struct CategoryState {
    category: MealCategory,
    previous_ids: HashSet<String>,
    used_ids: HashSet<String>,
}

/// Builds a plan of consecutive days starting at `start_date`, one selection
/// per category per day.
///
/// The previous plan only feeds the repeat-avoidance sets; neither it nor the
/// catalog is mutated. Randomness comes exclusively from `rng`, so a seeded
/// generator reproduces the same plan.
pub fn generate_plan<R: Rng + ?Sized>(
    catalog: &[MealOption],
    previous_plan: Option<&WeeklyPlan>,
    config: &GenerationConfig,
    start_date: Date,
    rng: &mut R,
) -> Result<WeeklyPlan> {
    config.validate()?;

    let mut states: Vec<CategoryState> = MealCategory::VARIANTS
        .iter()
        .map(|category| CategoryState {
            category: *category,
            previous_ids: previous_plan
                .map(|plan| plan.used_ids(*category))
                .unwrap_or_default(),
            used_ids: HashSet::new(),
        })
        .collect();

    let mut days = Vec::with_capacity(config.days_to_generate as usize);

    for offset in 0..config.days_to_generate {
        let date = start_date + Duration::days(offset as i64);
        let mut day = DayPlan::new(date);

        for state in states.iter_mut() {
            let selected = select_meal(
                state.category,
                catalog,
                &state.previous_ids,
                &state.used_ids,
                config.allow_staple_repetition,
                rng,
            );

            if let Some(meal) = selected {
                state.used_ids.insert(meal.id.clone());
                day.set_meal(state.category, meal.clone());
            }
        }

        days.push(day);
    }

    Ok(WeeklyPlan {
        week_start_date: start_date,
        days,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    use super::*;

    fn option(id: &str, name: &str, category: MealCategory, is_staple: bool) -> MealOption {
        MealOption {
            id: id.to_owned(),
            name: name.to_owned(),
            category,
            is_staple,
            tags: vec![],
        }
    }

    fn full_catalog() -> Vec<MealOption> {
        vec![
            option("b1", "Oats", MealCategory::Breakfast, true),
            option("b2", "Eggs", MealCategory::Breakfast, false),
            option("b3", "Pancakes", MealCategory::Breakfast, false),
            option("l1", "Dal", MealCategory::Lunch, false),
            option("l2", "Soup", MealCategory::Lunch, false),
            option("d1", "Curry", MealCategory::Dinner, false),
            option("d2", "Pasta", MealCategory::Dinner, false),
            option("d3", "Tacos", MealCategory::Dinner, false),
        ]
    }

    fn plan_with_every_day(catalog: &[MealOption], name: &str, days: u32) -> WeeklyPlan {
        let meal = catalog
            .iter()
            .find(|option| option.name == name)
            .unwrap()
            .clone();

        let days = (0..days)
            .map(|offset| {
                let mut day = DayPlan::new(date!(2026 - 01 - 26) + Duration::days(offset as i64));
                day.set_meal(meal.category, meal.clone());
                day
            })
            .collect();

        WeeklyPlan::from_days(days).unwrap()
    }

    #[test]
    fn test_generates_consecutive_days() {
        let catalog = full_catalog();
        let mut rng = StdRng::seed_from_u64(3);

        let plan = generate_plan(
            &catalog,
            None,
            &GenerationConfig::default(),
            date!(2026 - 02 - 26),
            &mut rng,
        )
        .unwrap();

        assert_eq!(plan.week_start_date, date!(2026 - 02 - 26));
        assert_eq!(plan.days.len(), 7);

        // Consecutive across the month boundary as well.
        for (offset, day) in plan.days.iter().enumerate() {
            assert_eq!(day.date, date!(2026 - 02 - 26) + Duration::days(offset as i64));
        }
    }

    #[test]
    fn test_every_slot_populated_when_categories_have_options() {
        let catalog = full_catalog();
        let mut rng = StdRng::seed_from_u64(5);

        let plan = generate_plan(
            &catalog,
            None,
            &GenerationConfig::default(),
            date!(2026 - 02 - 02),
            &mut rng,
        )
        .unwrap();

        for day in &plan.days {
            assert!(day.breakfast.is_some());
            assert!(day.lunch.is_some());
            assert!(day.dinner.is_some());
        }
    }

    #[test]
    fn test_empty_category_leaves_slot_absent() {
        let catalog: Vec<MealOption> = full_catalog()
            .into_iter()
            .filter(|option| option.category != MealCategory::Lunch)
            .collect();
        let mut rng = StdRng::seed_from_u64(5);

        let plan = generate_plan(
            &catalog,
            None,
            &GenerationConfig::default(),
            date!(2026 - 02 - 02),
            &mut rng,
        )
        .unwrap();

        for day in &plan.days {
            assert!(day.lunch.is_none());
            assert!(day.breakfast.is_some());
            assert!(day.dinner.is_some());
        }
    }

    #[test]
    fn test_empty_catalog_still_returns_full_horizon() {
        let mut rng = StdRng::seed_from_u64(5);

        let plan = generate_plan(
            &[],
            None,
            &GenerationConfig::default(),
            date!(2026 - 02 - 02),
            &mut rng,
        )
        .unwrap();

        assert_eq!(plan.days.len(), 7);
        assert!(plan.days.iter().all(|day| day.breakfast.is_none()
            && day.lunch.is_none()
            && day.dinner.is_none()));
    }

    #[test]
    fn test_zero_days_is_a_configuration_fault() {
        let catalog = full_catalog();
        let mut rng = StdRng::seed_from_u64(5);

        let result = generate_plan(
            &catalog,
            None,
            &GenerationConfig {
                days_to_generate: 0,
                ..GenerationConfig::default()
            },
            date!(2026 - 02 - 02),
            &mut rng,
        );

        assert!(matches!(result, Err(mealweek_shared::Error::Validate(_))));
    }

    #[test]
    fn test_staple_survives_previous_week_of_eggs() {
        // Eggs every previous day excludes Eggs; Oats is a staple and stays
        // selectable, so both generated days must land on Oats.
        let catalog = vec![
            option("b1", "Oats", MealCategory::Breakfast, true),
            option("b2", "Eggs", MealCategory::Breakfast, false),
        ];
        let previous = plan_with_every_day(&catalog, "Eggs", 7);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = generate_plan(
                &catalog,
                Some(&previous),
                &GenerationConfig {
                    days_to_generate: 2,
                    allow_staple_repetition: true,
                },
                date!(2026 - 02 - 02),
                &mut rng,
            )
            .unwrap();

            for day in &plan.days {
                assert_eq!(day.breakfast.as_ref().unwrap().name, "Oats");
            }
        }
    }

    #[test]
    fn test_sole_option_selected_despite_previous_repeat() {
        let catalog = vec![option("l1", "Dal", MealCategory::Lunch, false)];
        let previous = plan_with_every_day(&catalog, "Dal", 7);
        let mut rng = StdRng::seed_from_u64(11);

        let plan = generate_plan(
            &catalog,
            Some(&previous),
            &GenerationConfig {
                days_to_generate: 3,
                allow_staple_repetition: false,
            },
            date!(2026 - 02 - 02),
            &mut rng,
        )
        .unwrap();

        for day in &plan.days {
            assert_eq!(day.lunch.as_ref().unwrap().name, "Dal");
        }
    }

    #[test]
    fn test_no_within_week_repeat_until_category_exhausted() {
        let catalog = full_catalog();

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = generate_plan(
                &catalog,
                None,
                &GenerationConfig {
                    days_to_generate: 3,
                    allow_staple_repetition: true,
                },
                date!(2026 - 02 - 02),
                &mut rng,
            )
            .unwrap();

            // Three dinner options, three days: all distinct.
            let dinners: HashSet<String> = plan.used_ids(MealCategory::Dinner);
            assert_eq!(dinners.len(), 3);
        }
    }

    #[test]
    fn test_seeded_runs_reproduce_the_same_plan() {
        let catalog = full_catalog();

        let mut first_rng = StdRng::seed_from_u64(42);
        let first = generate_plan(
            &catalog,
            None,
            &GenerationConfig::default(),
            date!(2026 - 02 - 02),
            &mut first_rng,
        )
        .unwrap();

        let mut second_rng = StdRng::seed_from_u64(42);
        let second = generate_plan(
            &catalog,
            None,
            &GenerationConfig::default(),
            date!(2026 - 02 - 02),
            &mut second_rng,
        )
        .unwrap();

        assert_eq!(first, second);
    }
}
