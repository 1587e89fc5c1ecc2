use std::collections::HashSet;

use time::Date;

use crate::{MealCategory, MealOption};

/// One calendar day of a plan. A slot stays empty when its category had no
/// selectable option.
#[derive(Clone, Debug, PartialEq)]
pub struct DayPlan {
    pub date: Date,
    pub breakfast: Option<MealOption>,
    pub lunch: Option<MealOption>,
    pub dinner: Option<MealOption>,
}

impl DayPlan {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    pub fn meal(&self, category: MealCategory) -> Option<&MealOption> {
        match category {
            MealCategory::Breakfast => self.breakfast.as_ref(),
            MealCategory::Lunch => self.lunch.as_ref(),
            MealCategory::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set_meal(&mut self, category: MealCategory, meal: MealOption) {
        let slot = match category {
            MealCategory::Breakfast => &mut self.breakfast,
            MealCategory::Lunch => &mut self.lunch,
            MealCategory::Dinner => &mut self.dinner,
        };

        *slot = Some(meal);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyPlan {
    pub week_start_date: Date,
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// Builds a plan from stored days in any order. Days are sorted ascending
    /// and the lowest date becomes the week start. Returns None when there
    /// are no days at all.
    pub fn from_days(mut days: Vec<DayPlan>) -> Option<Self> {
        if days.is_empty() {
            return None;
        }

        days.sort_by_key(|day| day.date);
        let week_start_date = days[0].date;

        Some(Self {
            week_start_date,
            days,
        })
    }

    pub fn meals_in(&self, category: MealCategory) -> impl Iterator<Item = &MealOption> {
        self.days.iter().filter_map(move |day| day.meal(category))
    }

    /// Ids of every meal placed in the given category, for repeat checks.
    pub fn used_ids(&self, category: MealCategory) -> HashSet<String> {
        self.meals_in(category).map(|meal| meal.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn option(id: &str, category: MealCategory) -> MealOption {
        MealOption {
            id: id.to_owned(),
            name: format!("meal {id}"),
            category,
            is_staple: false,
            tags: vec![],
        }
    }

    #[test]
    fn test_from_days_sorts_and_picks_week_start() {
        let days = vec![
            DayPlan::new(date!(2026 - 02 - 05)),
            DayPlan::new(date!(2026 - 02 - 03)),
            DayPlan::new(date!(2026 - 02 - 04)),
        ];

        let plan = WeeklyPlan::from_days(days).unwrap();

        assert_eq!(plan.week_start_date, date!(2026 - 02 - 03));
        assert_eq!(plan.days[0].date, date!(2026 - 02 - 03));
        assert_eq!(plan.days[2].date, date!(2026 - 02 - 05));
    }

    #[test]
    fn test_from_days_empty() {
        assert_eq!(WeeklyPlan::from_days(vec![]), None);
    }

    #[test]
    fn test_used_ids_per_category() {
        let mut day1 = DayPlan::new(date!(2026 - 02 - 03));
        day1.set_meal(MealCategory::Breakfast, option("b1", MealCategory::Breakfast));
        day1.set_meal(MealCategory::Dinner, option("d1", MealCategory::Dinner));

        let mut day2 = DayPlan::new(date!(2026 - 02 - 04));
        day2.set_meal(MealCategory::Breakfast, option("b2", MealCategory::Breakfast));

        let plan = WeeklyPlan::from_days(vec![day1, day2]).unwrap();

        let breakfasts = plan.used_ids(MealCategory::Breakfast);
        assert_eq!(breakfasts.len(), 2);
        assert!(breakfasts.contains("b1"));
        assert!(breakfasts.contains("b2"));

        assert!(plan.used_ids(MealCategory::Lunch).is_empty());
        assert_eq!(plan.used_ids(MealCategory::Dinner).len(), 1);
    }
}
