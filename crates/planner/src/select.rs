use std::collections::HashSet;

use mealweek_shared::{MealCategory, MealOption};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks one meal for a category slot, avoiding repeats best-effort.
///
/// Candidates are narrowed in two tiers: options that repeat from the
/// previous period are dropped first (staples stay in when
/// `allow_staple_repetition` is set), then options already placed earlier in
/// the current period. Each tier is abandoned rather than letting the pool
/// run dry, so a selection is always made whenever the category has at least
/// one option. The final pick is uniform over the surviving pool.
pub fn select_meal<'a, R: Rng + ?Sized>(
    category: MealCategory,
    catalog: &'a [MealOption],
    previous_ids: &HashSet<String>,
    current_ids: &HashSet<String>,
    allow_staple_repetition: bool,
    rng: &mut R,
) -> Option<&'a MealOption> {
    let options: Vec<&MealOption> = catalog
        .iter()
        .filter(|option| option.category == category)
        .collect();

    if options.is_empty() {
        tracing::warn!(category = %category, "no meal options for category");
        return None;
    }

    let mut eligible: Vec<&MealOption> = options
        .iter()
        .copied()
        .filter(|option| {
            (option.is_staple && allow_staple_repetition) || !previous_ids.contains(&option.id)
        })
        .collect();

    if eligible.is_empty() {
        tracing::warn!(
            category = %category,
            "every option repeats the previous period, widening to the full category"
        );
        eligible = options;
    }

    let preferred: Vec<&MealOption> = eligible
        .iter()
        .copied()
        .filter(|option| !current_ids.contains(&option.id))
        .collect();

    let pool = if preferred.is_empty() {
        &eligible
    } else {
        &preferred
    };

    pool.choose(rng).copied()
}
