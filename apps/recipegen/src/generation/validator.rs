//! Content validator: repairs a `RecipeDraft` into a `Recipe`.
//!
//! Deterministic, no remote calls, idempotent: running a validated recipe
//! back through `validate_recipe` returns it unchanged.
//!
//! Rules:
//! - missing or falsy fields (empty text/list, zero, null) take the default
//! - `prep_time` / `cook_time` must be JSON integers, else the default
//! - `total_time` is always recomputed as `prep_time + cook_time`
//! - ingredients / instructions are padded with numbered placeholders up to
//!   the configured minimum

use crate::config::RecipeSettings;
use crate::models::{Difficulty, Faq, Recipe, RecipeDraft, Section, Variation};

pub const DEFAULT_TITLE: &str = "Recipe Title";
pub const DEFAULT_RATING: f64 = 4.5;
pub const DEFAULT_REVIEW_COUNT: u32 = 100;
pub const DEFAULT_PREP_TIME: u32 = 15;
pub const DEFAULT_COOK_TIME: u32 = 30;
pub const DEFAULT_SERVINGS: u32 = 4;
pub const MAX_RATING: f64 = 5.0;

pub fn validate_recipe(draft: RecipeDraft, settings: &RecipeSettings) -> Recipe {
    let prep_time = positive_or(draft.prep_time, DEFAULT_PREP_TIME);
    let cook_time = positive_or(draft.cook_time, DEFAULT_COOK_TIME);

    let mut ingredients = clean_lines(draft.ingredients);
    pad_to(&mut ingredients, settings.min_ingredients, "Missing ingredient");

    let mut instructions = clean_lines(draft.instructions);
    pad_to(&mut instructions, settings.min_steps, "Missing step");

    Recipe {
        title: draft
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        rating: match draft.rating {
            Some(r) if r.is_finite() && r > 0.0 => r.min(MAX_RATING),
            _ => DEFAULT_RATING,
        },
        review_count: positive_or(draft.review_count, DEFAULT_REVIEW_COUNT),
        difficulty: draft
            .difficulty
            .as_deref()
            .and_then(Difficulty::parse)
            .unwrap_or_default(),
        prep_time,
        cook_time,
        total_time: prep_time.saturating_add(cook_time),
        servings: positive_or(draft.servings, DEFAULT_SERVINGS),
        introduction: draft.introduction.unwrap_or_default(),
        ingredients,
        instructions,
        nutrition: draft.nutrition.unwrap_or_default(),
        variations: keep_filled(draft.variations, |v: &Variation| {
            !v.title.trim().is_empty() || !v.description.trim().is_empty()
        }),
        storage: keep_filled(draft.storage, section_filled),
        faqs: keep_filled(draft.faqs, |f: &Faq| {
            !f.question.trim().is_empty() || !f.answer.trim().is_empty()
        }),
        tips: keep_filled(draft.tips, section_filled),
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    value
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn clean_lines(lines: Option<Vec<String>>) -> Vec<String> {
    lines
        .unwrap_or_default()
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn pad_to(lines: &mut Vec<String>, min: usize, label: &str) {
    let missing = min.saturating_sub(lines.len());
    lines.extend((1..=missing).map(|n| format!("{label} {n}")));
}

fn keep_filled<T>(items: Option<Vec<T>>, filled: impl Fn(&T) -> bool) -> Vec<T> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter(|item| filled(item))
        .collect()
}

fn section_filled(section: &Section) -> bool {
    !section.title.trim().is_empty() || !section.content.trim().is_empty()
}
