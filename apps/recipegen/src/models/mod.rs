pub mod lenient;
pub mod recipe;

pub use recipe::{Difficulty, Faq, Introduction, Nutrition, Recipe, RecipeDraft, Section, Variation};
