use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::lenient;

/// Nutrition facts keyed by metric name ("calories", "total_fat", ...).
/// No fixed key set; values are text or numbers.
pub type Nutrition = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse; anything other than the three levels is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Introduction {
    #[serde(default)]
    pub paragraph1: String,
    #[serde(default)]
    pub paragraph2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "content")]
    pub description: String,
}

/// Titled block of prose, used for storage notes and tips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "description")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// A recipe as returned by the text model: any field may be missing or
/// malformed. Never rendered directly; see `generation::validator`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub review_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub prep_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub cook_time: Option<i64>,
    /// Read for completeness only; the validator always recomputes it.
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub total_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub servings: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub introduction: Option<Introduction>,
    #[serde(default, deserialize_with = "lenient::opt_string_list")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_string_list")]
    pub instructions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_scalar_map")]
    pub nutrition: Option<Nutrition>,
    #[serde(default, deserialize_with = "lenient::opt_record_list")]
    pub variations: Option<Vec<Variation>>,
    #[serde(default, deserialize_with = "lenient::opt_record_list")]
    pub storage: Option<Vec<Section>>,
    #[serde(default, deserialize_with = "lenient::opt_record_list")]
    pub faqs: Option<Vec<Faq>>,
    #[serde(default, deserialize_with = "lenient::opt_record_list")]
    pub tips: Option<Vec<Section>>,
}

impl RecipeDraft {
    /// A usable draft names the dish or lists at least one ingredient or
    /// step. Anything less (an empty object, a wrapper like
    /// `{"recipe": {...}}`) carries no recipe keys worth repairing.
    pub fn check_usable(&self) -> Result<(), String> {
        let filled = |lines: &Option<Vec<String>>| {
            lines
                .as_ref()
                .is_some_and(|l| l.iter().any(|line| !line.trim().is_empty()))
        };
        let titled = self.title.as_ref().is_some_and(|t| !t.trim().is_empty());

        if titled || filled(&self.ingredients) || filled(&self.instructions) {
            Ok(())
        } else {
            Err("no title, ingredients or instructions in reply".to_string())
        }
    }

    /// Keeps each field of `self` that carries content and takes the rest
    /// from `base`. List fields shorter than the base list fall back to it
    /// as well, so a rewrite can reword entries but not drop them.
    pub fn fill_from(self, base: &Recipe) -> RecipeDraft {
        let base = RecipeDraft::from(base.clone());
        RecipeDraft {
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .or(base.title),
            rating: self
                .rating
                .filter(|r| r.is_finite() && *r > 0.0)
                .or(base.rating),
            review_count: positive(self.review_count).or(base.review_count),
            difficulty: self
                .difficulty
                .filter(|d| Difficulty::parse(d).is_some())
                .or(base.difficulty),
            prep_time: positive(self.prep_time).or(base.prep_time),
            cook_time: positive(self.cook_time).or(base.cook_time),
            total_time: None,
            servings: positive(self.servings).or(base.servings),
            introduction: self
                .introduction
                .filter(|i| !i.paragraph1.trim().is_empty() || !i.paragraph2.trim().is_empty())
                .or(base.introduction),
            ingredients: no_shorter(self.ingredients, base.ingredients),
            instructions: no_shorter(self.instructions, base.instructions),
            nutrition: self.nutrition.filter(|n| !n.is_empty()).or(base.nutrition),
            variations: no_shorter(self.variations, base.variations),
            storage: no_shorter(self.storage, base.storage),
            faqs: no_shorter(self.faqs, base.faqs),
            tips: no_shorter(self.tips, base.tips),
        }
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|n| *n > 0)
}

fn no_shorter<T>(enhanced: Option<Vec<T>>, base: Option<Vec<T>>) -> Option<Vec<T>> {
    match (enhanced, base) {
        (Some(e), Some(b)) if e.len() < b.len() => Some(b),
        (Some(e), b) => {
            if e.is_empty() {
                b
            } else {
                Some(e)
            }
        }
        (None, b) => b,
    }
}

/// A recipe that has passed validation: every field present, minimum list
/// lengths met, `total_time == prep_time + cook_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub rating: f64,
    pub review_count: u32,
    pub difficulty: Difficulty,
    pub prep_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub introduction: Introduction,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: Nutrition,
    pub variations: Vec<Variation>,
    pub storage: Vec<Section>,
    pub faqs: Vec<Faq>,
    pub tips: Vec<Section>,
}

impl From<Recipe> for RecipeDraft {
    fn from(recipe: Recipe) -> Self {
        RecipeDraft {
            title: Some(recipe.title),
            rating: Some(recipe.rating),
            review_count: Some(recipe.review_count.into()),
            difficulty: Some(recipe.difficulty.to_string()),
            prep_time: Some(recipe.prep_time.into()),
            cook_time: Some(recipe.cook_time.into()),
            total_time: Some(recipe.total_time.into()),
            servings: Some(recipe.servings.into()),
            introduction: Some(recipe.introduction),
            ingredients: Some(recipe.ingredients),
            instructions: Some(recipe.instructions),
            nutrition: Some(recipe.nutrition),
            variations: Some(recipe.variations),
            storage: Some(recipe.storage),
            faqs: Some(recipe.faqs),
            tips: Some(recipe.tips),
        }
    }
}
