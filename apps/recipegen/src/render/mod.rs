//! Document model handed to the template renderer, plus the star display.

use serde::Serialize;
use thiserror::Error;

use crate::generation::content::AltTexts;
use crate::images::ImageUrls;
use crate::models::Recipe;

pub mod html;

pub use html::HtmlRenderer;

pub const FULL_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';
/// Half stars share the empty glyph.
pub const HALF_STAR: char = EMPTY_STAR;
pub const STAR_SLOTS: usize = 5;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template rendering failed: {0}")]
    Template(String),
}

/// Turns a document into a page. `HtmlRenderer` cannot fail; the error is for
/// renderers backed by runtime templates or other fallible sources.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, document: &RecipeDocument) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSet {
    pub hero: Image,
    pub ingredients: Image,
    pub process: Image,
}

impl ImageSet {
    pub fn new(urls: ImageUrls, alts: AltTexts) -> Self {
        let [hero_url, ingredients_url, process_url] = urls;
        let [hero_alt, ingredients_alt, process_alt] = alts;
        Self {
            hero: Image {
                url: hero_url,
                alt: hero_alt,
            },
            ingredients: Image {
                url: ingredients_url,
                alt: ingredients_alt,
            },
            process: Image {
                url: process_url,
                alt: process_alt,
            },
        }
    }
}

/// Everything a template sees: the recipe fields at the top level, the
/// `images` mapping, the user's `keyword`, and the `stars` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDocument {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub images: ImageSet,
    pub keyword: String,
    pub stars: String,
}

impl RecipeDocument {
    pub fn new(recipe: Recipe, images: ImageSet, keyword: &str) -> Self {
        let stars = render_stars(recipe.rating);
        Self {
            recipe,
            images,
            keyword: keyword.to_string(),
            stars,
        }
    }
}

/// `floor(rating)` full stars, a half star when the fraction is >= 0.5,
/// empty stars for the remaining slots.
pub fn render_stars(rating: f64) -> String {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, STAR_SLOTS as f64)
    } else {
        0.0
    };
    let full = rating.floor() as usize;
    let half = usize::from(rating.fract() >= 0.5);
    let empty = STAR_SLOTS - full - half;

    let mut stars = String::with_capacity(STAR_SLOTS * FULL_STAR.len_utf8());
    stars.extend(std::iter::repeat(FULL_STAR).take(full));
    stars.extend(std::iter::repeat(HALF_STAR).take(half));
    stars.extend(std::iter::repeat(EMPTY_STAR).take(empty));
    stars
}
