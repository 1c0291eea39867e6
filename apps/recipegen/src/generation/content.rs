//! Content generation: the recipe-specific operations on top of `LlmClient`.
//!
//! Only `generate_recipe` can fail the caller. The other operations always
//! return something usable: search term falls back to the keyword itself,
//! SEO enhancement to `None`, alt texts to templated strings.

use tracing::{info, warn};

use crate::config::RecipeSettings;
use crate::generation::prompts::{
    build_alt_text_prompt, build_recipe_prompt, build_search_term_prompt, build_seo_prompt,
};
use crate::images::{ImageUrls, IMAGES_PER_RECIPE};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::{Recipe, RecipeDraft};

pub type AltTexts = [String; IMAGES_PER_RECIPE];

#[derive(Clone)]
pub struct ContentGenerator {
    llm: LlmClient,
    settings: RecipeSettings,
}

impl ContentGenerator {
    pub fn new(llm: LlmClient, settings: RecipeSettings) -> Self {
        Self { llm, settings }
    }

    /// Compresses the keyword into a 1–2 word image search term. Never fails.
    pub async fn derive_image_search_term(&self, keyword: &str) -> String {
        let prompt = build_search_term_prompt(keyword);
        match self.llm.complete(&prompt).await {
            Ok(answer) => match clean_search_term(&answer) {
                Some(term) => term,
                None => {
                    warn!("Search term answer was empty; falling back to keyword");
                    fallback_search_term(keyword)
                }
            },
            Err(e) => {
                warn!("Image keyword extraction failed: {e}");
                fallback_search_term(keyword)
            }
        }
    }

    /// Full structured recipe; fails only once every retry attempt is spent.
    pub async fn generate_recipe(&self, keyword: &str) -> Result<RecipeDraft, LlmError> {
        let prompt = build_recipe_prompt(keyword, &self.settings);
        self.llm
            .call_json_checked(&prompt, RecipeDraft::check_usable)
            .await
    }

    /// Rewrites the recipe around the keyword. Fields the rewrite leaves
    /// empty or shortens keep the input's content. `None` means keep the input.
    pub async fn enhance_for_seo(&self, recipe: &Recipe, keyword: &str) -> Option<RecipeDraft> {
        let recipe_json = match serde_json::to_string(recipe) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize recipe for SEO pass: {e}");
                return None;
            }
        };

        let prompt = build_seo_prompt(keyword, &recipe_json, &self.settings);
        match self
            .llm
            .call_json_checked(&prompt, RecipeDraft::check_usable)
            .await
        {
            Ok(enhanced) => Some(enhanced.fill_from(recipe)),
            Err(e) => {
                warn!("SEO enhancement failed: {e}");
                None
            }
        }
    }

    /// One alt text per image role (hero, ingredients, process).
    pub async fn generate_alt_texts(&self, keyword: &str, image_urls: &ImageUrls) -> AltTexts {
        let prompt = build_alt_text_prompt(keyword, image_urls);
        match self.llm.complete(&prompt).await {
            Ok(answer) => {
                let alts = parse_alt_texts(&answer, keyword);
                info!("Generated alt texts for '{keyword}'");
                alts
            }
            Err(e) => {
                warn!("Alt text generation failed: {e}");
                fallback_alt_texts(keyword)
            }
        }
    }
}

/// First two whitespace-separated tokens of the keyword.
pub fn fallback_search_term(keyword: &str) -> String {
    keyword.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

fn clean_search_term(answer: &str) -> Option<String> {
    let line = answer.lines().map(str::trim).find(|l| !l.is_empty())?;
    let term = line.replace(['"', '\''], "");
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_string())
}

pub fn fallback_alt_texts(keyword: &str) -> AltTexts {
    [
        format!("Delicious {keyword} ready to serve"),
        format!("Fresh ingredients for {keyword} recipe"),
        format!("Step by step {keyword} cooking process"),
    ]
}

/// Non-empty answer lines in order; roles the answer does not cover keep
/// their fallback text.
fn parse_alt_texts(answer: &str, keyword: &str) -> AltTexts {
    let mut lines = answer
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty());
    let mut alts = fallback_alt_texts(keyword);
    for slot in alts.iter_mut() {
        match lines.next() {
            Some(line) => *slot = line.to_string(),
            None => break,
        }
    }
    alts
}

/// Drops a leading "1." / "2)" / "-" / "*" marker and surrounding quotes.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let after_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    let line = if after_digits.len() < line.len() {
        after_digits
            .strip_prefix('.')
            .or_else(|| after_digits.strip_prefix(')'))
            .unwrap_or(line)
    } else {
        line
    };
    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line);
    line.trim().trim_matches('"').trim()
}
