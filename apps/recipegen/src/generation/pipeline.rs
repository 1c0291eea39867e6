//! Recipe pipeline: orchestrates one keyword into one saved HTML page.
//!
//! Flow: search term → images → base recipe → validate → SEO (+ revalidate)
//!       → alt texts → document model → render → save → stats.
//!
//! Stages run strictly in order. Only base content generation (stage 3) and
//! rendering (stage 8) stop the run; everything else degrades to a fallback.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::RecipeSettings;
use crate::errors::AppError;
use crate::generation::content::{AltTexts, ContentGenerator};
use crate::generation::stats::{GenerationStats, StatsLog};
use crate::generation::validator::validate_recipe;
use crate::images::{ImageSearch, ImageUrls};
use crate::render::{ImageSet, RecipeDocument, TemplateRenderer};
use crate::storage::RecipeStore;

const STAGES: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Everything one run accumulates. Owned by `run`, dropped when it returns.
#[derive(Debug, Default)]
struct GenerationContext {
    keyword: String,
    search_term: String,
    image_urls: ImageUrls,
    alt_texts: AltTexts,
}

impl GenerationContext {
    fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub path: PathBuf,
    pub stats: GenerationStats,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct RecipePipeline {
    content: ContentGenerator,
    images: Arc<dyn ImageSearch>,
    renderer: Box<dyn TemplateRenderer>,
    store: Box<dyn RecipeStore>,
    stats_log: Option<StatsLog>,
    settings: RecipeSettings,
}

impl RecipePipeline {
    pub fn new(
        content: ContentGenerator,
        images: Arc<dyn ImageSearch>,
        renderer: Box<dyn TemplateRenderer>,
        store: Box<dyn RecipeStore>,
        settings: RecipeSettings,
    ) -> Self {
        Self {
            content,
            images,
            renderer,
            store,
            stats_log: None,
            settings,
        }
    }

    pub fn with_stats_log(mut self, stats_log: StatsLog) -> Self {
        self.stats_log = Some(stats_log);
        self
    }

    /// Runs all ten stages for `keyword`.
    pub async fn run(&self, keyword: &str) -> Result<GenerationOutcome, AppError> {
        let mut ctx = GenerationContext::new(keyword);
        info!("Starting recipe generation for '{}'", ctx.keyword);

        // Step 1: Image search term
        stage(1, "Deriving image search term");
        ctx.search_term = self.content.derive_image_search_term(&ctx.keyword).await;
        info!("Image search term: '{}'", ctx.search_term);

        // Step 2: Images (never fails; placeholders substitute)
        stage(2, "Searching images");
        ctx.image_urls = self.images.search_food_images(&ctx.search_term).await;

        // Step 3: Base recipe (hard stop)
        stage(3, "Generating recipe content");
        let draft = match self.content.generate_recipe(&ctx.keyword).await {
            Ok(draft) => draft,
            Err(e) => {
                error!("Recipe content generation failed for '{}': {e}", ctx.keyword);
                return Err(AppError::Generation(e));
            }
        };

        // Step 4: Validate
        stage(4, "Validating recipe");
        let recipe = validate_recipe(draft, &self.settings);

        // Step 5: SEO enhancement, revalidated; the base recipe stands on failure
        stage(5, "Enhancing recipe for SEO");
        let recipe = match self.content.enhance_for_seo(&recipe, &ctx.keyword).await {
            Some(enhanced) => validate_recipe(enhanced, &self.settings),
            None => {
                warn!("Keeping un-enhanced recipe for '{}'", ctx.keyword);
                recipe
            }
        };

        // Step 6: Alt texts
        stage(6, "Generating image alt texts");
        ctx.alt_texts = self
            .content
            .generate_alt_texts(&ctx.keyword, &ctx.image_urls)
            .await;

        // Step 7: Document model
        stage(7, "Assembling document");
        let images = ImageSet::new(ctx.image_urls.clone(), std::mem::take(&mut ctx.alt_texts));
        let document = RecipeDocument::new(recipe, images, &ctx.keyword);

        // Step 8: Render (hard stop)
        stage(8, "Rendering HTML");
        let html = match self.renderer.render(&document) {
            Ok(html) => html,
            Err(e) => {
                error!("Rendering failed for '{}': {e}", ctx.keyword);
                return Err(AppError::Render(e));
            }
        };

        // Step 9: Save
        stage(9, "Saving recipe file");
        let path = self.store.save(&html, &ctx.keyword)?;

        // Step 10: Stats
        stage(10, "Recording generation stats");
        let stats = GenerationStats::collect(&ctx.keyword, &document.recipe, &ctx.image_urls, &path);
        stats.log();
        if let Some(log) = &self.stats_log {
            log.append(&stats);
        }

        info!("Recipe for '{}' saved to {}", ctx.keyword, path.display());
        Ok(GenerationOutcome { path, stats })
    }
}

fn stage(n: u8, label: &str) {
    info!("Stage {n}/{STAGES}: {label}");
}
