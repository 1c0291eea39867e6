//! Per-run summary: logged through tracing and appended as one JSON line to
//! `{log_dir}/generation_stats.jsonl`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use crate::images::{is_placeholder, ImageUrls};
use crate::models::{Difficulty, Recipe};

pub const STATS_FILE_NAME: &str = "generation_stats.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub timestamp: DateTime<Local>,
    pub keyword: String,
    pub file: PathBuf,
    pub ingredients: usize,
    pub steps: usize,
    pub faqs: usize,
    pub tips: usize,
    pub images: usize,
    pub placeholder_images: usize,
    pub rating: f64,
    pub difficulty: Difficulty,
}

impl GenerationStats {
    pub fn collect(keyword: &str, recipe: &Recipe, image_urls: &ImageUrls, file: &Path) -> Self {
        Self {
            timestamp: Local::now(),
            keyword: keyword.to_string(),
            file: file.to_path_buf(),
            ingredients: recipe.ingredients.len(),
            steps: recipe.instructions.len(),
            faqs: recipe.faqs.len(),
            tips: recipe.tips.len(),
            images: image_urls.len(),
            placeholder_images: image_urls.iter().filter(|url| is_placeholder(url)).count(),
            rating: recipe.rating,
            difficulty: recipe.difficulty,
        }
    }

    pub fn log(&self) {
        info!(
            keyword = %self.keyword,
            file = %self.file.display(),
            ingredients = self.ingredients,
            steps = self.steps,
            faqs = self.faqs,
            tips = self.tips,
            images = self.images,
            placeholder_images = self.placeholder_images,
            rating = self.rating,
            difficulty = %self.difficulty,
            "Generation stats"
        );
    }
}

#[derive(Debug, Clone)]
pub struct StatsLog {
    path: PathBuf,
}

impl StatsLog {
    pub fn in_dir(log_dir: &Path) -> Self {
        Self {
            path: log_dir.join(STATS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Failures are logged, never returned; the recipe file is already saved.
    pub fn append(&self, stats: &GenerationStats) {
        if let Err(e) = self.try_append(stats) {
            warn!("Could not append generation stats to {}: {e}", self.path.display());
        }
    }

    fn try_append(&self, stats: &GenerationStats) -> std::io::Result<()> {
        let mut line = serde_json::to_string(stats)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
