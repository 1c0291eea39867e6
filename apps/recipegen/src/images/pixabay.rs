use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{fill_image_slots, placeholder_images, ImageSearch, ImageUrls, IMAGES_PER_RECIPE};
use crate::config::ImageSettings;

const PIXABAY_API_BASE: &str = "https://pixabay.com";
const FALLBACK_SIZE_FIELD: &str = "webformatURL";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone)]
pub struct PixabayClient {
    client: Client,
    api_key: String,
    settings: ImageSettings,
    base_url: String,
}

impl PixabayClient {
    pub fn new(
        api_key: String,
        settings: ImageSettings,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Self::with_base_url(PIXABAY_API_BASE, api_key, settings, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: String,
        settings: ImageSettings,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            settings,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// One query; URLs of the first `IMAGES_PER_RECIPE` hits that carry one.
    async fn fetch(&self, term: &str) -> Result<Vec<String>, reqwest::Error> {
        let per_page = self.settings.candidates.to_string();
        let response = self
            .client
            .get(format!("{}/api/", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", term),
                ("image_type", "photo"),
                ("orientation", self.settings.orientation.as_str()),
                ("category", "food"),
                ("safesearch", "true"),
                ("per_page", per_page.as_str()),
                ("order", "popular"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;

        Ok(body
            .hits
            .iter()
            .take(IMAGES_PER_RECIPE)
            .filter_map(|hit| self.image_url(hit))
            .collect())
    }

    fn image_url(&self, hit: &Map<String, Value>) -> Option<String> {
        let field = |name: &str| {
            hit.get(name)
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        };
        field(self.settings.size_field.as_str()).or_else(|| field(FALLBACK_SIZE_FIELD))
    }
}

#[async_trait]
impl ImageSearch for PixabayClient {
    async fn search_food_images(&self, term: &str) -> ImageUrls {
        match self.fetch(term).await {
            Ok(urls) if urls.is_empty() => {
                warn!("No images found for '{term}' on Pixabay; using placeholders");
                placeholder_images()
            }
            Ok(urls) => {
                info!("Retrieved {} image(s) for '{term}'", urls.len());
                fill_image_slots(urls)
            }
            Err(e) => {
                warn!("Pixabay search failed for '{term}': {e}; using placeholders");
                placeholder_images()
            }
        }
    }
}
