//! Image search: always yields exactly one URL per image role.
//!
//! Unlike the text client there is no retry: a missing photo is cosmetic, so
//! any failure degrades straight to placeholders.

use async_trait::async_trait;

pub mod pixabay;

pub use pixabay::PixabayClient;

pub const IMAGES_PER_RECIPE: usize = 3;

/// Hero, ingredients, process, in that order.
pub type ImageUrls = [String; IMAGES_PER_RECIPE];

pub const PLACEHOLDER_IMAGES: [&str; IMAGES_PER_RECIPE] = [
    "https://via.placeholder.com/640x480/FFE4B5/8B4513?text=Recipe+Image",
    "https://via.placeholder.com/640x480/F0E68C/8B4513?text=Ingredients",
    "https://via.placeholder.com/640x480/DDA0DD/8B4513?text=Cooking+Process",
];

#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search_food_images(&self, term: &str) -> ImageUrls;
}

pub fn placeholder_images() -> ImageUrls {
    PLACEHOLDER_IMAGES.map(String::from)
}

pub fn is_placeholder(url: &str) -> bool {
    PLACEHOLDER_IMAGES.contains(&url)
}

/// Takes the first `IMAGES_PER_RECIPE` URLs; empty slots get the placeholder
/// for that role.
pub fn fill_image_slots(urls: Vec<String>) -> ImageUrls {
    let mut urls = urls.into_iter();
    std::array::from_fn(|i| {
        urls.next()
            .unwrap_or_else(|| PLACEHOLDER_IMAGES[i].to_string())
    })
}
