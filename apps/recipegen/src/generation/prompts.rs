// Prompt templates for recipe generation.
// Templates are plain constants; the build_* functions fill them and are pure,
// so every prompt can be checked without a live model.

use crate::config::RecipeSettings;
use crate::images::ImageUrls;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};

/// Replace: {keyword}, {plain_text_instruction}
pub const SEARCH_TERM_PROMPT_TEMPLATE: &str = r#"Extract the best single search term from '{keyword}' for food photography search on Pixabay.

Rules:
- Return only 1-2 words maximum
- Focus on the main food item or cooking method
- Avoid overly specific terms
- Ensure good image results

Examples:
- "grilled chicken breast" -> "grilled chicken"
- "chocolate chip cookies" -> "chocolate cookies"
- "beef stir fry" -> "stir fry"

{plain_text_instruction}"#;

/// Replace: {keyword}, {min_ingredients}, {max_ingredients}, {min_steps},
///          {max_steps}, {variation_count}, {storage_sections}, {faq_count},
///          {tips_count}, {json_only_instruction}
pub const RECIPE_PROMPT_TEMPLATE: &str = r#"You are a professional recipe developer. Create a comprehensive recipe for "{keyword}".

Requirements:
- Compelling title including the keyword
- Realistic difficulty, timing, servings
- {min_ingredients}-{max_ingredients} ingredients
- {min_steps}-{max_steps} detailed cooking steps
- 2-paragraph introduction
- Accurate nutrition information
- {variation_count} recipe variations
- {storage_sections} storage sections
- {faq_count} practical FAQs
- {tips_count} professional tips

{json_only_instruction}
Use this exact JSON structure:
{
    "title": "Recipe title with keyword",
    "rating": 4.7,
    "review_count": 156,
    "difficulty": "Easy|Medium|Hard",
    "prep_time": 15,
    "cook_time": 25,
    "total_time": 40,
    "servings": 4,
    "introduction": {
        "paragraph1": "First intro paragraph (100-120 words)...",
        "paragraph2": "Second intro paragraph (80-100 words)..."
    },
    "ingredients": [
        "ingredient 1 with measurements",
        "ingredient 2 with measurements"
    ],
    "instructions": [
        "Step 1: Detailed instruction...",
        "Step 2: Detailed instruction..."
    ],
    "nutrition": {
        "calories": 165,
        "total_fat": "8g (10% DV)",
        "saturated_fat": "1.5g (8% DV)",
        "cholesterol": "65mg (22% DV)",
        "sodium": "590mg (26% DV)",
        "total_carbs": "1g (0% DV)",
        "fiber": "0g (0% DV)",
        "sugars": "0g",
        "protein": "25g (50% DV)"
    },
    "variations": [
        {"title": "Variation Name", "description": "Detailed description (50-70 words)..."}
    ],
    "storage": [
        {"title": "Storage Section Title", "content": "Detailed storage info (60-80 words)..."}
    ],
    "faqs": [
        {"question": "Practical cooking question?", "answer": "Helpful detailed answer (40-60 words)..."}
    ],
    "tips": [
        {"title": "Pro Tip Title", "content": "Actionable tip content (40-60 words)..."}
    ]
}

prep_time, cook_time and total_time are whole minutes."#;

/// Replace: {keyword}, {recipe_json}, {target_min}, {target_max}, {json_only_instruction}
pub const SEO_PROMPT_TEMPLATE: &str = r#"Enhance the recipe content for SEO optimization with keyword "{keyword}".

Current recipe: {recipe_json}

SEO Requirements:
- Naturally integrate "{keyword}" exactly {target_min}-{target_max} times throughout content
- Expand variations to 2-3 sentences each with specific ingredients and serving suggestions
- Make storage instructions more comprehensive (3-4 sentences each)
- Ensure FAQs address common cooking concerns
- Make tips practical and actionable
- Maintain natural language flow
- Keep JSON structure identical

Return the enhanced recipe in the same JSON format.
{json_only_instruction}"#;

/// Replace: {keyword}, {hero_url}, {ingredients_url}, {process_url}
pub const ALT_TEXT_PROMPT_TEMPLATE: &str = r#"Generate 3 SEO-friendly alt text descriptions for "{keyword}" recipe images.

Images are positioned:
1. Hero image (after recipe info): {hero_url}
2. Ingredients image (after ingredients section): {ingredients_url}
3. Process/final dish image (after cooking steps): {process_url}

Requirements:
- Include "{keyword}" naturally in each alt text
- 8-12 words per alt text
- Descriptive but concise
- SEO-optimized

Respond with only 3 lines, one alt text per line."#;

pub fn build_search_term_prompt(keyword: &str) -> String {
    SEARCH_TERM_PROMPT_TEMPLATE
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
        .replace("{keyword}", keyword)
}

pub fn build_recipe_prompt(keyword: &str, settings: &RecipeSettings) -> String {
    RECIPE_PROMPT_TEMPLATE
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{min_ingredients}", &settings.min_ingredients.to_string())
        .replace("{max_ingredients}", &settings.max_ingredients.to_string())
        .replace("{min_steps}", &settings.min_steps.to_string())
        .replace("{max_steps}", &settings.max_steps.to_string())
        .replace("{variation_count}", &settings.variation_count.to_string())
        .replace("{storage_sections}", &settings.storage_sections.to_string())
        .replace("{faq_count}", &settings.faq_count.to_string())
        .replace("{tips_count}", &settings.tips_count.to_string())
        .replace("{keyword}", keyword)
}

/// `recipe_json` is substituted last so placeholder-like text inside the
/// recipe is never rewritten.
pub fn build_seo_prompt(keyword: &str, recipe_json: &str, settings: &RecipeSettings) -> String {
    SEO_PROMPT_TEMPLATE
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{target_min}", &settings.keyword_target.to_string())
        .replace("{target_max}", &(settings.keyword_target + 1).to_string())
        .replace("{keyword}", keyword)
        .replace("{recipe_json}", recipe_json)
}

pub fn build_alt_text_prompt(keyword: &str, image_urls: &ImageUrls) -> String {
    let [hero, ingredients, process] = image_urls;
    ALT_TEXT_PROMPT_TEMPLATE
        .replace("{hero_url}", hero)
        .replace("{ingredients_url}", ingredients)
        .replace("{process_url}", process)
        .replace("{keyword}", keyword)
}
