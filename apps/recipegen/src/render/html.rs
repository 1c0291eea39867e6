//! Standalone HTML page for one recipe, built with maud.
//!
//! Section order follows the reading order of a recipe blog post: header,
//! introduction, hero image, ingredients, ingredients image, instructions,
//! process image, then the supporting sections.

use maud::{html, Markup, DOCTYPE};
use serde_json::Value;

use super::{Image, RecipeDocument, RenderError, TemplateRenderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl TemplateRenderer for HtmlRenderer {
    /// Never fails: the markup is checked at compile time and every field of
    /// a validated recipe has a value.
    fn render(&self, document: &RecipeDocument) -> Result<String, RenderError> {
        Ok(page(document).into_string())
    }
}

fn page(doc: &RecipeDocument) -> Markup {
    let recipe = &doc.recipe;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (recipe.title) }
                meta name="description" content=(recipe.introduction.paragraph1);
                meta name="keywords" content=(doc.keyword);
            }
            body {
                article class="recipe" {
                    header {
                        h1 { (recipe.title) }
                        p class="rating" {
                            span class="stars" { (doc.stars) }
                            " " (recipe.rating) " (" (recipe.review_count) " reviews)"
                        }
                        dl class="meta" {
                            dt { "Difficulty" } dd { (recipe.difficulty.to_string()) }
                            dt { "Prep time" } dd { (recipe.prep_time) " min" }
                            dt { "Cook time" } dd { (recipe.cook_time) " min" }
                            dt { "Total time" } dd { (recipe.total_time) " min" }
                            dt { "Servings" } dd { (recipe.servings) }
                        }
                    }

                    section class="introduction" {
                        p { (recipe.introduction.paragraph1) }
                        p { (recipe.introduction.paragraph2) }
                    }

                    (figure("hero", &doc.images.hero))

                    section class="ingredients" {
                        h2 { "Ingredients" }
                        ul {
                            @for ingredient in &recipe.ingredients {
                                li { (ingredient) }
                            }
                        }
                    }

                    (figure("ingredients", &doc.images.ingredients))

                    section class="instructions" {
                        h2 { "Instructions" }
                        ol {
                            @for step in &recipe.instructions {
                                li { (step) }
                            }
                        }
                    }

                    (figure("process", &doc.images.process))

                    @if !recipe.variations.is_empty() {
                        section class="variations" {
                            h2 { "Variations" }
                            @for variation in &recipe.variations {
                                h3 { (variation.title) }
                                p { (variation.description) }
                            }
                        }
                    }

                    @if !recipe.storage.is_empty() {
                        section class="storage" {
                            h2 { "Storage" }
                            @for section in &recipe.storage {
                                h3 { (section.title) }
                                p { (section.content) }
                            }
                        }
                    }

                    @if !recipe.tips.is_empty() {
                        section class="tips" {
                            h2 { "Tips" }
                            @for tip in &recipe.tips {
                                h3 { (tip.title) }
                                p { (tip.content) }
                            }
                        }
                    }

                    @if !recipe.faqs.is_empty() {
                        section class="faqs" {
                            h2 { "Frequently Asked Questions" }
                            @for faq in &recipe.faqs {
                                details {
                                    summary { (faq.question) }
                                    p { (faq.answer) }
                                }
                            }
                        }
                    }

                    @if !recipe.nutrition.is_empty() {
                        section class="nutrition" {
                            h2 { "Nutrition" }
                            table {
                                @for (key, value) in &recipe.nutrition {
                                    tr {
                                        th { (nutrition_label(key)) }
                                        td { (nutrition_value(value)) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn figure(role: &str, image: &Image) -> Markup {
    html! {
        figure class=(format!("recipe-image {role}")) {
            img src=(image.url) alt=(image.alt) loading="lazy";
        }
    }
}

/// "total_fat" -> "Total Fat"
fn nutrition_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn nutrition_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecipeSettings;
    use crate::generation::content::fallback_alt_texts;
    use crate::generation::fixtures;
    use crate::generation::validator::validate_recipe;
    use crate::images::placeholder_images;
    use crate::models::RecipeDraft;
    use crate::render::ImageSet;

    fn document(json: &str) -> RecipeDocument {
        let draft: RecipeDraft = serde_json::from_str(json).unwrap();
        let recipe = validate_recipe(draft, &RecipeSettings::default());
        RecipeDocument::new(
            recipe,
            ImageSet::new(placeholder_images(), fallback_alt_texts("vegan tacos")),
            "vegan tacos",
        )
    }

    #[test]
    fn test_renders_complete_page() {
        let html = HtmlRenderer.render(&document(&fixtures::vegan_tacos_json())).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Easy Vegan Tacos with Smoky Black Beans</title>"));
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("(212 reviews)"));
        assert!(html.contains("<th>Total Fat</th><td>9g (12% DV)</td>"));
        assert!(html.contains("<th>Calories</th><td>320</td>"));
        assert_eq!(
            html.matches("<li>").count(),
            fixtures::INGREDIENTS + fixtures::STEPS
        );
        assert_eq!(html.matches("<details>").count(), fixtures::FAQS);
    }

    #[test]
    fn test_images_follow_section_order() {
        let html = HtmlRenderer.render(&document(&fixtures::vegan_tacos_json())).unwrap();
        let urls = placeholder_images();

        let hero = html.find(&urls[0]).unwrap();
        let ingredients_heading = html.find("<h2>Ingredients</h2>").unwrap();
        let ingredients_image = html.find(&urls[1]).unwrap();
        let instructions_heading = html.find("<h2>Instructions</h2>").unwrap();
        let process = html.find(&urls[2]).unwrap();

        assert!(hero < ingredients_heading);
        assert!(ingredients_heading < ingredients_image);
        assert!(ingredients_image < instructions_heading);
        assert!(instructions_heading < process);
        assert!(html.contains("alt=\"Fresh ingredients for vegan tacos recipe\""));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let html = HtmlRenderer
            .render(&document(r#"{"title": "Tacos <script>alert(1)</script>", "ingredients": ["salt & pepper"]}"#))
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("Tacos &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<li>salt &amp; pepper</li>"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let html = HtmlRenderer.render(&document("{}")).unwrap();
        assert!(!html.contains("class=\"faqs\""));
        assert!(!html.contains("class=\"nutrition\""));
        assert!(html.contains("<li>Missing ingredient 1</li>"));
    }

    #[test]
    fn test_blank_title_renders_with_default() {
        let html = HtmlRenderer.render(&document(r#"{"title": "   "}"#)).unwrap();
        assert!(html.contains("<title>Recipe Title</title>"));
        assert!(html.contains("<h1>Recipe Title</h1>"));
    }

    #[test]
    fn test_nutrition_label() {
        assert_eq!(nutrition_label("total_fat"), "Total Fat");
        assert_eq!(nutrition_label("calories"), "Calories");
        assert_eq!(nutrition_label("vitamin__c"), "Vitamin C");
    }
}
