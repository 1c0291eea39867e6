//! Model responses shared by the generation tests.

use serde_json::json;

pub const INGREDIENTS: usize = 8;
pub const STEPS: usize = 5;
pub const FAQS: usize = 7;
pub const TIPS: usize = 7;
pub const VARIATIONS: usize = 4;
pub const STORAGE: usize = 4;

/// A schema-complete recipe answer for "vegan tacos".
pub fn vegan_tacos_json() -> String {
    recipe_json("Easy Vegan Tacos with Smoky Black Beans")
}

/// Same shape as `vegan_tacos_json`, as returned by the SEO pass.
pub fn vegan_tacos_seo_json() -> String {
    recipe_json("The Best Vegan Tacos Recipe for Busy Weeknights")
}

fn recipe_json(title: &str) -> String {
    json!({
        "title": title,
        "rating": 4.8,
        "review_count": 212,
        "difficulty": "Easy",
        "prep_time": 15,
        "cook_time": 20,
        "total_time": 35,
        "servings": 4,
        "introduction": {
            "paragraph1": "These vegan tacos come together in thirty minutes.",
            "paragraph2": "Smoky beans and a bright slaw keep every bite interesting."
        },
        "ingredients": (1..=INGREDIENTS).map(|i| format!("ingredient {i}")).collect::<Vec<_>>(),
        "instructions": (1..=STEPS).map(|i| format!("Step {i}: do the thing")).collect::<Vec<_>>(),
        "nutrition": {
            "calories": 320,
            "total_fat": "9g (12% DV)",
            "protein": "12g (24% DV)"
        },
        "variations": (1..=VARIATIONS)
            .map(|i| json!({"title": format!("Variation {i}"), "description": "Swap the filling."}))
            .collect::<Vec<_>>(),
        "storage": (1..=STORAGE)
            .map(|i| json!({"title": format!("Storage {i}"), "content": "Keep it cold."}))
            .collect::<Vec<_>>(),
        "faqs": (1..=FAQS)
            .map(|i| json!({"question": format!("Question {i}?"), "answer": "Yes."}))
            .collect::<Vec<_>>(),
        "tips": (1..=TIPS)
            .map(|i| json!({"title": format!("Tip {i}"), "content": "Warm the tortillas."}))
            .collect::<Vec<_>>()
    })
    .to_string()
}

pub const ALT_TEXTS_RESPONSE: &str = "1. Plate of vegan tacos topped with fresh slaw and lime\n\
2. Fresh ingredients for vegan tacos laid out on a board\n\
3. Assembling vegan tacos step by step in a skillet";
