//! Built-in reference foods for offline browsing and demos.
//!
//! Values are per serving. Codes are the catalog's own and do not match the
//! backend's food codes.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

use crate::net::types::FoodResponse;

/// A food with per-serving nutrients. Calories in kcal, sodium in mg,
/// everything else in grams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub code: String,
    pub name: String,
    pub category: String,
    pub serving_size: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl From<FoodResponse> for Food {
    fn from(resp: FoodResponse) -> Self {
        Self {
            code: resp.code,
            name: resp.name,
            category: resp.category,
            serving_size: resp.standard,
            calories: resp.kcal,
            carbs: resp.carb,
            protein: resp.protein,
            fat: resp.fat,
            sugar: resp.sugar,
            sodium: resp.natrium,
        }
    }
}

const CATEGORIES: [&str; 11] = [
    "Rice",
    "Meat",
    "Vegetables",
    "Fish",
    "Eggs/Dairy",
    "Fruit",
    "Snacks",
    "Nuts",
    "Noodles",
    "Tofu/Beans",
    "Bread",
];

// (code, name, category, serving, kcal, carbs, protein, fat, sugar, sodium)
type Row = (&'static str, &'static str, &'static str, &'static str, f64, f64, f64, f64, f64, f64);

const FOODS: [Row; 31] = [
    ("1", "White rice", "Rice", "1 bowl (210g)", 310.0, 68.0, 6.0, 0.5, 0.1, 2.0),
    ("2", "Brown rice", "Rice", "1 bowl (210g)", 330.0, 70.0, 7.0, 2.0, 0.2, 3.0),
    ("3", "Multigrain rice", "Rice", "1 bowl (210g)", 320.0, 69.0, 8.0, 1.5, 0.3, 5.0),
    ("4", "Chicken breast", "Meat", "100g", 165.0, 0.0, 31.0, 3.6, 0.0, 74.0),
    ("5", "Beef sirloin", "Meat", "100g", 250.0, 0.0, 26.0, 16.0, 0.0, 60.0),
    ("6", "Pork belly", "Meat", "100g", 331.0, 0.0, 17.0, 29.0, 0.0, 65.0),
    ("7", "Broccoli", "Vegetables", "100g", 34.0, 7.0, 2.8, 0.4, 1.7, 33.0),
    ("8", "Spinach", "Vegetables", "100g", 23.0, 3.6, 2.9, 0.4, 0.4, 79.0),
    ("9", "Cabbage", "Vegetables", "100g", 25.0, 5.8, 1.3, 0.1, 3.2, 18.0),
    ("10", "Salad", "Vegetables", "1 plate (200g)", 50.0, 10.0, 3.0, 0.5, 4.0, 30.0),
    ("11", "Salmon", "Fish", "100g", 208.0, 0.0, 20.0, 13.0, 0.0, 59.0),
    ("12", "Mackerel", "Fish", "100g", 205.0, 0.0, 19.0, 14.0, 0.0, 90.0),
    ("13", "Canned tuna", "Fish", "1 can (100g)", 116.0, 0.0, 26.0, 0.8, 0.0, 320.0),
    ("14", "Egg", "Eggs/Dairy", "1 egg (60g)", 90.0, 0.6, 7.5, 6.0, 0.6, 70.0),
    ("15", "Milk", "Eggs/Dairy", "1 cup (200ml)", 122.0, 9.0, 6.0, 6.4, 9.0, 90.0),
    ("16", "Greek yogurt", "Eggs/Dairy", "1 cup (170g)", 100.0, 6.0, 17.0, 0.7, 4.0, 60.0),
    ("17", "Apple", "Fruit", "1 apple (200g)", 104.0, 28.0, 0.5, 0.3, 21.0, 2.0),
    ("18", "Banana", "Fruit", "1 banana (120g)", 105.0, 27.0, 1.3, 0.4, 14.0, 1.0),
    ("19", "Strawberry", "Fruit", "100g", 32.0, 7.7, 0.7, 0.3, 4.9, 1.0),
    ("20", "Almonds", "Nuts", "30g", 170.0, 6.0, 6.0, 15.0, 1.2, 0.0),
    ("21", "Protein bar", "Snacks", "1 bar (60g)", 200.0, 20.0, 20.0, 7.0, 5.0, 180.0),
    ("22", "Dark chocolate", "Snacks", "30g", 170.0, 13.0, 2.0, 12.0, 10.0, 6.0),
    ("23", "Spaghetti", "Noodles", "1 serving (80g)", 280.0, 56.0, 10.0, 1.5, 2.0, 5.0),
    ("24", "Udon", "Noodles", "1 serving (200g)", 260.0, 54.0, 8.0, 1.0, 3.0, 800.0),
    ("25", "Instant ramen", "Noodles", "1 pack (120g)", 500.0, 70.0, 10.0, 20.0, 5.0, 1800.0),
    ("26", "Tofu", "Tofu/Beans", "1/3 block (100g)", 76.0, 1.9, 8.5, 4.2, 0.6, 7.0),
    ("27", "Chickpeas", "Tofu/Beans", "100g", 164.0, 27.0, 9.0, 2.6, 4.8, 7.0),
    ("28", "Lentils", "Tofu/Beans", "100g", 116.0, 20.0, 9.0, 0.4, 1.8, 2.0),
    ("29", "White bread", "Bread", "1 slice (30g)", 80.0, 15.0, 2.5, 1.0, 2.0, 150.0),
    ("30", "Whole wheat bread", "Bread", "1 slice (30g)", 70.0, 13.0, 3.0, 1.0, 1.5, 130.0),
    ("31", "Bagel", "Bread", "1 bagel (90g)", 245.0, 48.0, 9.0, 1.5, 5.0, 430.0),
];

/// All reference foods, in catalog order.
#[must_use]
pub fn mock_foods() -> Vec<Food> {
    FOODS
        .iter()
        .map(|&(code, name, category, serving, calories, carbs, protein, fat, sugar, sodium)| Food {
            code: code.to_owned(),
            name: name.to_owned(),
            category: category.to_owned(),
            serving_size: serving.to_owned(),
            calories,
            carbs,
            protein,
            fat,
            sugar,
            sodium,
        })
        .collect()
}

/// Category names in display order.
#[must_use]
pub fn categories() -> &'static [&'static str] {
    &CATEGORIES
}

/// Case-insensitive name search with an optional exact category filter.
/// A blank keyword matches every food.
#[must_use]
pub fn search(keyword: Option<&str>, category: Option<&str>) -> Vec<Food> {
    let needle = keyword.map(|k| k.trim().to_lowercase()).unwrap_or_default();
    mock_foods()
        .into_iter()
        .filter(|food| needle.is_empty() || food.name.to_lowercase().contains(&needle))
        .filter(|food| category.is_none_or(|c| food.category == c))
        .collect()
}
