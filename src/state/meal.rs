//! In-progress daily meal composition.
//!
//! Purely local: nothing here talks to the backend. `to_report_request`
//! produces the payload the report endpoint expects once the user submits.

#[cfg(test)]
#[path = "meal_test.rs"]
mod meal_test;

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::catalog::Food;
use crate::net::types::{MealType, ReportFoodItem, ReportMealItem, ReportRequest};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealTime {
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];
}

impl From<MealTime> for MealType {
    fn from(time: MealTime) -> Self {
        match time {
            MealTime::Breakfast => Self::Breakfast,
            MealTime::Lunch => Self::Lunch,
            MealTime::Dinner => Self::Dinner,
            MealTime::Snack => Self::Snack,
        }
    }
}

/// A food placed in a meal. `amount` is a multiple of the serving size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub food: Food,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMeal {
    pub breakfast: Vec<MealItem>,
    pub lunch: Vec<MealItem>,
    pub dinner: Vec<MealItem>,
    pub snack: Vec<MealItem>,
}

impl DailyMeal {
    #[must_use]
    pub fn items(&self, time: MealTime) -> &[MealItem] {
        match time {
            MealTime::Breakfast => &self.breakfast,
            MealTime::Lunch => &self.lunch,
            MealTime::Dinner => &self.dinner,
            MealTime::Snack => &self.snack,
        }
    }

    fn items_mut(&mut self, time: MealTime) -> &mut Vec<MealItem> {
        match time {
            MealTime::Breakfast => &mut self.breakfast,
            MealTime::Lunch => &mut self.lunch,
            MealTime::Dinner => &mut self.dinner,
            MealTime::Snack => &mut self.snack,
        }
    }
}

/// Summed nutrients. Sodium in mg, calories in kcal, the rest in grams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NutritionTotals {
    fn of(item: &MealItem) -> Self {
        let f = &item.food;
        Self {
            calories: f.calories * item.amount,
            carbs: f.carbs * item.amount,
            protein: f.protein * item.amount,
            fat: f.fat * item.amount,
            sugar: f.sugar * item.amount,
            sodium: f.sodium * item.amount,
        }
    }
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.carbs += rhs.carbs;
        self.protein += rhs.protein;
        self.fat += rhs.fat;
        self.sugar += rhs.sugar;
        self.sodium += rhs.sodium;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MealSummary {
    pub meal_time: MealTime,
    pub items: Vec<MealItem>,
    pub totals: NutritionTotals,
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MealStore {
    daily: DailyMeal,
    current: MealTime,
}

impl MealStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn daily_meal(&self) -> &DailyMeal {
        &self.daily
    }

    #[must_use]
    pub fn current_meal_time(&self) -> MealTime {
        self.current
    }

    pub fn set_current_meal_time(&mut self, time: MealTime) {
        self.current = time;
    }

    pub fn add_food_to_meal(&mut self, time: MealTime, item: MealItem) {
        self.daily.items_mut(time).push(item);
    }

    /// Out-of-range indices are ignored.
    pub fn remove_food_from_meal(&mut self, time: MealTime, index: usize) {
        let items = self.daily.items_mut(time);
        if index < items.len() {
            items.remove(index);
        }
    }

    /// Out-of-range indices are ignored.
    pub fn update_food_amount(&mut self, time: MealTime, index: usize, amount: f64) {
        if let Some(item) = self.daily.items_mut(time).get_mut(index) {
            item.amount = amount;
        }
    }

    pub fn clear_meal(&mut self, time: MealTime) {
        self.daily.items_mut(time).clear();
    }

    pub fn clear_all_meals(&mut self) {
        self.daily = DailyMeal::default();
    }

    // =========================================================================
    // TOTALS
    // =========================================================================

    #[must_use]
    pub fn meal_totals(&self, time: MealTime) -> NutritionTotals {
        let mut totals = NutritionTotals::default();
        for item in self.daily.items(time) {
            totals += NutritionTotals::of(item);
        }
        totals
    }

    #[must_use]
    pub fn daily_totals(&self) -> NutritionTotals {
        let mut totals = NutritionTotals::default();
        for time in MealTime::ALL {
            totals += self.meal_totals(time);
        }
        totals
    }

    /// One summary per meal time, breakfast first, empty meals included.
    #[must_use]
    pub fn summaries(&self) -> Vec<MealSummary> {
        MealTime::ALL
            .into_iter()
            .map(|time| MealSummary {
                meal_time: time,
                items: self.daily.items(time).to_vec(),
                totals: self.meal_totals(time),
            })
            .collect()
    }

    /// Build a report submission from the non-empty meals.
    #[must_use]
    pub fn to_report_request(&self, is_waited: bool) -> ReportRequest {
        let meals = MealTime::ALL
            .into_iter()
            .filter(|time| !self.daily.items(*time).is_empty())
            .map(|time| ReportMealItem {
                meal_type: time.into(),
                foods: self.daily.items(time).iter().map(report_item).collect(),
            })
            .collect();
        ReportRequest { is_waited, meals }
    }
}

fn report_item(item: &MealItem) -> ReportFoodItem {
    let totals = NutritionTotals::of(item);
    ReportFoodItem {
        food_code: Some(item.food.code.clone()),
        name: item.food.name.clone(),
        eaten_weight: item.amount,
        standard: None,
        kcal: totals.calories,
        carb: totals.carbs,
        protein: totals.protein,
        fat: totals.fat,
        sugar: totals.sugar,
        natrium: totals.sodium,
    }
}
