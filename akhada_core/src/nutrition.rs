//! Meal and water tracking.

use crate::store::{keys, load_record, save_record, KeyValueStore};
use crate::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged meal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub timestamp: DateTime<Utc>,
}

/// Nutrition values entered for a new meal
#[derive(Clone, Debug, Default)]
pub struct MealInput {
    pub name: String,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Macronutrient totals in grams
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// The `nutritionTracker` record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTracker {
    pub daily_goal: u32,
    #[serde(default)]
    pub meals: Vec<Meal>,
    /// Liters drunk so far
    #[serde(default)]
    pub water_intake: f64,
}

impl Default for NutritionTracker {
    fn default() -> Self {
        Self::new(2500)
    }
}

impl NutritionTracker {
    pub fn new(daily_goal: u32) -> Self {
        Self {
            daily_goal,
            meals: Vec::new(),
            water_intake: 0.0,
        }
    }

    /// Stored tracker, or a fresh one with `daily_goal`
    pub fn load(store: &dyn KeyValueStore, daily_goal: u32) -> Self {
        load_record(store, keys::NUTRITION).unwrap_or_else(|| Self::new(daily_goal))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, keys::NUTRITION, self)
    }

    pub fn add_meal(&mut self, input: MealInput, now: DateTime<Utc>) -> &Meal {
        tracing::info!("Logged meal {} ({} kcal)", input.name, input.calories);
        self.meals.push(Meal {
            id: Uuid::new_v4(),
            name: input.name,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fat: input.fat,
            timestamp: now,
        });
        &self.meals[self.meals.len() - 1]
    }

    /// Meals logged on the same calendar day as `now`, in `now`'s time zone
    pub fn todays_meals<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Meal> {
        let today = now.date_naive();
        let tz = now.timezone();
        self.meals
            .iter()
            .filter(|m| m.timestamp.with_timezone(&tz).date_naive() == today)
            .collect()
    }

    pub fn todays_calories<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u32 {
        self.todays_meals(now).iter().map(|m| m.calories).sum()
    }

    pub fn todays_macros<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Macros {
        self.todays_meals(now)
            .iter()
            .fold(Macros::default(), |acc, m| Macros {
                protein: acc.protein + m.protein,
                carbs: acc.carbs + m.carbs,
                fat: acc.fat + m.fat,
            })
    }

    /// Calories left before today's goal (zero once exceeded)
    pub fn remaining_calories<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u32 {
        self.daily_goal.saturating_sub(self.todays_calories(now))
    }

    pub fn add_water(&mut self, liters: f64) {
        self.water_intake += liters;
        tracing::debug!("Water intake now {:.2} L", self.water_intake);
    }
}
