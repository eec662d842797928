//! User profile record.
//!
//! A profile is created with the starter values on first launch and is
//! updated as workouts are logged.

use crate::store::{keys, load_record, save_record, KeyValueStore};
use crate::workout::WorkoutSession;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: bool,
    pub units: Units,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            notifications: true,
            units: Units::Metric,
        }
    }
}

/// The `healthAkhadaUser` record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub join_date: DateTime<Utc>,
    pub membership_tier: String,
    pub energy_score: u32,
    pub streak: u32,
    pub total_workouts: u32,
    pub total_hours: f64,
    pub calories_burned: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_days: Option<u32>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl UserProfile {
    /// Starter profile for a first launch
    pub fn starter(now: DateTime<Utc>) -> Self {
        Self {
            id: format!("user_{}", now.timestamp_millis()),
            name: "Warrior".into(),
            email: "warrior@healthakhada.com".into(),
            join_date: now,
            membership_tier: "Gold".into(),
            energy_score: 87,
            streak: 45,
            total_workouts: 127,
            total_hours: 89.5,
            calories_burned: 42800,
            active_days: None,
            preferences: Preferences::default(),
        }
    }

    /// Load the stored profile, creating and persisting the starter profile
    /// if none exists
    pub fn load_or_create(store: &mut dyn KeyValueStore, now: DateTime<Utc>) -> Result<Self> {
        if let Some(profile) = load_record::<UserProfile>(store, keys::USER) {
            return Ok(profile);
        }

        tracing::info!("No user profile found, creating starter profile");
        let profile = Self::starter(now);
        profile.save(store)?;
        Ok(profile)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, keys::USER, self)
    }

    pub fn set_energy_score(&mut self, score: u32) {
        tracing::info!("Energy score {} -> {}", self.energy_score, score);
        self.energy_score = score;
    }

    /// Add a finished session to the lifetime totals
    pub fn record_workout(&mut self, session: &WorkoutSession) {
        self.total_workouts = self.total_workouts.saturating_add(1);
        self.total_hours += session.duration.unwrap_or(0.0) / 3600.0;
        self.calories_burned = self
            .calories_burned
            .saturating_add(u64::from(session.calories_burned));
    }
}
