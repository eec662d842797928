//! Body progress tracking and achievements.
//!
//! Progress entries (weights, measurements, photos) are append-only.
//! Achievements are unlocked at most once and never revoked.

use crate::profile::UserProfile;
use crate::store::{keys, load_record, save_record, KeyValueStore};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Active days assumed when the profile does not track them yet
const DEFAULT_ACTIVE_DAYS: u32 = 45;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub value: f64,
    pub date: DateTime<Utc>,
    /// Recording time, milliseconds since the epoch
    pub timestamp: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub date: DateTime<Utc>,
    pub timestamp: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressPhoto {
    pub url: String,
    pub notes: String,
    pub date: DateTime<Utc>,
    pub timestamp: i64,
}

/// The `progressTracker` record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ProgressTracker {
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
    #[serde(default)]
    pub photos: Vec<ProgressPhoto>,
    /// Ids of unlocked achievements, in unlock order
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl ProgressTracker {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_record(store, keys::PROGRESS).unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, keys::PROGRESS, self)
    }

    /// Record a body weight taken on `date`
    pub fn add_weight(&mut self, value: f64, date: DateTime<Utc>, now: DateTime<Utc>) {
        self.weights.push(WeightEntry {
            value,
            date,
            timestamp: now.timestamp_millis(),
        });
    }

    pub fn add_measurement(
        &mut self,
        kind: impl Into<String>,
        value: f64,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        self.measurements.push(Measurement {
            kind: kind.into(),
            value,
            date,
            timestamp: now.timestamp_millis(),
        });
    }

    pub fn add_photo(
        &mut self,
        url: impl Into<String>,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.photos.push(ProgressPhoto {
            url: url.into(),
            notes: notes.into(),
            date: now,
            timestamp: now.timestamp_millis(),
        });
    }

    /// Returns true if the achievement was newly unlocked
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        if self.achievements.iter().any(|a| a == id) {
            return false;
        }
        self.achievements.push(id.to_string());
        true
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Weights ordered by recording time, oldest first
    pub fn weight_progress(&self) -> Vec<&WeightEntry> {
        let mut weights: Vec<_> = self.weights.iter().collect();
        weights.sort_by_key(|w| w.timestamp);
        weights
    }

    /// Most recently appended weight
    pub fn current_weight(&self) -> Option<f64> {
        self.weights.last().map(|w| w.value)
    }
}

// ============================================================================
// Achievements
// ============================================================================

/// Inputs for achievement rules
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AchievementStats {
    pub total_workouts: u32,
    pub streak: u32,
    pub active_days: u32,
    pub goal_weight_reached: bool,
}

impl AchievementStats {
    /// Goal weight is not tracked yet, so it is never reached
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            total_workouts: profile.total_workouts,
            streak: profile.streak,
            active_days: profile.active_days.unwrap_or(DEFAULT_ACTIVE_DAYS),
            goal_weight_reached: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AchievementRule {
    TotalWorkouts(u32),
    Streak(u32),
    ActiveDays(u32),
    GoalWeight,
}

impl AchievementRule {
    pub fn is_met(&self, stats: &AchievementStats) -> bool {
        match *self {
            AchievementRule::TotalWorkouts(n) => stats.total_workouts >= n,
            AchievementRule::Streak(n) => stats.streak >= n,
            AchievementRule::ActiveDays(n) => stats.active_days >= n,
            AchievementRule::GoalWeight => stats.goal_weight_reached,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: AchievementRule,
}

pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: "first_workout",
        name: "First Workout",
        description: "Complete your first workout",
        icon: "🏆",
        rule: AchievementRule::TotalWorkouts(1),
    },
    Achievement {
        id: "week_streak",
        name: "7 Day Streak",
        description: "Maintain a 7-day workout streak",
        icon: "🔥",
        rule: AchievementRule::Streak(7),
    },
    Achievement {
        id: "fifty_workouts",
        name: "50 Workouts",
        description: "Complete 50 workouts",
        icon: "💪",
        rule: AchievementRule::TotalWorkouts(50),
    },
    Achievement {
        id: "hundred_workouts",
        name: "100 Workouts",
        description: "Complete 100 workouts",
        icon: "⚡",
        rule: AchievementRule::TotalWorkouts(100),
    },
    Achievement {
        id: "goal_weight",
        name: "Goal Weight",
        description: "Reach your goal weight",
        icon: "🎯",
        rule: AchievementRule::GoalWeight,
    },
    Achievement {
        id: "year_active",
        name: "365 Days",
        description: "Stay active for a full year",
        icon: "👑",
        rule: AchievementRule::ActiveDays(365),
    },
];

pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Unlock every achievement whose rule is met
///
/// Returns only the achievements unlocked by this call.
pub fn check_achievements(
    stats: &AchievementStats,
    tracker: &mut ProgressTracker,
) -> Vec<&'static Achievement> {
    let mut unlocked = Vec::new();

    for achievement in ACHIEVEMENTS.iter() {
        if achievement.rule.is_met(stats) && tracker.unlock_achievement(achievement.id) {
            tracing::info!("Achievement unlocked: {}", achievement.name);
            unlocked.push(achievement);
        }
    }

    unlocked
}
