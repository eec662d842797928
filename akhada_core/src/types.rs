//! Core domain types for the body intelligence engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Ring readings (the biometric snapshot and its categorical inputs)
//! - Readiness classifications (NADI, AGNI, SHAKTI)
//! - Workout recommendations and the persisted assessment record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Ring Reading Inputs
// ============================================================================

/// Self-reported or ring-estimated stress level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

/// Training load accumulated over the last week
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrainingLoad {
    Low,
    Medium,
    High,
}

/// Direction the athlete's readings have been moving
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Trend {
    Declining,
    Stable,
    Improving,
}

impl FromStr for StressLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(StressLevel::Low),
            "medium" => Ok(StressLevel::Medium),
            "high" => Ok(StressLevel::High),
            other => Err(crate::Error::Other(format!("Unknown stress level: {}", other))),
        }
    }
}

impl FromStr for TrainingLoad {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TrainingLoad::Low),
            "medium" => Ok(TrainingLoad::Medium),
            "high" => Ok(TrainingLoad::High),
            other => Err(crate::Error::Other(format!("Unknown training load: {}", other))),
        }
    }
}

impl FromStr for Trend {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "declining" => Ok(Trend::Declining),
            "stable" => Ok(Trend::Stable),
            "improving" => Ok(Trend::Improving),
            other => Err(crate::Error::Other(format!("Unknown trend: {}", other))),
        }
    }
}

/// One point-in-time set of readings from the Gabbit ring
///
/// Field names on the wire match the `gabbitRingData` record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BiometricSnapshot {
    #[serde(rename = "lastSync")]
    pub last_sync: DateTime<Utc>,
    /// Heart rate variability (ms)
    pub hrv: f64,
    /// Resting heart rate (bpm)
    #[serde(rename = "restingHR")]
    pub resting_hr: f64,
    /// Body temperature (°C)
    #[serde(rename = "bodyTemp")]
    pub body_temp: f64,
    /// Sleep quality, 0-100
    #[serde(rename = "sleepQuality")]
    pub sleep_quality: f64,
    /// Sleep duration (hours)
    #[serde(rename = "sleepDuration")]
    pub sleep_duration: f64,
    #[serde(rename = "stressLevel")]
    pub stress_level: StressLevel,
    /// Recovery score, 0-100
    #[serde(rename = "recoveryScore")]
    pub recovery_score: f64,
    #[serde(rename = "weeklyLoad")]
    pub weekly_load: TrainingLoad,
    pub trend: Trend,
}

impl BiometricSnapshot {
    /// Compiled-in readings used before the first sync and whenever the
    /// stored record is unusable.
    pub fn baseline(now: DateTime<Utc>) -> Self {
        Self {
            last_sync: now,
            hrv: 42.0,
            resting_hr: 58.0,
            body_temp: 36.7,
            sleep_quality: 85.0,
            sleep_duration: 7.2,
            stress_level: StressLevel::Low,
            recovery_score: 78.0,
            weekly_load: TrainingLoad::Medium,
            trend: Trend::Stable,
        }
    }

    /// True when every numeric reading is finite
    pub fn is_finite(&self) -> bool {
        [
            self.hrv,
            self.resting_hr,
            self.body_temp,
            self.sleep_quality,
            self.sleep_duration,
            self.recovery_score,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

// ============================================================================
// Readiness Classifications
// ============================================================================

/// Nervous-system readiness
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum NadiStatus {
    Push,
    Normal,
    Protect,
}

/// Metabolic state
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgniStatus {
    High,
    Medium,
    Low,
}

/// Training readiness
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShaktiStatus {
    Push,
    Normal,
    Deload,
}

impl NadiStatus {
    pub const ALL: [NadiStatus; 3] = [NadiStatus::Push, NadiStatus::Normal, NadiStatus::Protect];

    pub fn as_str(&self) -> &'static str {
        match self {
            NadiStatus::Push => "PUSH",
            NadiStatus::Normal => "NORMAL",
            NadiStatus::Protect => "PROTECT",
        }
    }
}

impl AgniStatus {
    pub const ALL: [AgniStatus; 3] = [AgniStatus::High, AgniStatus::Medium, AgniStatus::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgniStatus::High => "HIGH",
            AgniStatus::Medium => "MEDIUM",
            AgniStatus::Low => "LOW",
        }
    }
}

impl ShaktiStatus {
    pub const ALL: [ShaktiStatus; 3] = [
        ShaktiStatus::Push,
        ShaktiStatus::Normal,
        ShaktiStatus::Deload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShaktiStatus::Push => "PUSH",
            ShaktiStatus::Normal => "NORMAL",
            ShaktiStatus::Deload => "DELOAD",
        }
    }
}

impl fmt::Display for NadiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AgniStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ShaktiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three classifications derived from one snapshot
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReadinessState {
    pub nadi: NadiStatus,
    pub agni: AgniStatus,
    pub shakti: ShaktiStatus,
}

// ============================================================================
// Recommendation Types
// ============================================================================

/// A suggested workout with the reasoning shown to the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutRecommendation {
    pub workout: String,
    pub reason: String,
}

/// Persisted result of one assessment (`bodyIntelligence` record)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyIntelligence {
    pub nadi: NadiStatus,
    pub agni: AgniStatus,
    pub shakti: ShaktiStatus,
    pub recommendation: WorkoutRecommendation,
    pub timestamp: DateTime<Utc>,
}

impl BodyIntelligence {
    pub fn readiness(&self) -> ReadinessState {
        ReadinessState {
            nadi: self.nadi,
            agni: self.agni,
            shakti: self.shakti,
        }
    }
}
