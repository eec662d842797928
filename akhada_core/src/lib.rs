#![forbid(unsafe_code)]

//! Core domain model and business logic for Health Akhada.
//!
//! This crate provides:
//! - Domain types (ring snapshot, readiness states, recommendations)
//! - Simulated ring sync
//! - NADI / AGNI / SHAKTI classifiers and the recommendation table
//! - Key-value persistence of all records
//! - Profile, workout, nutrition and progress trackers

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod sensor;
pub mod readiness;
pub mod recommendation;
pub mod status_color;
pub mod store;
pub mod engine;
pub mod schedule;
pub mod profile;
pub mod workout;
pub mod nutrition;
pub mod progress;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use readiness::{classify_agni, classify_nadi, classify_shakti, evaluate, metabolic_score};
pub use recommendation::resolve;
pub use status_color::{color_for, StatusColor};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use engine::{assess, update_body_intelligence, BodyReport};
pub use schedule::RefreshSchedule;
pub use profile::UserProfile;
pub use workout::{WorkoutLog, WorkoutSession};
pub use nutrition::NutritionTracker;
pub use progress::ProgressTracker;
