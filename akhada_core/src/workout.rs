//! Workout sessions and training history.
//!
//! This module covers:
//! - Live sessions (exercises, sets, form score, calorie estimate)
//! - The stored workout log with personal records
//! - Simulated form analysis
//! - CSV export of finished sessions

use crate::store::{keys, load_record, save_record, KeyValueStore};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::Path;

/// One performed set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub reps: u32,
    pub weight: f64,
    pub timestamp: DateTime<Utc>,
}

/// An exercise within a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    pub name: String,
    pub sets: Vec<SetEntry>,
    pub timestamp: DateTime<Utc>,
}

/// A workout session, live or finished
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub exercises: Vec<ExerciseEntry>,
    pub total_reps: u32,
    pub total_sets: u32,
    pub calories_burned: u32,
    pub form_score: u32,
    pub is_active: bool,
    /// Session length in seconds, set when the session ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl WorkoutSession {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: format!("workout_{}", now.timestamp_millis()),
            start_time: now,
            end_time: None,
            exercises: Vec::new(),
            total_reps: 0,
            total_sets: 0,
            calories_burned: 0,
            form_score: 0,
            is_active: true,
            duration: None,
        }
    }

    pub fn add_exercise(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.exercises.push(ExerciseEntry {
            name: name.into(),
            sets: Vec::new(),
            timestamp: now,
        });
    }

    /// Record a set against the first exercise with this name
    ///
    /// Returns `Ok(false)` (and records nothing) if the exercise was never
    /// added. Fails without recording if the session totals would overflow.
    pub fn add_set(
        &mut self,
        exercise_name: &str,
        reps: u32,
        weight: f64,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let Some(exercise) = self.exercises.iter_mut().find(|e| e.name == exercise_name) else {
            tracing::debug!("Ignoring set for unknown exercise {}", exercise_name);
            return Ok(false);
        };

        let (Some(total_reps), Some(total_sets)) =
            (self.total_reps.checked_add(reps), self.total_sets.checked_add(1))
        else {
            return Err(Error::Tracker(format!(
                "too many reps in session {}: {} + {}",
                self.id, self.total_reps, reps
            )));
        };

        exercise.sets.push(SetEntry {
            reps,
            weight,
            timestamp: now,
        });
        self.total_sets = total_sets;
        self.total_reps = total_reps;
        Ok(true)
    }

    pub fn update_form_score(&mut self, score: u32) {
        self.form_score = score;
    }

    /// Close the session and compute its duration and calories
    pub fn end_session(&mut self, now: DateTime<Utc>) -> Result<&Self> {
        if !self.is_active {
            return Err(Error::Tracker(format!("session {} already ended", self.id)));
        }

        self.end_time = Some(now);
        self.is_active = false;
        self.duration = Some((now - self.start_time).num_milliseconds() as f64 / 1000.0);
        self.calories_burned = self.calculate_calories();

        tracing::info!(
            "Ended session {}: {} sets, {} reps, {} kcal",
            self.id,
            self.total_sets,
            self.total_reps,
            self.calories_burned
        );
        Ok(self)
    }

    /// Calorie estimate: minutes × 12 with form above 80, else minutes × 8
    pub fn calculate_calories(&self) -> u32 {
        let minutes = self.duration.unwrap_or(0.0) / 60.0;
        let factor = if self.form_score > 80 { 12.0 } else { 8.0 };
        (minutes * factor).round().max(0.0) as u32
    }
}

/// Best lifts in kilograms
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecords {
    pub bench_press: f64,
    pub squat: f64,
    pub deadlift: f64,
}

impl Default for PersonalRecords {
    fn default() -> Self {
        Self {
            bench_press: 85.0,
            squat: 120.0,
            deadlift: 140.0,
        }
    }
}

/// The `healthAkhadaWorkouts` record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    /// Session left open by the dashboard's live tracker
    ///
    /// The CLI only logs finished sessions, so it never opens one here. The
    /// field is carried through load and save untouched, and `record`
    /// clears it once that session is finished.
    #[serde(default)]
    pub current_workout: Option<WorkoutSession>,
    #[serde(default)]
    pub workout_history: Vec<WorkoutSession>,
    #[serde(default)]
    pub personal_records: PersonalRecords,
}

impl WorkoutLog {
    /// Stored log, or an empty log with starter records
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_record(store, keys::WORKOUTS).unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, keys::WORKOUTS, self)
    }

    /// Append a finished session to the history
    pub fn record(&mut self, session: WorkoutSession) -> Result<()> {
        if session.is_active {
            return Err(Error::Tracker(format!(
                "session {} is still active",
                session.id
            )));
        }
        if self.current_workout.as_ref().is_some_and(|w| w.id == session.id) {
            self.current_workout = None;
        }
        self.workout_history.push(session);
        Ok(())
    }
}

/// Calorie estimate for a workout of a given intensity label
///
/// `low` burns 5 kcal/min, `medium` 8, `high` 12. Unknown labels count as
/// medium.
pub fn calories_burned(duration_minutes: f64, intensity: &str) -> u32 {
    let factor = match intensity {
        "low" => 5.0,
        "medium" => 8.0,
        "high" => 12.0,
        _ => 8.0,
    };
    (duration_minutes * factor).round().max(0.0) as u32
}

/// `H:MM:SS` for an hour or more, otherwise `M:SS`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// A coaching cue raised by the form analyzer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FormCorrection {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Simulated form scoring (no pose detection behind it)
#[derive(Clone, Debug, Default)]
pub struct FormAnalyzer {
    pub current_score: u32,
    pub corrections: Vec<FormCorrection>,
    pub rep_count: u32,
}

impl FormAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a score in [75, 95) and queue corrections for weak form
    pub fn analyze<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) -> u32 {
        let score = 75 + rng.gen_range(0u32..20);
        self.current_score = score;

        if score < 80 {
            self.add_correction("Keep your back straight", now);
        }
        if score < 70 {
            self.add_correction("Lower your hips more", now);
        }

        score
    }

    pub fn add_correction(&mut self, message: &str, now: DateTime<Utc>) {
        self.corrections.push(FormCorrection {
            message: message.into(),
            timestamp: now,
        });
    }

    pub fn increment_rep(&mut self) {
        self.rep_count += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A row in the CSV export
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: String,
    start_time: String,
    end_time: Option<String>,
    duration_seconds: Option<u64>,
    exercises: String,
    total_sets: u32,
    total_reps: u32,
    form_score: u32,
    calories_burned: u32,
}

impl From<&WorkoutSession> for CsvRow {
    fn from(session: &WorkoutSession) -> Self {
        CsvRow {
            id: session.id.clone(),
            start_time: session.start_time.to_rfc3339(),
            end_time: session.end_time.map(|t| t.to_rfc3339()),
            duration_seconds: session.duration.map(|d| d.round() as u64),
            exercises: session
                .exercises
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(";"),
            total_sets: session.total_sets,
            total_reps: session.total_reps,
            form_score: session.form_score,
            calories_burned: session.calories_burned,
        }
    }
}

/// Session ids already present in an existing export
fn exported_ids(csv_path: &Path) -> Result<HashSet<String>> {
    if !csv_path.exists() {
        return Ok(HashSet::new());
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut ids = HashSet::new();
    for row in reader.deserialize::<CsvRow>() {
        ids.insert(row?.id);
    }
    Ok(ids)
}

/// Append finished sessions from the log to a CSV file
///
/// Sessions whose id is already in the file are skipped, so repeated
/// exports only add new sessions. Headers are written only when the file is
/// new or empty. Returns the number of rows written.
pub fn export_history_csv(log: &WorkoutLog, csv_path: &Path) -> Result<usize> {
    let already = exported_ids(csv_path)?;
    let pending: Vec<_> = log
        .workout_history
        .iter()
        .filter(|s| !s.is_active && !already.contains(&s.id))
        .collect();

    if pending.is_empty() {
        tracing::info!("No new finished sessions to export");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for session in &pending {
        writer.serialize(CsvRow::from(*session))?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| Error::Other(format!("Failed to finish CSV export: {}", e)))?
        .sync_all()?;

    tracing::info!(
        "Exported {} sessions to {:?} ({} already present)",
        pending.len(),
        csv_path,
        already.len()
    );
    Ok(pending.len())
}
