//! Workout recommendation table.
//!
//! Recommendations are looked up by the exact `(NADI, AGNI, SHAKTI)` triple.
//! Only nine triples have a dedicated entry; every other combination gets
//! the general fallback session.

use crate::{AgniStatus, NadiStatus, ShaktiStatus, WorkoutRecommendation};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Composite key of the recommendation table
pub type RecommendationKey = (NadiStatus, AgniStatus, ShaktiStatus);

const FALLBACK_WORKOUT: &str = "Moderate Training Session";
const FALLBACK_REASON: &str = "Listen to your body and train at a comfortable intensity.";

/// Cached recommendation table, built once on first lookup
static RECOMMENDATIONS: Lazy<HashMap<RecommendationKey, WorkoutRecommendation>> =
    Lazy::new(build_recommendation_table);

fn entry(workout: &str, reason: &str) -> WorkoutRecommendation {
    WorkoutRecommendation {
        workout: workout.into(),
        reason: reason.into(),
    }
}

fn build_recommendation_table() -> HashMap<RecommendationKey, WorkoutRecommendation> {
    use AgniStatus as A;
    use NadiStatus as N;
    use ShaktiStatus as S;

    let mut table = HashMap::new();

    table.insert(
        (N::Push, A::High, S::Push),
        entry(
            "High-Intensity Strength Training",
            "Your recovery is optimal and metabolic fire is high. Perfect day for heavy compound lifts.",
        ),
    );
    table.insert(
        (N::Push, A::High, S::Normal),
        entry(
            "Moderate Strength with Power Work",
            "Good recovery with high metabolism. Mix strength training with explosive movements.",
        ),
    );
    table.insert(
        (N::Push, A::Medium, S::Push),
        entry(
            "Balanced Strength & Conditioning",
            "Nervous system is ready. Focus on balanced training with moderate intensity.",
        ),
    );
    table.insert(
        (N::Normal, A::High, S::Push),
        entry(
            "Metabolic Conditioning",
            "High metabolic state. Great for circuit training and conditioning work.",
        ),
    );
    table.insert(
        (N::Normal, A::Medium, S::Normal),
        entry(
            "Moderate Training Session",
            "Balanced state. Stick to your regular training routine with moderate intensity.",
        ),
    );
    table.insert(
        (N::Normal, A::Low, S::Normal),
        entry(
            "Light Strength Training",
            "Metabolism is lower. Focus on technique and lighter weights today.",
        ),
    );
    table.insert(
        (N::Protect, A::Low, S::Deload),
        entry(
            "Active Recovery",
            "Your body needs recovery. Light mobility work, stretching, or yoga recommended.",
        ),
    );
    table.insert(
        (N::Protect, A::Medium, S::Deload),
        entry(
            "Recovery & Mobility",
            "Nervous system needs rest. Focus on recovery activities and light movement.",
        ),
    );
    table.insert(
        (N::Normal, A::Medium, S::Deload),
        entry(
            "Deload Week Training",
            "Time to reduce volume. Train at 60-70% intensity to allow recovery.",
        ),
    );

    table
}

/// The recommendation returned for any triple without a dedicated entry
pub fn fallback_recommendation() -> WorkoutRecommendation {
    entry(FALLBACK_WORKOUT, FALLBACK_REASON)
}

/// Look up the dedicated entry for a triple, if there is one
pub fn lookup(
    nadi: NadiStatus,
    agni: AgniStatus,
    shakti: ShaktiStatus,
) -> Option<&'static WorkoutRecommendation> {
    RECOMMENDATIONS.get(&(nadi, agni, shakti))
}

/// Resolve a readiness triple to a workout recommendation
///
/// Exact match only; unmatched triples resolve to the fallback.
pub fn resolve(nadi: NadiStatus, agni: AgniStatus, shakti: ShaktiStatus) -> WorkoutRecommendation {
    match lookup(nadi, agni, shakti) {
        Some(rec) => {
            tracing::info!(
                "Recommendation for {}: {}",
                recommendation_key(nadi, agni, shakti),
                rec.workout
            );
            rec.clone()
        }
        None => {
            tracing::info!(
                "No dedicated recommendation for {}, using fallback",
                recommendation_key(nadi, agni, shakti)
            );
            fallback_recommendation()
        }
    }
}

/// Hyphen-joined display form of a triple, e.g. `PUSH-HIGH-PUSH`
pub fn recommendation_key(nadi: NadiStatus, agni: AgniStatus, shakti: ShaktiStatus) -> String {
    format!("{}-{}-{}", nadi, agni, shakti)
}

/// All triples that have a dedicated entry, sorted by display key
pub fn known_keys() -> Vec<RecommendationKey> {
    let mut keys: Vec<_> = RECOMMENDATIONS.keys().copied().collect();
    keys.sort_by_key(|(n, a, s)| recommendation_key(*n, *a, *s));
    keys
}
