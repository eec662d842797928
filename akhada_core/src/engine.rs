//! Body intelligence pipeline.
//!
//! One tick of the pipeline:
//! 1. Sync the ring (refresh the caller's snapshot) and persist it
//! 2. Classify NADI, AGNI and SHAKTI
//! 3. Resolve the workout recommendation
//! 4. Persist the assessment and hand it to the presentation layer

use crate::status_color::{color_for, StatusColor};
use crate::store::{self, KeyValueStore};
use crate::{readiness, recommendation, sensor, BiometricSnapshot, BodyIntelligence, Result};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Everything the presentation layer needs to render one assessment
#[derive(Clone, Debug, PartialEq)]
pub struct BodyReport {
    pub snapshot: BiometricSnapshot,
    pub assessment: BodyIntelligence,
    pub nadi_color: StatusColor,
    pub agni_color: StatusColor,
    pub shakti_color: StatusColor,
}

impl BodyReport {
    pub fn new(snapshot: BiometricSnapshot, assessment: BodyIntelligence) -> Self {
        Self {
            nadi_color: color_for(assessment.nadi.as_str()),
            agni_color: color_for(assessment.agni.as_str()),
            shakti_color: color_for(assessment.shakti.as_str()),
            snapshot,
            assessment,
        }
    }
}

/// Classify a snapshot and resolve its recommendation
///
/// Pure: nothing is read or written.
pub fn assess(snapshot: &BiometricSnapshot, now: DateTime<Utc>) -> BodyIntelligence {
    let state = readiness::evaluate(snapshot);
    let recommendation = recommendation::resolve(state.nadi, state.agni, state.shakti);

    BodyIntelligence {
        nadi: state.nadi,
        agni: state.agni,
        shakti: state.shakti,
        recommendation,
        timestamp: now,
    }
}

/// Run one full sync-classify-resolve tick
///
/// `snapshot` is replaced by the freshly synced readings. Both the ring data
/// and the resulting assessment are persisted before returning.
pub fn update_body_intelligence<R: Rng + ?Sized>(
    store: &mut dyn KeyValueStore,
    snapshot: &mut BiometricSnapshot,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<BodyReport> {
    *snapshot = sensor::refresh(snapshot, rng, now);
    store::save_snapshot(store, snapshot)?;

    let assessment = assess(snapshot, now);
    store::save_body_intelligence(store, &assessment)?;

    tracing::info!(
        "Body intelligence updated: NADI={} AGNI={} SHAKTI={} -> {}",
        assessment.nadi,
        assessment.agni,
        assessment.shakti,
        assessment.recommendation.workout
    );

    Ok(BodyReport::new(snapshot.clone(), assessment))
}
