//! Simulated Gabbit ring sync.
//!
//! There is no real ring. Each sync draws fresh noise around fixed baseline
//! values; readings never drift from one sync to the next.

use crate::BiometricSnapshot;
use chrono::{DateTime, Utc};
use rand::Rng;

pub const HRV_BASELINE: f64 = 42.0;
pub const RESTING_HR_BASELINE: f64 = 58.0;
pub const BODY_TEMP_BASELINE: f64 = 36.7;
pub const SLEEP_QUALITY_BASELINE: f64 = 85.0;
pub const RECOVERY_BASELINE: f64 = 78.0;

/// Produce the next snapshot from the previous one
///
/// Perturbed readings (integer offsets are half-open):
/// - HRV: 42 + [-5, 5)
/// - resting HR: 58 + [-3, 3)
/// - body temperature: 36.7 + [-0.2, 0.2)
/// - sleep quality: 85 + [-5, 5)
/// - recovery score: 78 + [-5, 5)
///
/// Stress, sleep duration, weekly load and trend carry over unchanged.
pub fn refresh<R: Rng + ?Sized>(
    previous: &BiometricSnapshot,
    rng: &mut R,
    now: DateTime<Utc>,
) -> BiometricSnapshot {
    let snapshot = BiometricSnapshot {
        last_sync: now,
        hrv: HRV_BASELINE + f64::from(rng.gen_range(-5i32..5)),
        resting_hr: RESTING_HR_BASELINE + f64::from(rng.gen_range(-3i32..3)),
        body_temp: BODY_TEMP_BASELINE + rng.gen_range(-0.2_f64..0.2),
        sleep_quality: SLEEP_QUALITY_BASELINE + f64::from(rng.gen_range(-5i32..5)),
        recovery_score: RECOVERY_BASELINE + f64::from(rng.gen_range(-5i32..5)),
        ..previous.clone()
    };

    tracing::debug!(
        "Ring sync: hrv={} rhr={} temp={:.2} sleep={} recovery={}",
        snapshot.hrv,
        snapshot.resting_hr,
        snapshot.body_temp,
        snapshot.sleep_quality,
        snapshot.recovery_score
    );

    snapshot
}
