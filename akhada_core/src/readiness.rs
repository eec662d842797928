//! Readiness classifiers.
//!
//! Three independent threshold rules, evaluated in a fixed order:
//! - NADI: nervous system (HRV, stress, sleep quality)
//! - AGNI: metabolic fire (body temperature, resting HR, recovery)
//! - SHAKTI: training readiness (recovery, weekly load, trend)
//!
//! Every comparison is strict. The boundaries are not symmetric across the
//! three rules and must stay that way.

use crate::{
    AgniStatus, BiometricSnapshot, NadiStatus, ReadinessState, ShaktiStatus, StressLevel,
    TrainingLoad, Trend,
};

/// Classify nervous-system readiness
///
/// PUSH is checked before PROTECT; the first rule that matches wins.
pub fn classify_nadi(hrv: f64, stress_level: StressLevel, sleep_quality: f64) -> NadiStatus {
    if hrv > 50.0 && stress_level == StressLevel::Low && sleep_quality > 80.0 {
        NadiStatus::Push
    } else if hrv < 30.0 || stress_level == StressLevel::High || sleep_quality < 60.0 {
        NadiStatus::Protect
    } else {
        NadiStatus::Normal
    }
}

/// Raw metabolic score feeding the AGNI classification
///
/// `(body_temp - 36) * 10 + (70 - resting_hr) + recovery_score`
pub fn metabolic_score(body_temp: f64, resting_hr: f64, recovery_score: f64) -> f64 {
    (body_temp - 36.0) * 10.0 + (70.0 - resting_hr) + recovery_score
}

/// Classify metabolic state
pub fn classify_agni(body_temp: f64, resting_hr: f64, recovery_score: f64) -> AgniStatus {
    let score = metabolic_score(body_temp, resting_hr, recovery_score);

    if score > 90.0 {
        AgniStatus::High
    } else if score < 60.0 {
        AgniStatus::Low
    } else {
        AgniStatus::Medium
    }
}

/// Classify training readiness
pub fn classify_shakti(
    recovery_score: f64,
    weekly_load: TrainingLoad,
    trend: Trend,
) -> ShaktiStatus {
    let overloaded = weekly_load == TrainingLoad::High;
    let declining = trend == Trend::Declining;

    if recovery_score > 75.0 && !overloaded && !declining {
        ShaktiStatus::Push
    } else if recovery_score < 50.0 || overloaded || declining {
        ShaktiStatus::Deload
    } else {
        ShaktiStatus::Normal
    }
}

/// Run all three classifiers against a snapshot
pub fn evaluate(snapshot: &BiometricSnapshot) -> ReadinessState {
    let nadi = classify_nadi(snapshot.hrv, snapshot.stress_level, snapshot.sleep_quality);
    let agni = classify_agni(snapshot.body_temp, snapshot.resting_hr, snapshot.recovery_score);
    let shakti = classify_shakti(snapshot.recovery_score, snapshot.weekly_load, snapshot.trend);

    tracing::debug!(
        "Readiness: NADI={} AGNI={} SHAKTI={} (metabolic score {:.1})",
        nadi,
        agni,
        shakti,
        metabolic_score(snapshot.body_temp, snapshot.resting_hr, snapshot.recovery_score)
    );

    ReadinessState { nadi, agni, shakti }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn peak_snapshot() -> BiometricSnapshot {
        BiometricSnapshot {
            last_sync: Utc::now(),
            hrv: 55.0,
            resting_hr: 55.0,
            body_temp: 36.9,
            sleep_quality: 88.0,
            sleep_duration: 7.5,
            stress_level: StressLevel::Low,
            recovery_score: 82.0,
            weekly_load: TrainingLoad::Medium,
            trend: Trend::Stable,
        }
    }

    #[test]
    fn test_nadi_push() {
        assert_eq!(classify_nadi(55.0, StressLevel::Low, 88.0), NadiStatus::Push);
    }

    #[test]
    fn test_nadi_hrv_fifty_is_not_push() {
        // hrv must be strictly above 50
        assert_eq!(classify_nadi(50.0, StressLevel::Low, 90.0), NadiStatus::Normal);
    }

    #[test]
    fn test_nadi_low_hrv_always_protects() {
        assert_eq!(classify_nadi(29.999, StressLevel::Low, 95.0), NadiStatus::Protect);
        assert_eq!(classify_nadi(29.999, StressLevel::Medium, 70.0), NadiStatus::Protect);
        assert_eq!(classify_nadi(30.0, StressLevel::Medium, 70.0), NadiStatus::Normal);
    }

    #[test]
    fn test_nadi_high_stress_or_poor_sleep_protects() {
        assert_eq!(classify_nadi(45.0, StressLevel::High, 85.0), NadiStatus::Protect);
        assert_eq!(classify_nadi(45.0, StressLevel::Low, 59.0), NadiStatus::Protect);
        assert_eq!(classify_nadi(45.0, StressLevel::Low, 60.0), NadiStatus::Normal);
    }

    #[test]
    fn test_nadi_medium_stress_blocks_push() {
        assert_eq!(classify_nadi(70.0, StressLevel::Medium, 95.0), NadiStatus::Normal);
    }

    #[test]
    fn test_metabolic_score_formula() {
        assert_eq!(metabolic_score(36.0, 70.0, 50.0), 50.0);
        assert_eq!(metabolic_score(37.0, 60.0, 40.0), 60.0);
    }

    #[test]
    fn test_agni_boundaries_are_strict() {
        // exactly 90 is not HIGH
        assert_eq!(classify_agni(36.0, 70.0, 90.0), AgniStatus::Medium);
        // exactly 60 is not LOW
        assert_eq!(classify_agni(36.0, 70.0, 60.0), AgniStatus::Medium);
        assert_eq!(classify_agni(36.0, 70.0, 91.0), AgniStatus::High);
        assert_eq!(classify_agni(36.0, 70.0, 59.0), AgniStatus::Low);
    }

    #[test]
    fn test_agni_baseline_readings() {
        // (0.7 * 10) + 12 + 78 = 97
        assert_eq!(classify_agni(36.7, 58.0, 78.0), AgniStatus::High);
    }

    #[test]
    fn test_shakti_push() {
        assert_eq!(
            classify_shakti(82.0, TrainingLoad::Medium, Trend::Stable),
            ShaktiStatus::Push
        );
        assert_eq!(
            classify_shakti(76.0, TrainingLoad::Low, Trend::Improving),
            ShaktiStatus::Push
        );
    }

    #[test]
    fn test_shakti_deload_triggers() {
        assert_eq!(
            classify_shakti(90.0, TrainingLoad::High, Trend::Stable),
            ShaktiStatus::Deload
        );
        assert_eq!(
            classify_shakti(90.0, TrainingLoad::Low, Trend::Declining),
            ShaktiStatus::Deload
        );
        assert_eq!(
            classify_shakti(49.0, TrainingLoad::Low, Trend::Stable),
            ShaktiStatus::Deload
        );
    }

    #[test]
    fn test_shakti_normal_band() {
        assert_eq!(
            classify_shakti(75.0, TrainingLoad::Medium, Trend::Stable),
            ShaktiStatus::Normal
        );
        assert_eq!(
            classify_shakti(50.0, TrainingLoad::Medium, Trend::Improving),
            ShaktiStatus::Normal
        );
    }

    #[test]
    fn test_evaluate_peak_day() {
        let state = evaluate(&peak_snapshot());

        assert_eq!(state.nadi, NadiStatus::Push);
        assert_eq!(state.agni, AgniStatus::High);
        assert_eq!(state.shakti, ShaktiStatus::Push);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let snapshot = peak_snapshot();
        let before = snapshot.clone();

        let first = evaluate(&snapshot);
        let second = evaluate(&snapshot);

        assert_eq!(first, second);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_evaluate_uses_each_field() {
        let mut snapshot = peak_snapshot();
        snapshot.stress_level = StressLevel::High;
        snapshot.trend = Trend::Declining;
        snapshot.resting_hr = 80.0;
        snapshot.recovery_score = 45.0;

        let state = evaluate(&snapshot);
        assert_eq!(state.nadi, NadiStatus::Protect);
        // 9 - 10 + 45 = 44
        assert_eq!(state.agni, AgniStatus::Low);
        assert_eq!(state.shakti, ShaktiStatus::Deload);
    }
}
