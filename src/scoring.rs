//! Desirability score for optional stops.

use crate::config::Weights;
use crate::model::Stop;

/// Days without contact at which the recency term saturates.
const RECENCY_SATURATION_DAYS: f64 = 30.0;

/// Weighted sum of normalized priority, recency and deal value.
///
/// Missing recency or value inputs drop their term entirely. Higher is more
/// desirable.
pub fn stop_score(stop: &Stop, weights: &Weights) -> f64 {
    let mut score = weights.priority_weight * f64::from(stop.effective_priority()) / 5.0;

    if let Some(days) = stop.days_since_last_touch {
        score += weights.recency_weight * (days / RECENCY_SATURATION_DAYS).min(1.0);
    }

    if let (Some(value), Some(max_value)) = (stop.deal_value, stop.max_deal_value) {
        if max_value > 0.0 {
            score += weights.value_weight * (value / max_value);
        }
    }

    score
}
