pub mod decay;

use crate::error::{ImportanceError, Result};
use crate::types::issue::{IssueSnapshot, Severity};
use crate::types::scoring::{Score, ScoreBreakdown, ScoringWeights};
use chrono::{DateTime, Utc};

/// Importance of `snapshot` at `now` under the default weights.
#[allow(dead_code)]
pub fn compute_score(snapshot: &IssueSnapshot, now: DateTime<Utc>) -> Score {
    score_breakdown(snapshot, now, &ScoringWeights::default()).final_score
}

/// Additive terms first, then decay, then severity amplification.
pub fn score_breakdown(
    snapshot: &IssueSnapshot,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let evidence = evidence_score(snapshot, weights);
    let social = social_score(snapshot, weights);
    let raw = evidence + social;

    let hours_since_update = decay::hours_between(snapshot.last_updated, now);
    let decay_factor = decay::decay_factor(hours_since_update, weights.decay_rate_per_hour);
    let severity_multiplier = severity_multiplier(snapshot.severity, weights);

    ScoreBreakdown {
        evidence,
        social,
        raw,
        hours_since_update,
        decay_factor,
        severity_multiplier,
        final_score: raw * decay_factor * severity_multiplier,
    }
}

/// Like [`score_breakdown`], but refuses a score that is not a finite number.
///
/// A `last_updated` far enough in the future overflows the decay factor.
pub fn checked_score_breakdown(
    snapshot: &IssueSnapshot,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
) -> Result<ScoreBreakdown> {
    let breakdown = score_breakdown(snapshot, now, weights);
    if !breakdown.final_score.is_finite() {
        return Err(ImportanceError::MalformedInput(format!(
            "last_updated {} yields a non-finite score ({})",
            snapshot.last_updated.to_rfc3339(),
            breakdown.final_score
        )));
    }
    Ok(breakdown)
}

fn evidence_score(snapshot: &IssueSnapshot, weights: &ScoringWeights) -> Score {
    let mut score = 0.0;
    if snapshot.has_photos() {
        score += weights.photo_points;
    }
    if snapshot.has_videos() {
        score += weights.video_points;
    }
    if snapshot.has_summary() {
        score += weights.summary_points;
    }
    score
}

fn social_score(snapshot: &IssueSnapshot, weights: &ScoringWeights) -> Score {
    snapshot.duplicate_count.value() as f64 * weights.duplicate_points
        + snapshot.upvotes.value() as f64 * weights.upvote_points
}

fn severity_multiplier(severity: Option<Severity>, weights: &ScoringWeights) -> f64 {
    match severity {
        Some(Severity::High) => weights.high_multiplier,
        Some(Severity::Medium) => weights.medium_multiplier,
        Some(Severity::Unclassified) | None => 1.0,
    }
}
