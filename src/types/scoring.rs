use serde::Serialize;

pub type Score = f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub photo_points: Score,
    pub video_points: Score,
    pub summary_points: Score,
    pub duplicate_points: Score,
    pub upvote_points: Score,
    pub decay_rate_per_hour: f64,
    pub high_multiplier: f64,
    pub medium_multiplier: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            photo_points: 15.0,
            video_points: 20.0,
            summary_points: 5.0,
            duplicate_points: 5.0,
            upvote_points: 1.0,
            decay_rate_per_hour: 0.01,
            high_multiplier: 2.0,
            medium_multiplier: 1.5,
        }
    }
}

/// Every stage of one score computation, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub evidence: Score,
    pub social: Score,
    pub raw: Score,
    pub hours_since_update: f64,
    pub decay_factor: f64,
    pub severity_multiplier: f64,
    pub final_score: Score,
}
