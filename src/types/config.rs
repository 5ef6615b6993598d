use crate::error::ImportanceError;
use crate::guard::DEFAULT_CHANGE_EPSILON;
use crate::types::scoring::ScoringWeights;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportanceConfig {
    pub store: Option<StoreConfig>,
    pub scoring: Option<ScoringConfig>,
    pub guard: Option<GuardConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            collection: default_collection(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("issues.json")
}

fn default_collection() -> String {
    "issues".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub photo_points: Option<f64>,
    pub video_points: Option<f64>,
    pub summary_points: Option<f64>,
    pub duplicate_points: Option<f64>,
    pub upvote_points: Option<f64>,
    pub decay_rate_per_hour: Option<f64>,
    pub high_multiplier: Option<f64>,
    pub medium_multiplier: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    pub epsilon: Option<f64>,
}

impl ImportanceConfig {
    pub fn store_config(&self) -> StoreConfig {
        self.store.clone().unwrap_or_default()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        let defaults = ScoringWeights::default();
        match &self.scoring {
            Some(scoring) => ScoringWeights {
                photo_points: scoring.photo_points.unwrap_or(defaults.photo_points),
                video_points: scoring.video_points.unwrap_or(defaults.video_points),
                summary_points: scoring.summary_points.unwrap_or(defaults.summary_points),
                duplicate_points: scoring
                    .duplicate_points
                    .unwrap_or(defaults.duplicate_points),
                upvote_points: scoring.upvote_points.unwrap_or(defaults.upvote_points),
                decay_rate_per_hour: scoring
                    .decay_rate_per_hour
                    .unwrap_or(defaults.decay_rate_per_hour),
                high_multiplier: scoring.high_multiplier.unwrap_or(defaults.high_multiplier),
                medium_multiplier: scoring
                    .medium_multiplier
                    .unwrap_or(defaults.medium_multiplier),
            },
            None => defaults,
        }
    }

    pub fn change_epsilon(&self) -> f64 {
        self.guard
            .as_ref()
            .and_then(|guard| guard.epsilon)
            .unwrap_or(DEFAULT_CHANGE_EPSILON)
    }

    pub fn validate(&self) -> Result<(), ImportanceError> {
        let weights = self.scoring_weights();
        for (key, value) in [
            ("photo_points", weights.photo_points),
            ("video_points", weights.video_points),
            ("summary_points", weights.summary_points),
            ("duplicate_points", weights.duplicate_points),
            ("upvote_points", weights.upvote_points),
            ("decay_rate_per_hour", weights.decay_rate_per_hour),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ImportanceError::ConfigParse(format!(
                    "scoring.{key} must be a finite number >= 0.0 (found {value})"
                )));
            }
        }

        for (key, value) in [
            ("high_multiplier", weights.high_multiplier),
            ("medium_multiplier", weights.medium_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ImportanceError::ConfigParse(format!(
                    "scoring.{key} must be a finite number > 0.0 (found {value})"
                )));
            }
        }

        let epsilon = self.change_epsilon();
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ImportanceError::ConfigParse(format!(
                "guard.epsilon must be a finite number > 0.0 (found {epsilon})"
            )));
        }

        if let Some(store) = &self.store {
            if store.collection.trim().is_empty() {
                return Err(ImportanceError::ConfigParse(
                    "store.collection cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
