use crate::error::ImportanceError;

/// Minimum movement that justifies writing a recomputed score back.
///
/// The write-back re-triggers the computation, so this must stay above zero.
pub const DEFAULT_CHANGE_EPSILON: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeGuard {
    epsilon: f64,
}

impl Default for ChangeGuard {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_CHANGE_EPSILON,
        }
    }
}

impl ChangeGuard {
    pub fn new(epsilon: f64) -> Result<Self, ImportanceError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ImportanceError::ConfigParse(format!(
                "change epsilon must be a finite number > 0.0 (found {epsilon})"
            )));
        }
        Ok(Self { epsilon })
    }

    #[allow(dead_code)]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn should_write(&self, new_score: f64, stored_score: Option<f64>) -> bool {
        should_write_with_epsilon(new_score, stored_score, self.epsilon)
    }
}

#[allow(dead_code)]
pub fn should_write(new_score: f64, stored_score: Option<f64>) -> bool {
    should_write_with_epsilon(new_score, stored_score, DEFAULT_CHANGE_EPSILON)
}

pub fn should_write_with_epsilon(new_score: f64, stored_score: Option<f64>, epsilon: f64) -> bool {
    match stored_score {
        None => true,
        Some(stored) if !stored.is_finite() => true,
        Some(stored) => (new_score - stored).abs() > epsilon,
    }
}
