use crate::error::{ImportanceError, Result};
use crate::guard::ChangeGuard;
use crate::scoring;
use crate::store::IssueStore;
use crate::types::event::{ChangeEvent, ScoreUpdateCommand};
use crate::types::scoring::{Score, ScoreBreakdown, ScoringWeights};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Write {
        command: ScoreUpdateCommand,
        previous_score: Option<Score>,
        breakdown: ScoreBreakdown,
    },
    Unchanged {
        issue_id: String,
        stored_score: Score,
        breakdown: ScoreBreakdown,
    },
    Deleted {
        issue_id: String,
    },
}

impl Decision {
    pub fn issue_id(&self) -> &str {
        match self {
            Self::Write { command, .. } => &command.issue_id,
            Self::Unchanged { issue_id, .. } | Self::Deleted { issue_id } => issue_id,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    /// Stored and freshly computed scores, where they exist.
    pub fn scores(&self) -> (Option<Score>, Option<Score>) {
        match self {
            Self::Write {
                command,
                previous_score,
                ..
            } => (*previous_score, Some(command.importance_score)),
            Self::Unchanged {
                stored_score,
                breakdown,
                ..
            } => (Some(*stored_score), Some(breakdown.final_score)),
            Self::Deleted { .. } => (None, None),
        }
    }
}

/// Runs one change event through scoring and the change guard.
///
/// The store is owned by the handler and only reached from [`ScoreHandler::handle`].
pub struct ScoreHandler<S: IssueStore> {
    store: S,
    weights: ScoringWeights,
    guard: ChangeGuard,
}

impl<S: IssueStore> ScoreHandler<S> {
    pub fn new(store: S, weights: ScoringWeights, guard: ChangeGuard) -> Self {
        Self {
            store,
            weights,
            guard,
        }
    }

    pub fn plan(&self, event: &ChangeEvent, now: DateTime<Utc>) -> Result<Decision> {
        plan_update(event, now, &self.weights, &self.guard)
    }

    /// Plans without writing. Logs the invocation like [`ScoreHandler::handle`] does.
    pub fn preview(&self, event: &ChangeEvent, now: DateTime<Utc>) -> Result<Decision> {
        match self.plan(event, now) {
            Ok(decision) => {
                log_invocation(&event.issue_id, Some(&decision), false, true, None);
                Ok(decision)
            }
            Err(e) => {
                log_invocation(&event.issue_id, None, false, true, Some(&e));
                Err(e)
            }
        }
    }

    /// Plans and, when the guard allows it, issues exactly one partial update.
    ///
    /// Every call emits exactly one info event, including failed ones.
    pub fn handle(&mut self, event: &ChangeEvent, now: DateTime<Utc>) -> Result<Decision> {
        let decision = match self.plan(event, now) {
            Ok(decision) => decision,
            Err(e) => {
                log_invocation(&event.issue_id, None, false, false, Some(&e));
                return Err(e);
            }
        };

        if let Decision::Write { command, .. } = &decision {
            if let Err(e) = self.store.update_importance(command) {
                log_invocation(&event.issue_id, Some(&decision), false, false, Some(&e));
                return Err(e);
            }
        }

        log_invocation(
            &event.issue_id,
            Some(&decision),
            decision.is_write(),
            false,
            None,
        );
        Ok(decision)
    }

    #[allow(dead_code)]
    pub fn into_store(self) -> S {
        self.store
    }
}

pub fn plan_update(
    event: &ChangeEvent,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
    guard: &ChangeGuard,
) -> Result<Decision> {
    let Some(snapshot) = event.after.as_ref() else {
        return Ok(Decision::Deleted {
            issue_id: event.issue_id.clone(),
        });
    };

    let breakdown = scoring::checked_score_breakdown(snapshot, now, weights)?;
    tracing::debug!(issue_id = %event.issue_id, ?breakdown, "score computed");

    let previous_score = snapshot.importance_score;
    if guard.should_write(breakdown.final_score, previous_score) {
        Ok(Decision::Write {
            command: ScoreUpdateCommand {
                issue_id: event.issue_id.clone(),
                importance_score: breakdown.final_score,
            },
            previous_score,
            breakdown,
        })
    } else {
        Ok(Decision::Unchanged {
            issue_id: event.issue_id.clone(),
            stored_score: previous_score.unwrap_or(breakdown.final_score),
            breakdown,
        })
    }
}

fn log_invocation(
    issue_id: &str,
    decision: Option<&Decision>,
    written: bool,
    dry_run: bool,
    error: Option<&ImportanceError>,
) {
    let (old_score, new_score) = decision.map(Decision::scores).unwrap_or((None, None));
    match error {
        Some(error) => tracing::info!(
            issue_id,
            old_score = ?old_score,
            new_score = ?new_score,
            written,
            dry_run,
            error = %error,
            "importance score not written"
        ),
        None => tracing::info!(
            issue_id,
            old_score = ?old_score,
            new_score = ?new_score,
            written,
            dry_run,
            "importance score evaluated"
        ),
    }
}
