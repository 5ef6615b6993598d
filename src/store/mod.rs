pub mod json_file;

use crate::error::Result;
use crate::types::event::ScoreUpdateCommand;

pub use json_file::JsonFileStore;

/// Persistence seam for score write-backs.
///
/// Implementations apply `command` as a partial update of the single
/// `importance_score` field and never create or delete documents.
pub trait IssueStore {
    fn update_importance(&mut self, command: &ScoreUpdateCommand) -> Result<()>;
}
