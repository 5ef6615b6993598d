pub mod json;
pub mod md;

use crate::error::ImportanceError;
use crate::handler::Decision;
use crate::types::scoring::ScoreBreakdown;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Score(&'a ScoreBreakdown),
    Decision(&'a Decision),
}

pub fn render(report: Report<'_>, format: OutputFormat) -> Result<String, ImportanceError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ImportanceError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
