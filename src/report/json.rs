use crate::report::Report;

pub fn to_json(report: Report<'_>) -> Result<String, serde_json::Error> {
    match report {
        Report::Score(breakdown) => serde_json::to_string_pretty(breakdown),
        Report::Decision(decision) => serde_json::to_string_pretty(decision),
    }
}
