use crate::handler::Decision;
use crate::report::Report;
use crate::types::scoring::ScoreBreakdown;

pub fn to_markdown(report: Report<'_>) -> String {
    match report {
        Report::Score(breakdown) => score_markdown(breakdown),
        Report::Decision(decision) => decision_markdown(decision),
    }
}

fn score_markdown(breakdown: &ScoreBreakdown) -> String {
    let mut output = String::new();
    output.push_str("# Importance Score\n\n");
    output.push_str(&format!("Final score: {:.3}\n\n", breakdown.final_score));
    push_breakdown(&mut output, breakdown);
    output
}

fn decision_markdown(decision: &Decision) -> String {
    let mut output = String::new();
    output.push_str("# Importance Update\n\n");
    match decision {
        Decision::Write {
            command,
            previous_score,
            breakdown,
        } => {
            output.push_str(&format!(
                "Issue `{}`: write {:.3} (previously {})\n\n",
                command.issue_id,
                command.importance_score,
                previous_score
                    .map(|score| format!("{score:.3}"))
                    .unwrap_or_else(|| "unset".to_string())
            ));
            push_breakdown(&mut output, breakdown);
        }
        Decision::Unchanged {
            issue_id,
            stored_score,
            breakdown,
        } => {
            output.push_str(&format!(
                "Issue `{}`: unchanged at {:.3} (computed {:.3})\n\n",
                issue_id, stored_score, breakdown.final_score
            ));
            push_breakdown(&mut output, breakdown);
        }
        Decision::Deleted { issue_id } => {
            output.push_str(&format!("Issue `{issue_id}`: deleted, nothing to score\n"));
        }
    }
    output
}

fn push_breakdown(output: &mut String, breakdown: &ScoreBreakdown) {
    output.push_str("## Breakdown\n\n");
    output.push_str(&format!(
        "- evidence: {:.3}\n- social: {:.3}\n- raw: {:.3}\n- hours_since_update: {:.3}\n- decay_factor: {:.4}\n- severity_multiplier: {:.2}\n",
        breakdown.evidence,
        breakdown.social,
        breakdown.raw,
        breakdown.hours_since_update,
        breakdown.decay_factor,
        breakdown.severity_multiplier
    ));
}
