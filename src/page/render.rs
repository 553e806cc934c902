//! Result renderer.

use tracing::trace;

use super::ResultsRegion;
use crate::matching::MatchResult;

/// Score as a percentage label, e.g. `72%` or `72.35%`.
/// Negative zero prints as `0%`.
pub fn format_percent(score: f64) -> String {
    let score = if score == 0.0 { 0.0 } else { score };
    format!("{score}%")
}

/// Reflect `result` into the results region, replacing whatever it showed.
pub fn render_results(region: &mut ResultsRegion, result: &MatchResult) {
    region.hidden = false;

    region.fill_percent = result.match_score;
    region.score_text = format_percent(result.match_score);

    region
        .matching_skills
        .replace_with(result.matching_skills.iter().cloned());
    region
        .missing_skills
        .replace_with(result.missing_skills.iter().cloned());

    trace!(
        score = result.match_score,
        matching = region.matching_skills.len(),
        missing = region.missing_skills.len(),
        "results rendered"
    );

    region.request_scroll();
}
