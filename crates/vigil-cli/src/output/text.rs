//! Terminal layout for a triage view.

use std::fmt::Write as _;

use vigil_triage::TriageView;

const BAR_WIDTH: f64 = 30.0;

/// Header, the summary block, sentiment bars, and a note on failed aspects.
#[must_use]
pub fn render_triage(view: &TriageView) -> String {
    let result = &view.result;
    let mut out = format!(
        "Report {} ({})\n\n{}\n",
        result.report_id(),
        result.computed_at().format("%Y-%m-%d %H:%M:%S UTC"),
        view.summary
    );

    if !view.sentiment_bars.is_empty() {
        out.push_str("\nSentiment scores\n");
        let label_width = view
            .sentiment_bars
            .iter()
            .map(|b| b.name.chars().count())
            .max()
            .unwrap_or(0);
        for bar in &view.sentiment_bars {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let filled = ((bar.value / 100.0) * BAR_WIDTH).round().clamp(0.0, BAR_WIDTH) as usize;
            let _ = writeln!(
                out,
                "  {:<label_width$}  {:>6.2}%  {}",
                bar.name,
                bar.value,
                "#".repeat(filled)
            );
        }
    }

    if result.is_degraded() {
        let _ = writeln!(
            out,
            "\nUnavailable ({} of {}): {}",
            result.failed_aspects().len(),
            result.aspects().len(),
            result.failed_aspects().join(", ")
        );
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use vigil_core::{AspectResult, ClassificationScore, TriageResult};
    use vigil_triage::{AspectRegistry, ResultPresenter};

    use super::render_triage;

    fn view(aspects: Vec<AspectResult>, failed: Vec<String>) -> vigil_triage::TriageView {
        let result = TriageResult::new(
            "crime-42".into(),
            aspects,
            failed,
            Utc.with_ymd_and_hms(2025, 3, 2, 16, 0, 0).unwrap(),
        );
        ResultPresenter::new(Arc::new(AspectRegistry::standard())).present(&result)
    }

    #[test]
    fn renders_summary_and_bars() {
        let out = render_triage(&view(
            vec![
                AspectResult::from_ranked(
                    "sentiment",
                    vec![
                        ClassificationScore::new("negative", 0.5),
                        ClassificationScore::new("neutral", 0.3),
                        ClassificationScore::new("positive", 0.2),
                    ],
                ),
                AspectResult::from_ranked(
                    "severity",
                    vec![
                        ClassificationScore::new("high", 0.7),
                        ClassificationScore::new("medium", 0.2),
                        ClassificationScore::new("low", 0.1),
                    ],
                ),
            ],
            Vec::new(),
        ));

        assert_eq!(
            out,
            "Report crime-42 (2025-03-02 16:00:00 UTC)\n\
             \n\
             Sentiment: negative (50.00%)\n\
             Severity: high\n\
             \n\
             Sentiment scores\n\
             \x20 negative   50.00%  ###############\n\
             \x20 neutral    30.00%  #########\n\
             \x20 positive   20.00%  ######"
        );
    }

    #[test]
    fn degraded_result_lists_failures() {
        let out = render_triage(&view(
            vec![AspectResult::unavailable("sentiment")],
            vec!["sentiment".into()],
        ));
        assert!(out.contains("Sentiment: unavailable"));
        assert!(out.ends_with("Unavailable (1 of 1): sentiment"));
        assert!(!out.contains("Sentiment scores"));
    }
}
