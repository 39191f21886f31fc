use crate::response::{DetectionResult, Prediction};

pub const REAL_LABEL: &str = "Real Content";
pub const FAKE_LABEL: &str = "Fake/Deepfake Content";
pub const NO_DETAILS: &str = "No detailed analysis available for this content.";

/// `value` in [0, 1] as a percentage rounded to two decimals, e.g. `87.30%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", round_percent(value))
}

fn round_percent(value: f64) -> f64 {
    (value * 100.0 * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub name: String,
    /// CSS width of the bar, in percent.
    pub bar_width: f64,
    pub percent_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsView {
    Rows(Vec<DetailRow>),
    Unavailable,
}

/// Display model of a verdict, identical for all modalities.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub is_real: bool,
    pub verdict_label: &'static str,
    pub confidence_text: String,
    pub explanation: String,
    pub details: DetailsView,
    pub processing_time_text: Option<String>,
}

impl ResultView {
    pub fn from_result(result: &DetectionResult) -> Self {
        let is_real = result.prediction == Prediction::Real;
        let confidence_text = format_percent(result.confidence);

        let explanation = if is_real {
            format!(
                "This content appears to be authentic with {} confidence. However, keep in \
                 mind that detection technology is not perfect, and very sophisticated \
                 deepfakes might still go undetected.",
                confidence_text
            )
        } else {
            format!(
                "This content shows characteristics of being manipulated or AI-generated \
                 with {} confidence. The analysis has detected patterns typically \
                 associated with synthetic media.",
                confidence_text
            )
        };

        let details = match &result.details {
            Some(details) => DetailsView::Rows(
                details
                    .iter()
                    .map(|detail| DetailRow {
                        name: detail.name.clone(),
                        bar_width: (detail.value * 100.0).clamp(0.0, 100.0),
                        percent_text: format_percent(detail.value),
                        description: detail.description.clone(),
                    })
                    .collect(),
            ),
            None => DetailsView::Unavailable,
        };

        Self {
            is_real,
            verdict_label: if is_real { REAL_LABEL } else { FAKE_LABEL },
            confidence_text,
            explanation,
            details,
            processing_time_text: result
                .processing_time
                .map(|secs| format!("Processed in {:.2}s", secs)),
        }
    }
}
