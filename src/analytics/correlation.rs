use serde::Serialize;

/// Severity band for a correlation strength in [-100, 100]. The four bands
/// partition the range: every value classifies into exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    StrongPositive,
    ModeratePositive,
    ModerateNegative,
    StrongNegative,
}

pub fn classify_correlation(value: f64) -> Band {
    if value >= 50.0 {
        Band::StrongPositive
    } else if value >= 0.0 {
        Band::ModeratePositive
    } else if value >= -50.0 {
        Band::ModerateNegative
    } else {
        Band::StrongNegative
    }
}

/// One bar of the stacked correlation chart: the value sits in exactly one
/// band field, the other three stay null so only one series renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    pub factor: String,
    pub strong_positive: Option<f64>,
    pub moderate_positive: Option<f64>,
    pub moderate_negative: Option<f64>,
    pub strong_negative: Option<f64>,
}

pub fn correlation_point(factor: impl Into<String>, value: f64) -> CorrelationPoint {
    let band = classify_correlation(value);
    CorrelationPoint {
        factor: factor.into(),
        strong_positive: (band == Band::StrongPositive).then_some(value),
        moderate_positive: (band == Band::ModeratePositive).then_some(value),
        moderate_negative: (band == Band::ModerateNegative).then_some(value),
        strong_negative: (band == Band::StrongNegative).then_some(value),
    }
}
