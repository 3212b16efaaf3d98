use serde::Serialize;

/// Deadband on the underlying 1-7 scale: a first-week/last-week delta must
/// exceed this before a trend is called.
const DIRECTION_THRESHOLD: f64 = 0.2;
const SIGNIFICANT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    PhysicalEnergy,
    CognitiveClarity,
    Mood,
    Stress,
}

impl Metric {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "physical_energy" => Some(Metric::PhysicalEnergy),
            "cognitive_clarity" => Some(Metric::CognitiveClarity),
            "mood" => Some(Metric::Mood),
            "stress" => Some(Metric::Stress),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::PhysicalEnergy => "Physical Energy",
            Metric::CognitiveClarity => "Cognitive Clarity",
            Metric::Mood => "Mood",
            Metric::Stress => "Stress",
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Last-week average minus first-week average. Series shorter than seven
/// days average whatever is available; an empty series is flat.
pub fn trend_delta(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let window = series.len().min(7);
    let first_week = mean(&series[..window]);
    let last_week = mean(&series[series.len() - window..]);
    last_week - first_week
}

pub fn trend_direction(delta: f64) -> TrendDirection {
    if delta > DIRECTION_THRESHOLD {
        TrendDirection::Up
    } else if delta < -DIRECTION_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

fn magnitude_word(delta: f64) -> &'static str {
    if delta.abs() > SIGNIFICANT_THRESHOLD {
        "significantly"
    } else {
        "slightly"
    }
}

/// Fixed per-metric, per-direction summary sentence. Pure templating: the
/// same delta always selects the same sentence.
pub fn trend_summary(metric: Metric, delta: f64) -> String {
    let direction = trend_direction(delta);
    let magnitude = magnitude_word(delta);

    match (metric, direction) {
        (Metric::PhysicalEnergy, TrendDirection::Up) => format!(
            "Your physical energy has been {magnitude} improving. Keep up with your exercise and sleep routines!"
        ),
        (Metric::PhysicalEnergy, TrendDirection::Down) => format!(
            "Your physical energy has been {magnitude} declining. Consider reviewing your sleep and exercise habits."
        ),
        (Metric::PhysicalEnergy, TrendDirection::Stable) => {
            "Your physical energy levels have remained consistent. This indicates good routine maintenance."
                .to_string()
        }
        (Metric::CognitiveClarity, TrendDirection::Up) => format!(
            "Your cognitive clarity is {magnitude} improving. Your focus-enhancing practices are working well!"
        ),
        (Metric::CognitiveClarity, TrendDirection::Down) => format!(
            "Your cognitive clarity has been {magnitude} declining. You might want to evaluate your work patterns and breaks."
        ),
        (Metric::CognitiveClarity, TrendDirection::Stable) => {
            "Your cognitive clarity has been steady. Your current routines are supporting consistent mental performance."
                .to_string()
        }
        (Metric::Mood, TrendDirection::Up) => format!(
            "Your mood has been {magnitude} improving. Your positive lifestyle changes are showing results!"
        ),
        (Metric::Mood, TrendDirection::Down) => format!(
            "Your mood has been {magnitude} declining. Consider increasing social activities and outdoor time."
        ),
        (Metric::Mood, TrendDirection::Stable) => {
            "Your mood has remained stable. You're maintaining a good emotional balance.".to_string()
        }
        (Metric::Stress, TrendDirection::Up) => format!(
            "Your stress levels have been {magnitude} increasing. Consider incorporating more relaxation techniques."
        ),
        (Metric::Stress, TrendDirection::Down) => format!(
            "Your stress levels have been {magnitude} decreasing. Your stress management strategies are working well!"
        ),
        (Metric::Stress, TrendDirection::Stable) => {
            "Your stress levels have remained stable. Continue with your current stress management practices."
                .to_string()
        }
    }
}
