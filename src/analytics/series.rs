//! Sample chart-series generation for the analytics views that are not yet
//! backed by stored data. Shapes mirror what the chart components consume.

use chrono::{Duration, Utc};
use rand::Rng;
use serde::Serialize;

use super::trend::Metric;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub tension: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledChart {
    pub labels: Vec<String>,
    pub datasets: Vec<FilledDataset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
}

/// Sine wave with noise, rounded to one decimal and clamped to the 1-7
/// rating scale.
pub fn sine_wave_series(days: usize, baseline: f64, amplitude: f64, frequency: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..days)
        .map(|i| {
            let smooth = baseline + amplitude * (frequency * i as f64).sin();
            let noise = (rng.gen::<f64>() - 0.5) * 0.5;
            (((smooth + noise) * 10.0).round() / 10.0).clamp(1.0, 7.0)
        })
        .collect()
}

/// ISO date labels (YYYY-MM-DD) for the past `days` days, oldest first.
pub fn date_labels(days: usize) -> Vec<String> {
    let today = Utc::now().date_naive();
    (0..days)
        .map(|i| {
            (today - Duration::days((days - i - 1) as i64))
                .format("%Y-%m-%d")
                .to_string()
        })
        .collect()
}

/// 30-day multi-metric history chart. Dataset labels double as metric keys
/// (lowercased, space → underscore) for the `metrics=` filter.
pub fn energy_history_chart() -> LineChart {
    let days = 30;
    LineChart {
        labels: date_labels(days),
        datasets: vec![
            LineDataset {
                label: "Physical Energy".into(),
                data: sine_wave_series(days, 4.5, 1.5, 0.2),
                border_color: "#f5855f",
                tension: 0.4,
            },
            LineDataset {
                label: "Cognitive Clarity".into(),
                data: sine_wave_series(days, 4.0, 1.8, 0.25),
                border_color: "#953599",
                tension: 0.4,
            },
            LineDataset {
                label: "Mood".into(),
                data: sine_wave_series(days, 4.2, 1.2, 0.15),
                border_color: "#3b82f6",
                tension: 0.4,
            },
            LineDataset {
                label: "Stress".into(),
                data: sine_wave_series(days, 3.5, 1.3, 0.18),
                border_color: "#ef4444",
                tension: 0.4,
            },
        ],
    }
}

pub fn metric_key(label: &str) -> String {
    label.to_lowercase().replacen(' ', "_", 1)
}

/// Per-metric daily series for the trend view.
pub fn trend_series(metric: Metric, days: usize) -> Vec<f64> {
    match metric {
        Metric::PhysicalEnergy => sine_wave_series(days, 4.8, 1.2, 0.15),
        Metric::CognitiveClarity => sine_wave_series(days, 4.2, 1.5, 0.2),
        Metric::Mood => sine_wave_series(days, 4.5, 1.0, 0.1),
        Metric::Stress => sine_wave_series(days, 3.8, 1.8, 0.25),
    }
}

pub fn trend_chart(metric: Metric, data: Vec<f64>) -> FilledChart {
    FilledChart {
        labels: date_labels(data.len()),
        datasets: vec![FilledDataset {
            label: metric.label().to_string(),
            data,
            border_color: "#953599",
            background_color: "rgba(149, 53, 153, 0.1)",
            fill: true,
            tension: 0.4,
        }],
    }
}

pub const TIME_BREAKDOWN_LABELS: [&str; 3] = ["High Energy", "Moderate Energy", "Low Energy"];

/// Weekly 168-hour split across energy levels (35/45/20).
pub fn time_breakdown_hours() -> [f64; 3] {
    let total = 168.0_f64;
    [
        (total * 0.35).round(),
        (total * 0.45).round(),
        (total * 0.20).round(),
    ]
}

pub fn time_breakdown_chart() -> BarChart {
    let hours = time_breakdown_hours();
    BarChart {
        labels: TIME_BREAKDOWN_LABELS.iter().map(|l| l.to_string()).collect(),
        datasets: vec![BarDataset {
            data: hours.to_vec(),
            background_color: vec![
                "rgba(149, 53, 153, 0.8)".into(),
                "rgba(245, 133, 95, 0.8)".into(),
                "rgba(239, 68, 68, 0.8)".into(),
            ],
            border_color: vec!["#953599".into(), "#f5855f".into(), "#ef4444".into()],
            border_width: 1,
        }],
    }
}

/// Baseline correlation strengths (-1..1) for the factors tracked against
/// any target metric, jittered per request and ordered by |value|.
pub fn correlation_factors() -> Vec<(&'static str, f64)> {
    let base = [
        ("Sleep Quality", 0.85),
        ("Exercise", 0.72),
        ("Hydration", 0.65),
        ("Nutrition", 0.58),
        ("Social Activity", 0.45),
        ("Screen Time", -0.35),
        ("Work Hours", -0.42),
        ("Caffeine", -0.25),
    ];

    let mut rng = rand::thread_rng();
    let mut factors: Vec<(&'static str, f64)> = base
        .iter()
        .map(|(name, value)| (*name, value + (rng.gen::<f64>() - 0.5) * 0.2))
        .collect();
    factors.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    factors
}

pub fn correlation_chart(factors: &[(&'static str, f64)]) -> BarChart {
    BarChart {
        labels: factors.iter().map(|(name, _)| name.to_string()).collect(),
        datasets: vec![BarDataset {
            data: factors.iter().map(|(_, v)| v * 100.0).collect(),
            background_color: factors
                .iter()
                .map(|(_, v)| {
                    if *v > 0.0 {
                        "rgba(149, 53, 153, 0.6)".into()
                    } else {
                        "rgba(239, 68, 68, 0.6)".into()
                    }
                })
                .collect(),
            border_color: factors
                .iter()
                .map(|(_, v)| if *v > 0.0 { "#953599".into() } else { "#ef4444".into() })
                .collect(),
            border_width: 1,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_stays_on_rating_scale() {
        let series = sine_wave_series(90, 4.0, 2.0, 0.2);
        assert_eq!(series.len(), 90);
        assert!(series.iter().all(|v| (1.0..=7.0).contains(v)));
    }

    #[test]
    fn test_sine_wave_values_have_one_decimal() {
        for v in sine_wave_series(30, 4.5, 1.5, 0.2) {
            assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_date_labels_oldest_first_ending_today() {
        let labels = date_labels(7);
        assert_eq!(labels.len(), 7);
        assert_eq!(
            labels.last().unwrap(),
            &Utc::now().date_naive().format("%Y-%m-%d").to_string()
        );
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_history_chart_has_four_metrics() {
        let chart = energy_history_chart();
        let keys: Vec<String> = chart.datasets.iter().map(|d| metric_key(&d.label)).collect();
        assert_eq!(
            keys,
            vec!["physical_energy", "cognitive_clarity", "mood", "stress"]
        );
    }

    #[test]
    fn test_time_breakdown_sums_to_week() {
        let hours = time_breakdown_hours();
        assert_eq!(hours, [59.0, 76.0, 34.0]);
        // Rounded buckets may drift a hair from 168.
        assert!((hours.iter().sum::<f64>() - 168.0).abs() <= 2.0);
    }

    #[test]
    fn test_correlation_factors_sorted_by_strength() {
        let factors = correlation_factors();
        assert_eq!(factors.len(), 8);
        for pair in factors.windows(2) {
            assert!(pair[0].1.abs() >= pair[1].1.abs());
        }
    }

    #[test]
    fn test_correlation_chart_scales_to_percent() {
        let factors = vec![("Sleep Quality", 0.8), ("Caffeine", -0.3)];
        let chart = correlation_chart(&factors);
        assert_eq!(chart.datasets[0].data, vec![80.0, -30.0]);
        assert_eq!(chart.datasets[0].background_color[0], "rgba(149, 53, 153, 0.6)");
        assert_eq!(chart.datasets[0].border_color[1], "#ef4444");
    }
}
