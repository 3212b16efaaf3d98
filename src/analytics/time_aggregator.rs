use std::collections::HashMap;

use serde::Serialize;

pub const BUILT_IN_CATEGORIES: [&str; 4] = ["work", "family", "rest", "hobby"];

const FALLBACK_ICON: &str = "📊";
const FALLBACK_COLOR: &str = "#953599";

pub fn category_color(id: &str) -> &'static str {
    match id {
        "work" => "#953599",
        "family" => "#f5855f",
        "rest" => "#ce0069",
        "hobby" => "#A855F7",
        _ => FALLBACK_COLOR,
    }
}

pub fn category_icon(id: &str) -> &'static str {
    match id {
        "work" => "💼",
        "family" => "👨‍👩‍👧‍👦",
        "rest" => "😴",
        "hobby" => "🎨",
        _ => FALLBACK_ICON,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Activity {
    pub category: String,
    pub hours: f64,
    pub icon: &'static str,
    pub color: &'static str,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDistribution {
    pub activities: Vec<Activity>,
    pub total_hours: f64,
    pub most_time_spent: String,
    pub least_time_spent: String,
}

/// Reduces date-scoped time entries to per-category totals plus most/least
/// labels. The four built-in categories always participate (at zero hours
/// if unused); entries for ids outside the totals map are dropped. When no
/// hours were logged at all but categories exist, one zero-hour activity is
/// emitted per known category so the caller never renders a blank state.
pub fn aggregate_time_entries(
    entries: &[(String, f64)],
    known_categories: &[String],
) -> ActivityDistribution {
    let mut category_totals: HashMap<String, f64> = BUILT_IN_CATEGORIES
        .iter()
        .map(|c| (c.to_string(), 0.0))
        .collect();

    for (category_id, hours) in entries {
        let key = category_id.to_lowercase();
        if let Some(total) = category_totals.get_mut(&key) {
            *total += hours;
        }
    }

    let total_hours: f64 = category_totals.values().sum();

    let mut activities: Vec<Activity> = category_totals
        .iter()
        .filter(|(_, hours)| **hours > 0.0)
        .map(|(category, hours)| Activity {
            category: category.clone(),
            hours: *hours,
            icon: category_icon(category),
            color: category_color(category),
            percentage: category_percentage(*hours, total_hours),
        })
        .collect();
    activities.sort_by(|a, b| b.hours.partial_cmp(&a.hours).unwrap_or(std::cmp::Ordering::Equal));

    if activities.is_empty() && !known_categories.is_empty() {
        let empty_activities = known_categories
            .iter()
            .map(|id| {
                let id = id.to_lowercase();
                Activity {
                    icon: category_icon(&id),
                    color: category_color(&id),
                    category: id,
                    hours: 0.0,
                    percentage: 0.0,
                }
            })
            .collect();

        return ActivityDistribution {
            activities: empty_activities,
            total_hours: 0.0,
            most_time_spent: String::new(),
            least_time_spent: String::new(),
        };
    }

    let most_time_spent = activities.first().map(|a| a.category.clone()).unwrap_or_default();
    let least_time_spent = activities.last().map(|a| a.category.clone()).unwrap_or_default();

    ActivityDistribution {
        activities,
        total_hours,
        most_time_spent,
        least_time_spent,
    }
}

/// Share of the total, in percent. A zero total yields 0 for every category
/// rather than dividing by zero.
pub fn category_percentage(hours: f64, total_hours: f64) -> f64 {
    if total_hours == 0.0 {
        0.0
    } else {
        hours / total_hours * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &[(&str, f64)]) -> Vec<(String, f64)> {
        list.iter().map(|(c, h)| (c.to_string(), *h)).collect()
    }

    fn built_ins() -> Vec<String> {
        BUILT_IN_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_totals_invariant() {
        let dist = aggregate_time_entries(
            &entries(&[("work", 8.0), ("rest", 7.0), ("work", 2.0), ("hobby", 1.5)]),
            &built_ins(),
        );
        let sum: f64 = dist.activities.iter().map(|a| a.hours).sum();
        assert!((sum - dist.total_hours).abs() < 1e-9);
        assert_eq!(dist.total_hours, 18.5);
    }

    #[test]
    fn test_sorted_descending_with_most_and_least() {
        let dist = aggregate_time_entries(
            &entries(&[("family", 3.0), ("work", 9.0), ("rest", 6.0)]),
            &built_ins(),
        );
        let hours: Vec<f64> = dist.activities.iter().map(|a| a.hours).collect();
        assert_eq!(hours, vec![9.0, 6.0, 3.0]);
        assert_eq!(dist.most_time_spent, "work");
        assert_eq!(dist.least_time_spent, "family");
    }

    #[test]
    fn test_zero_hour_categories_excluded_from_activities() {
        let dist = aggregate_time_entries(&entries(&[("work", 5.0)]), &built_ins());
        assert_eq!(dist.activities.len(), 1);
        assert_eq!(dist.activities[0].category, "work");
    }

    #[test]
    fn test_unknown_category_ids_dropped() {
        let dist = aggregate_time_entries(
            &entries(&[("work", 2.0), ("gardening", 4.0)]),
            &built_ins(),
        );
        assert_eq!(dist.total_hours, 2.0);
    }

    #[test]
    fn test_category_id_case_folded() {
        let dist = aggregate_time_entries(&entries(&[("Work", 3.0), ("WORK", 1.0)]), &built_ins());
        assert_eq!(dist.total_hours, 4.0);
        assert_eq!(dist.most_time_spent, "work");
    }

    #[test]
    fn test_empty_state_emits_zero_entry_per_known_category() {
        let dist = aggregate_time_entries(&[], &built_ins());
        assert_eq!(dist.activities.len(), 4);
        assert!(dist.activities.iter().all(|a| a.hours == 0.0));
        assert_eq!(dist.total_hours, 0.0);
        assert_eq!(dist.most_time_spent, "");
        assert_eq!(dist.least_time_spent, "");
    }

    #[test]
    fn test_no_entries_and_no_categories() {
        let dist = aggregate_time_entries(&[], &[]);
        assert!(dist.activities.is_empty());
        assert_eq!(dist.most_time_spent, "");
    }

    #[test]
    fn test_unknown_category_gets_fallback_icon_and_color() {
        let custom = vec!["meditation".to_string()];
        let dist = aggregate_time_entries(&[], &custom);
        assert_eq!(dist.activities[0].icon, "📊");
        assert_eq!(dist.activities[0].color, "#953599");
    }

    #[test]
    fn test_percentages_bounded_and_sum_to_100() {
        let dist = aggregate_time_entries(
            &entries(&[("work", 8.0), ("rest", 7.0), ("family", 5.0)]),
            &built_ins(),
        );
        let mut sum = 0.0;
        for a in &dist.activities {
            assert!((0.0..=100.0).contains(&a.percentage));
            sum += a.percentage;
        }
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_state_percentages_are_zero() {
        let dist = aggregate_time_entries(&[], &built_ins());
        assert!(dist.activities.iter().all(|a| a.percentage == 0.0));
    }

    #[test]
    fn test_percentage_with_zero_total_is_zero() {
        assert_eq!(category_percentage(0.0, 0.0), 0.0);
        assert_eq!(category_percentage(5.0, 0.0), 0.0);
    }
}
