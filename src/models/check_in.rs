use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The daily slot a check-in belongs to. `Track` is the catch-all for
/// free-form retroactive entries and is exempt from the 4-per-day cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "check_in_window", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Morning,
    Afternoon,
    Evening,
    Night,
    Track,
}

impl Window {
    /// Slot for a local hour-of-day (0-23).
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Window::Morning
        } else if hour < 17 {
            Window::Afternoon
        } else if hour < 21 {
            Window::Evening
        } else {
            Window::Night
        }
    }

    pub fn is_slot(self) -> bool {
        self != Window::Track
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub window: Window,
    pub physical17: i32,
    pub cognitive17: i32,
    pub mood17: Option<i32>,
    pub stress17: Option<i32>,
    pub note: String,
    pub moods: Vec<String>,
    pub ts_utc: DateTime<Utc>,
}

/// Sleep-hygiene checklist attached to at most one check-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SleepHygiene {
    pub id: Uuid,
    pub check_in_id: Uuid,
    pub consistent_schedule: bool,
    pub no_screens: bool,
    pub relaxing_routine: bool,
    pub optimal_environment: bool,
    pub no_caffeine: bool,
}

/// Checklist as submitted; absent fields default to false.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSleepHygiene {
    pub consistent_schedule: bool,
    pub no_screens: bool,
    pub relaxing_routine: bool,
    pub optimal_environment: bool,
    pub no_caffeine: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: Uuid,
    pub check_in_id: Uuid,
    pub category_id: String,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntry {
    pub category_id: String,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckInRequest {
    pub window: Window,
    pub physical17: i32,
    pub cognitive17: i32,
    pub mood17: Option<i32>,
    pub stress17: Option<i32>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub time_entries: Vec<CreateTimeEntry>,
    #[serde(default)]
    pub sleep_hygiene: Option<CreateSleepHygiene>,
    #[serde(default)]
    pub custom_trackers: Vec<crate::models::custom_tracker::CreateTrackerValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInWithEntries {
    #[serde(flatten)]
    pub check_in: CheckIn,
    pub time_entries: Vec<TimeEntry>,
    pub sleep_hygiene: Option<SleepHygiene>,
}

/// Whether a new slot check-in may be submitted for `current_window`, given
/// today's existing check-ins. False once all four slots are used or the
/// current slot already has one. Track entries never count toward the cap.
pub fn check_in_allowed(todays: &[CheckIn], current_window: Window) -> bool {
    let slot_count = todays.iter().filter(|c| c.window.is_slot()).count();
    let window_taken = todays.iter().any(|c| c.window == current_window);
    slot_count < 4 && !window_taken
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_in(window: Window) -> CheckIn {
        CheckIn {
            id: Uuid::new_v4(),
            user_id: None,
            window,
            physical17: 4,
            cognitive17: 4,
            mood17: None,
            stress17: None,
            note: String::new(),
            moods: vec![],
            ts_utc: Utc::now(),
        }
    }

    // ── Window::for_hour ─────────────────────────────────────────────────

    #[test]
    fn test_window_for_hour_boundaries() {
        assert_eq!(Window::for_hour(0), Window::Morning);
        assert_eq!(Window::for_hour(11), Window::Morning);
        assert_eq!(Window::for_hour(12), Window::Afternoon);
        assert_eq!(Window::for_hour(16), Window::Afternoon);
        assert_eq!(Window::for_hour(17), Window::Evening);
        assert_eq!(Window::for_hour(20), Window::Evening);
        assert_eq!(Window::for_hour(21), Window::Night);
        assert_eq!(Window::for_hour(23), Window::Night);
    }

    // ── check_in_allowed ─────────────────────────────────────────────────

    #[test]
    fn test_allowed_with_no_check_ins() {
        assert!(check_in_allowed(&[], Window::Morning));
    }

    #[test]
    fn test_blocked_when_current_window_taken() {
        let todays = vec![check_in(Window::Morning)];
        assert!(!check_in_allowed(&todays, Window::Morning));
        assert!(check_in_allowed(&todays, Window::Afternoon));
    }

    #[test]
    fn test_blocked_when_all_four_slots_used() {
        let todays = vec![
            check_in(Window::Morning),
            check_in(Window::Afternoon),
            check_in(Window::Evening),
            check_in(Window::Night),
        ];
        assert!(!check_in_allowed(&todays, Window::Night));
        assert!(!check_in_allowed(&todays, Window::Morning));
    }

    #[test]
    fn test_track_entries_do_not_count_toward_cap() {
        let todays = vec![
            check_in(Window::Track),
            check_in(Window::Track),
            check_in(Window::Track),
            check_in(Window::Track),
        ];
        assert!(check_in_allowed(&todays, Window::Evening));
    }

    #[test]
    fn test_check_in_serializes_camel_case() {
        let json = serde_json::to_value(check_in(Window::Evening)).unwrap();
        assert!(json.get("tsUtc").is_some());
        assert!(json.get("userId").is_some());
        assert_eq!(json["window"], "evening");
    }
}
