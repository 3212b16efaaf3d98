use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::analytics::energy::energy_percentage;
use crate::auth::middleware::MaybeUser;
use crate::error::{AppError, AppResult};
use crate::models::check_in::{
    check_in_allowed, CheckIn, CheckInWithEntries, CreateCheckInRequest, SleepHygiene, TimeEntry,
    Window,
};
use crate::models::custom_tracker::value_text;
use crate::models::user::ensure_user;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckInListQuery {
    pub date: Option<NaiveDate>,
}

/// Check-ins for one UTC day, oldest first. Authenticated callers see only
/// their own records; guest reads are unscoped.
pub async fn list_check_ins(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
    Query(query): Query<CheckInListQuery>,
) -> AppResult<Json<Vec<CheckInWithEntries>>> {
    let day = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);

    let check_ins = match &user {
        Some(u) => {
            sqlx::query_as::<_, CheckIn>(
                r#"
                SELECT * FROM check_ins
                WHERE user_id = $1 AND ts_utc >= $2 AND ts_utc < $3
                ORDER BY ts_utc ASC
                "#,
            )
            .bind(u.id)
            .bind(start)
            .bind(end)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, CheckIn>(
                r#"
                SELECT * FROM check_ins
                WHERE ts_utc >= $1 AND ts_utc < $2
                ORDER BY ts_utc ASC
                "#,
            )
            .bind(start)
            .bind(end)
            .fetch_all(&state.db)
            .await?
        }
    };

    let ids: Vec<Uuid> = check_ins.iter().map(|c| c.id).collect();
    let entries = sqlx::query_as::<_, TimeEntry>(
        "SELECT * FROM time_entries WHERE check_in_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(&state.db)
    .await?;

    let hygiene_rows = sqlx::query_as::<_, SleepHygiene>(
        "SELECT * FROM sleep_hygiene WHERE check_in_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(&state.db)
    .await?;

    let mut by_check_in: HashMap<Uuid, Vec<TimeEntry>> = HashMap::new();
    for entry in entries {
        by_check_in.entry(entry.check_in_id).or_default().push(entry);
    }
    let mut hygiene_by_check_in: HashMap<Uuid, SleepHygiene> = hygiene_rows
        .into_iter()
        .map(|h| (h.check_in_id, h))
        .collect();

    let result = check_ins
        .into_iter()
        .map(|check_in| {
            let time_entries = by_check_in.remove(&check_in.id).unwrap_or_default();
            let sleep_hygiene = hygiene_by_check_in.remove(&check_in.id);
            CheckInWithEntries {
                check_in,
                time_entries,
                sleep_hygiene,
            }
        })
        .collect();

    Ok(Json(result))
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub energy_percentage: u8,
    pub show_check_in: bool,
    pub window: Window,
    pub check_in_count: usize,
}

/// Home-screen summary for the current UTC day: blended energy score plus
/// whether the current window still accepts a check-in.
pub async fn today_summary(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
) -> AppResult<Json<TodaySummary>> {
    let now = Utc::now();
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);

    let todays = match &user {
        Some(u) => {
            sqlx::query_as::<_, CheckIn>(
                "SELECT * FROM check_ins WHERE user_id = $1 AND ts_utc >= $2 AND ts_utc < $3",
            )
            .bind(u.id)
            .bind(start)
            .bind(end)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, CheckIn>(
                "SELECT * FROM check_ins WHERE ts_utc >= $1 AND ts_utc < $2",
            )
            .bind(start)
            .bind(end)
            .fetch_all(&state.db)
            .await?
        }
    };

    let ratings: Vec<(i32, i32)> = todays.iter().map(|c| (c.physical17, c.cognitive17)).collect();
    let window = Window::for_hour(now.time().hour());

    Ok(Json(TodaySummary {
        energy_percentage: energy_percentage(&ratings),
        show_check_in: check_in_allowed(&todays, window),
        window,
        check_in_count: todays.len(),
    }))
}

fn validate(body: &CreateCheckInRequest) -> Result<(), AppError> {
    if !(1..=7).contains(&body.physical17) {
        return Err(AppError::Validation(
            "Physical energy must be between 1 and 7".into(),
        ));
    }
    if !(1..=7).contains(&body.cognitive17) {
        return Err(AppError::Validation(
            "Cognitive energy must be between 1 and 7".into(),
        ));
    }
    if let Some(mood) = body.mood17 {
        if !(1..=5).contains(&mood) {
            return Err(AppError::Validation("Mood must be between 1 and 5".into()));
        }
    }
    if let Some(stress) = body.stress17 {
        if !(1..=4).contains(&stress) {
            return Err(AppError::Validation(
                "Stress must be between 1 and 4".into(),
            ));
        }
    }
    for entry in &body.time_entries {
        if entry.hours < 0.0 {
            return Err(AppError::Validation(
                "Time entry hours must be non-negative".into(),
            ));
        }
    }
    Ok(())
}

/// Creates a check-in and its time entries atomically. Guests may write;
/// their records carry no owning user.
pub async fn create_check_in(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
    Json(body): Json<CreateCheckInRequest>,
) -> AppResult<Json<CheckInWithEntries>> {
    validate(&body)?;

    let user_id = user.as_ref().map(|u| u.id);
    if let Some(id) = user_id {
        ensure_user(&state.db, id).await?;
    }

    let mut tx = state.db.begin().await?;

    let check_in = sqlx::query_as::<_, CheckIn>(
        r#"
        INSERT INTO check_ins (id, user_id, "window", physical17, cognitive17, mood17, stress17, note, moods, ts_utc)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(body.window)
    .bind(body.physical17)
    .bind(body.cognitive17)
    .bind(body.mood17)
    .bind(body.stress17)
    .bind(body.note.as_deref().unwrap_or(""))
    .bind(&body.moods)
    .fetch_one(&mut *tx)
    .await?;

    let mut time_entries = Vec::with_capacity(body.time_entries.len());
    for entry in &body.time_entries {
        let created = sqlx::query_as::<_, TimeEntry>(
            r#"
            INSERT INTO time_entries (id, check_in_id, category_id, hours)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(check_in.id)
        .bind(&entry.category_id)
        .bind(entry.hours)
        .fetch_one(&mut *tx)
        .await?;
        time_entries.push(created);
    }

    let sleep_hygiene = match &body.sleep_hygiene {
        Some(sh) => Some(
            sqlx::query_as::<_, SleepHygiene>(
                r#"
                INSERT INTO sleep_hygiene
                    (id, check_in_id, consistent_schedule, no_screens, relaxing_routine,
                     optimal_environment, no_caffeine)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(check_in.id)
            .bind(sh.consistent_schedule)
            .bind(sh.no_screens)
            .bind(sh.relaxing_routine)
            .bind(sh.optimal_environment)
            .bind(sh.no_caffeine)
            .fetch_one(&mut *tx)
            .await?,
        ),
        None => None,
    };

    // Values for tracker ids that no longer exist are skipped, not errors.
    for tracker_value in &body.custom_trackers {
        sqlx::query(
            r#"
            INSERT INTO custom_tracker_values (id, tracker_id, check_in_id, value, ts_utc)
            SELECT $1, id, $2, $3, NOW() FROM custom_trackers WHERE id = $4
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(check_in.id)
        .bind(value_text(&tracker_value.value))
        .bind(tracker_value.id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(Json(CheckInWithEntries {
        check_in,
        time_entries,
        sleep_hygiene,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::check_in::{CreateTimeEntry, Window};

    fn request() -> CreateCheckInRequest {
        CreateCheckInRequest {
            window: Window::Morning,
            physical17: 5,
            cognitive17: 4,
            mood17: Some(3),
            stress17: Some(2),
            note: None,
            moods: vec!["calm".into()],
            time_entries: vec![CreateTimeEntry {
                category_id: "work".into(),
                hours: 8.0,
            }],
            sleep_hygiene: None,
            custom_trackers: vec![],
        }
    }

    #[test]
    fn test_request_accepts_sleep_hygiene_and_tracker_values() {
        let json = r#"{
            "window": "evening",
            "physical17": 5,
            "cognitive17": 4,
            "sleepHygiene": { "noScreens": true, "noCaffeine": true },
            "customTrackers": [
                { "id": "00000000-0000-0000-0000-000000000000", "value": 7 },
                { "id": "00000000-0000-0000-0000-000000000001", "value": "great" }
            ]
        }"#;

        let req: CreateCheckInRequest = serde_json::from_str(json).unwrap();
        assert!(validate(&req).is_ok());

        let sh = req.sleep_hygiene.unwrap();
        assert!(sh.no_screens);
        assert!(sh.no_caffeine);
        assert!(!sh.consistent_schedule);

        assert_eq!(req.custom_trackers.len(), 2);
        assert_eq!(value_text(&req.custom_trackers[0].value), "7");
        assert_eq!(value_text(&req.custom_trackers[1].value), "great");
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_rating_bounds_enforced() {
        let mut bad = request();
        bad.physical17 = 0;
        assert!(validate(&bad).is_err());

        let mut bad = request();
        bad.cognitive17 = 8;
        assert!(validate(&bad).is_err());

        let mut bad = request();
        bad.mood17 = Some(6);
        assert!(validate(&bad).is_err());

        let mut bad = request();
        bad.stress17 = Some(5);
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn test_optional_ratings_may_be_absent() {
        let mut req = request();
        req.mood17 = None;
        req.stress17 = None;
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_negative_hours_rejected() {
        let mut bad = request();
        bad.time_entries[0].hours = -1.0;
        assert!(validate(&bad).is_err());
    }
}
