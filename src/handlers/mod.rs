pub mod analytics;
pub mod check_ins;
pub mod custom_trackers;
pub mod happy_moments;
pub mod health;
pub mod insights;
pub mod pomodoro;
pub mod time_categories;
