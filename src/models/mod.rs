pub mod check_in;
pub mod custom_tracker;
pub mod happy_moment;
pub mod pomodoro;
pub mod time_category;
pub mod user;
