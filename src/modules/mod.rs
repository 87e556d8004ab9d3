pub mod attendance;
pub mod auth;
pub mod classes;
pub mod fees;
pub mod gallery;
pub mod reports;
pub mod students;
pub mod subjects;
pub mod timetable;
pub mod users;
