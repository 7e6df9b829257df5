pub mod attendance;
pub mod auth;
pub mod classes;
pub mod core;
pub mod dashboards;
pub mod grades;
pub mod notify;
pub mod students;
pub mod teachers;
pub mod users;
