pub mod admin;
pub mod feedback;
pub mod models;
pub mod ratings;
pub mod static_files;
pub mod users;
pub mod volunteers;
