pub mod admin;
pub mod dashboard;
pub mod feedback;
pub mod home;
pub mod login_sheet;
pub mod models;
pub mod rating;
pub mod register;
pub mod star_rating;
