pub mod exhibit;
pub mod feedback;
pub mod language;
pub mod rating;
pub mod user;
pub mod volunteer;
