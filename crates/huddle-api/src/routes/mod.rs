pub mod admin;
pub mod assessments;
pub mod health;
pub mod participations;
