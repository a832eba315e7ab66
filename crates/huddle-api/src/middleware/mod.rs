pub mod acting_user;
pub mod audit;
