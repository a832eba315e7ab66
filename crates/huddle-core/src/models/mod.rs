pub mod assessment;
pub mod participation;
