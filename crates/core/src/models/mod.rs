pub mod budget;
pub mod dashboard;
pub mod date_range;
pub mod session;
pub mod settings;
pub mod spending;
pub mod summary;
pub mod transaction;
