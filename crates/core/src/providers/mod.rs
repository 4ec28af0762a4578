pub mod traits;

// Built-in collaborators
pub mod snapshot_insights;
pub mod static_source;
