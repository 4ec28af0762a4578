pub mod budget_service;
pub mod category_service;
pub mod filter_service;
pub mod format_service;
pub mod summary_service;
