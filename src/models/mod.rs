// Module exports for models

pub mod lecture;
pub mod schedule;
pub mod search_option;
pub mod settings;
