// Service module exports

pub mod catalog;
pub mod database;
pub mod drag;
pub mod grid;
pub mod lecture_filter;
pub mod paging;
pub mod schedule_encoding;
pub mod settings;
pub mod table_store;
