// Database service module
// SQLite connection and schema management for persisted timetables

mod connection;
mod schema;

pub use connection::Database;
