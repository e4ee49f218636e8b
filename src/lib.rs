pub mod config;
pub mod domain;
pub mod handler;
pub mod sqlite;
