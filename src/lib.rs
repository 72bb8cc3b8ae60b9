pub mod app;
pub mod config;
pub mod error;
pub mod exhibit;
pub mod keys;
pub mod links;
pub mod output;
pub mod record;
pub mod render;
pub mod sample;
pub mod store;
pub mod table;
