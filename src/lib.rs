pub mod app;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod output;
pub mod present;
pub mod search;
pub mod store;
pub mod taxonomy;
