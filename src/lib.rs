pub mod config;
pub mod handler;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;
