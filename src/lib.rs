// HTTP server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod static_files;

// Outbound chat-completions client
pub mod upstream;
