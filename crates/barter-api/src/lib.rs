mod config;
mod error;
mod handlers;
mod server;
mod state;

pub use config::ApiConfig;
pub use error::ApiError;
pub use handlers::parse_deadline;
pub use server::create_app;
pub use state::AppState;

#[cfg(test)]
mod tests;
