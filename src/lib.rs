pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::ApiClient;
pub use config::ClientConfig;
pub use errors::ClientError;
pub use handlers::Refreshed;
pub use state::{Page, Session};
