pub mod client;
pub mod config;
pub mod error;

pub use client::StoreClient;
pub use config::StoreConfig;
pub use error::StoreError;
