//! DigitalOcean v1 API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Authenticated client exposing one method per operation
//! - [`request`] - Request declarations and URL building
//! - [`envelope`] - Decoding of the `status` / payload / `error_message` envelope
//! - [`http`] - GET transport
//! - [`models`] - Droplet and SSH key records
//! - [`catalog`] - Size and region slug lookup
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use fisherman::api::client::ApiClient;
//! use fisherman::config::CredentialStore;
//!
//! async fn example() -> fisherman::api::error::Result<()> {
//!     let store = CredentialStore::from_default_path()?;
//!     let client = ApiClient::new(store.load()?)?;
//!     let droplets = client.list_droplets().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod models;
pub mod request;

pub use client::ApiClient;
pub use error::{Error, Result};
