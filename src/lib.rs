//! warpgate-provider
//!
//! Declarative resource management for the Warpgate access gateway's REST
//! admin API. Maps resource definitions (users, roles, targets, credentials,
//! tickets) onto CRUD calls and flattens the responses back into local
//! state, for embedding in a declarative-infrastructure host runtime.
//!
//! # Layers
//!
//! - [`client`] - typed, authenticated HTTP client for the admin API
//! - [`resource`] - per-entity lifecycle operations over the client
//! - [`datasource`] - read-only lookups by ID or name
//! - [`config`] - connection settings from explicit values or environment
//!
//! # Example
//!
//! ```ignore
//! use warpgate_provider::resource::RoleResource;
//! use warpgate_provider::ProviderConfig;
//!
//! async fn example() -> warpgate_provider::Result<()> {
//!     let client = ProviderConfig::from_env().client()?;
//!
//!     let mut role = RoleResource {
//!         name: "developers".to_string(),
//!         ..Default::default()
//!     };
//!     role.create(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod datasource;
pub mod error;
pub mod resource;

pub use client::Client;
pub use config::ProviderConfig;
pub use error::{Error, Result};
