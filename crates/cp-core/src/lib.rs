//! Cardpack client core.
//!
//! Platform-free logic behind the card pages: the rarity generator, the
//! favorites store, the card renderer model and the gallery / generate
//! sessions. Browser specifics live behind the traits in [`api`],
//! [`favorites`], [`gallery`] and [`generate`].

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod favorites;
pub mod gallery;
pub mod generate;
pub mod generator;
pub mod latch;
pub mod render;

#[cfg(test)]
pub(crate) mod fakes;

pub use api::CardApi;
pub use config::ClientConfig;
pub use cp_api_types as types;
pub use error::{ClientError, StoreError};
