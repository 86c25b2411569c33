//! Agora Types - Core type definitions for the AGORA governance engine.
//!
//! This crate provides the fundamental types used throughout the engine:
//! - Principals (20-byte caller identities, Bech32m encoded)
//! - Type-level errors

pub mod principal;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use principal::Principal;
pub use error::TypesError;
