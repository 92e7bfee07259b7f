#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static per-state reference tables.
//!
//! Population, political lean and gun-law score are loaded once into a
//! single [`ReferenceTables`] value which is then passed explicitly to
//! everything that needs it. The built-in dataset is embedded at compile
//! time from `data/reference.toml`; callers can also load their own TOML
//! file or assemble synthetic tables with [`ReferenceTablesBuilder`].

pub mod tables;

pub use tables::{ReferenceTables, ReferenceTablesBuilder};

use thiserror::Error;

/// Errors that can occur while loading reference tables.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// Reading a reference file from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference file is not valid TOML or has the wrong shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A table key is not one of the 50 states + DC.
    #[error("Unknown state code '{code}'")]
    UnknownState {
        /// The offending key as written in the source.
        code: String,
    },

    /// A population entry is zero.
    #[error("Population for {code} must be positive")]
    InvalidPopulation {
        /// State postal code.
        code: String,
    },

    /// A gun-law score is not a finite number in `[0, 100]`.
    #[error("Gun-law score {score} for {code} is outside 0-100")]
    InvalidLawScore {
        /// State postal code.
        code: String,
        /// The rejected score.
        score: f64,
    },
}
