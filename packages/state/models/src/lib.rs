#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! US state codes and political category types.
//!
//! This crate defines the grouping key used across the whole dashboard:
//! every state is placed in exactly one [`PoliticalCategory`] bucket, and
//! all data sources normalize their state identifiers into the postal
//! codes listed in [`codes::STATES`].

pub mod codes;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use codes::{normalize_state_code, state_name};

/// Political lean of a state based on recent voting history.
///
/// Used purely as a grouping key when aggregating incident counts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PoliticalCategory {
    /// Consistently votes Republican
    Red,
    /// Consistently votes Democratic
    Blue,
    /// Competitive in recent statewide elections
    Swing,
}

impl PoliticalCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Red, Self::Blue, Self::Swing]
    }
}
