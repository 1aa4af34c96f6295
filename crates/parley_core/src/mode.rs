//! Line mode selection.

use serde::{Deserialize, Serialize};

/// Per-request persona strictness flag.
///
/// `Economy` asks for a general-purpose helper persona, `Premium` leaves the
/// system prompt untouched. Parsing is case-insensitive.
///
/// # Examples
///
/// ```
/// use parley_core::LineMode;
///
/// let mode: LineMode = "Economy".parse().unwrap();
/// assert_eq!(mode, LineMode::Economy);
/// assert_eq!(LineMode::default(), LineMode::Premium);
/// assert!("business".parse::<LineMode>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LineMode {
    /// Default persona
    #[default]
    Premium,
    /// General-purpose helper persona
    Economy,
}
