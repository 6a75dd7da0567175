//! Shared types for the member registration system
//!
//! Domain models and pure helpers used by member-server:
//! - [`models`] - the member record and its API payloads
//! - [`kana`] - full-width → half-width Katakana conversion (フリガナ正規化)
//! - [`phone`] - Japan phone number parsing and formatting
//! - [`util`] - ID and timestamp helpers

pub mod kana;
pub mod models;
pub mod phone;
pub mod util;

// Re-exports
pub use models::{Member, MemberCreate, MemberUpdate, MemberView};
pub use phone::{JapanPhone, PhoneParseError};
pub use serde::{Deserialize, Serialize};
