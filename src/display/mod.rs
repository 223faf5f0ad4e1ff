//! Derived display state computed from backend entities.
//!
//! Everything here is a pure function of its inputs (the current time is
//! always passed in). None of these helpers fail: unknown or missing input
//! degrades to a default such as a gray badge, a zero average or the public
//! read-only path.

mod milestone;
mod paging;
mod project;
mod schedule;
mod score;

pub use milestone::*;
pub use paging::*;
pub use project::*;
pub use schedule::*;
pub use score::*;

use serde::Serialize;

/// Badge colors available to status badges.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Gray,
    Blue,
    Green,
    Red,
    Yellow,
}

/// Language used for derived messages.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Cs,
    En,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cs" | "cz" => Some(Locale::Cs),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}
