//! Interview console library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Top-level views, switched from the nav bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Assistant,
    Calendar,
}

impl View {
    pub fn next(self) -> View {
        match self {
            View::Assistant => View::Calendar,
            View::Calendar => View::Assistant,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Assistant => "Interview assistant",
            View::Calendar => "Calendar",
        }
    }
}
