#![forbid(unsafe_code)]

use std::fmt;

pub mod checks;
pub mod logging;
pub mod ownership;
pub mod report;

pub use report::{render_json, render_jsonl, render_text, sorted_violations};

#[derive(Debug)]
pub enum CheckError {
    Failed(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(detail) => write!(f, "check failed: {detail}"),
        }
    }
}

impl std::error::Error for CheckError {}

#[cfg(test)]
pub(crate) mod testutil;
