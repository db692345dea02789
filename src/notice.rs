//! User-facing notices.
//!
//! Failures stop here: callers turn outcomes and errors into a [`Notice`] for
//! display instead of letting them escape into the navigation chrome.

use crate::error::ApiError;
use crate::menu::editor::SaveOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub retryable: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn no_changes() -> Self {
        Self::info("No changes to save")
    }

    pub fn from_save(outcome: &SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::NoChanges => Self::no_changes(),
            SaveOutcome::Saved { .. } => Self::success("Menu structure saved"),
        }
    }

    /// Local validation problems warn; backend failures are errors.
    pub fn from_error(err: &ApiError) -> Self {
        let level = match err {
            ApiError::InvalidName(_) | ApiError::NodeNotFound(_) | ApiError::NotEditing(_) => {
                NoticeLevel::Warning
            }
            _ => NoticeLevel::Error,
        };
        let retryable = err.is_retryable();
        let mut message = err.to_string();
        if retryable {
            message.push_str(". Your changes were kept; try saving again.");
        }
        Self {
            level,
            message,
            retryable,
        }
    }
}
