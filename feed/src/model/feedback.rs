//! User feedback submissions.

use serde::{Deserialize, Serialize};

use super::{EventMeta, FixtureError};

/// A feedback form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    #[serde(flatten)]
    pub meta: EventMeta,

    /// Submission category, e.g. `"bug"`, `"feature_request"`, `"praise"`.
    pub category: String,

    /// Star rating from 1 to 5, when the form collected one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Free-text feedback body.
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// Page or surface the submission came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl FeedbackSubmission {
    pub(crate) fn validate(&self) -> Result<(), FixtureError> {
        if self.message.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "message",
            });
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(FixtureError::OutOfRange {
                    id: self.meta.id.clone(),
                    field: "rating",
                    message: format!("expected 1..=5, got {rating}"),
                });
            }
        }
        Ok(())
    }
}
