//! Customer profile and feedback payloads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters in a review comment, after trimming.
pub const MIN_COMMENT_CHARS: usize = 3;

/// Profile of the signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    /// Account email.
    pub email: String,

    /// Linked phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Whether the phone passed OTP verification.
    #[serde(default)]
    pub phone_verified: Option<bool>,
}

/// Body of `PUT /user/update-phone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneUpdate {
    /// New phone number.
    pub phone: String,

    /// Verification flag, sent after a successful OTP check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Body of the OTP endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRequest {
    /// Phone number being verified.
    pub phone: String,

    /// Code received by SMS; absent when requesting a code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Reasons a review is refused before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// Reviews require a signed-in customer.
    #[error("Please login to submit a review")]
    NotAuthenticated,

    /// Ratings run from 1 to 5.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// The comment is too short to be useful.
    #[error("comment must be at least {MIN_COMMENT_CHARS} characters")]
    CommentTooShort,
}

/// A validated review, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    rating: u8,
    comment: String,
}

impl NewReview {
    /// Validate a rating and comment.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidRating`] outside `1..=5` and
    /// [`ReviewError::CommentTooShort`] for comments under three characters.
    pub fn new(rating: u8, comment: &str) -> Result<Self, ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        let comment = comment.trim();

        if comment.chars().count() < MIN_COMMENT_CHARS {
            return Err(ReviewError::CommentTooShort);
        }

        Ok(Self {
            rating,
            comment: comment.to_string(),
        })
    }

    /// Star rating.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Trimmed comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}
