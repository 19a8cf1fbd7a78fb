pub mod api_data_types;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::GENERIC_API_MSG;

/// Meal categories partition both the menu and placed orders.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealCategory {
    pub const ALL: [MealCategory; 3] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            other => Err(format!("unknown meal category '{other}'")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// non-2xx response; message is the server-provided one when present
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// response body did not match the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Server messages are surfaced verbatim, everything else collapses
    /// into a generic retryable notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend { message, .. } => message.clone(),
            _ => GENERIC_API_MSG.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,
    #[error("Insufficient wallet balance!")]
    InsufficientBalance,
    #[error("an order submission is already in flight")]
    SubmissionInFlight,
    #[error("checkout is not idle")]
    NotIdle,
    #[error("no order is awaiting confirmation")]
    NotPendingConfirmation,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("the code must be exactly 6 digits")]
    MalformedCode,
    #[error("no OTP has been requested")]
    NotRequested,
    #[error("too many failed attempts, request a new OTP")]
    LockedOut,
    #[error("wallet access has not been verified")]
    NotVerified,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuFormError {
    #[error("item name is required")]
    EmptyName,
    #[error("image URL is required")]
    EmptyImage,
    #[error("price must be a non-negative number")]
    InvalidPrice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrips_through_wire_format() {
        for cat in MealCategory::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
            assert_eq!(cat.as_str().parse::<MealCategory>().unwrap(), cat);
        }
        assert!("brunch".parse::<MealCategory>().is_err());
    }

    #[test]
    fn backend_message_is_surfaced_verbatim() {
        let err = ApiError::Backend {
            status: 400,
            message: "Insufficient balance".into(),
        };
        assert_eq!(err.user_message(), "Insufficient balance");

        let err = ApiError::MalformedResponse("missing field `name`".into());
        assert_eq!(err.user_message(), GENERIC_API_MSG);
    }
}
