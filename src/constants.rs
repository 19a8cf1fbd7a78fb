use std::{sync::OnceLock, time::Duration};

pub static API_URL: OnceLock<String> = OnceLock::new();

/// "added to cart" notices disappear after this long
pub const CART_NOTICE_TTL: Duration = Duration::from_millis(1500);

/// verify attempts granted per requested OTP
pub const OTP_MAX_ATTEMPTS: u8 = 3;

pub const GENERIC_API_MSG: &str = "Something went wrong. Please try again.";

pub const CURRENCY: &str = "₹";
