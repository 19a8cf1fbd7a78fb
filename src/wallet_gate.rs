use regex_lite::Regex;
use static_init::dynamic;

use crate::constants::OTP_MAX_ATTEMPTS;
use crate::data_types::{api_data_types::OtpVerify, ApiError, OtpError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    NotRequested,
    Sent { attempts_left: u8 },
    Verified,
    /// Attempts exhausted; a fresh OTP request is required.
    Rejected,
}

/// Gates the wallet top-up action behind an emailed one-time passcode.
/// `NotRequested -> Sent -> Verified | Rejected`, verification is single-use.
#[derive(Debug, Default)]
pub struct WalletGate {
    state: GateState,
}

impl Default for GateState {
    fn default() -> Self {
        GateState::NotRequested
    }
}

/// One verify round as the UI should react to it.
#[derive(Debug, PartialEq)]
pub enum VerifyRound {
    Verified,
    /// The server judged the code wrong; an attempt was spent.
    Rejected { message: String, locked_out: bool },
    /// The request itself failed; nothing was judged and no attempt is spent.
    TryAgain { message: String },
}

/// The backend mails 6-digit codes; anything else is rejected locally
/// before a verify request is made.
pub fn validate_code(code: &str) -> Result<(), OtpError> {
    #[dynamic]
    static OTP_RE: Regex = Regex::new("^[0-9]{6}$").unwrap();
    if OTP_RE.is_match(code) {
        Ok(())
    } else {
        Err(OtpError::MalformedCode)
    }
}

impl WalletGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Call after the OTP-request endpoint succeeded. Re-requesting always
    /// grants a fresh attempt budget, including from `Rejected`.
    pub fn mark_sent(&mut self) {
        self.state = GateState::Sent {
            attempts_left: OTP_MAX_ATTEMPTS,
        };
    }

    /// Feed in the server's verification verdict. Returns whether the gate
    /// is now verified; a failed attempt keeps the gate in `Sent` (code
    /// clearable, retry allowed) until the attempt budget runs out.
    pub fn record_verification(&mut self, verdict: &OtpVerify) -> Result<bool, OtpError> {
        let attempts_left = match self.state {
            GateState::Sent { attempts_left } => attempts_left,
            GateState::Rejected => return Err(OtpError::LockedOut),
            _ => return Err(OtpError::NotRequested),
        };

        if verdict.success {
            self.state = GateState::Verified;
            return Ok(true);
        }

        let attempts_left = attempts_left.saturating_sub(1);
        if attempts_left == 0 {
            log::warn!("wallet OTP attempts exhausted");
            self.state = GateState::Rejected;
        } else {
            self.state = GateState::Sent { attempts_left };
        }
        Ok(false)
    }

    /// Feed in the outcome of the verify call. Only a server verdict spends
    /// an attempt; transport and malformed-response failures are retryable
    /// at no cost.
    pub fn record_verify_result(
        &mut self,
        result: Result<OtpVerify, ApiError>,
    ) -> Result<VerifyRound, OtpError> {
        let verdict = match result {
            Ok(verdict) => verdict,
            // a non-2xx verdict is still the server judging the code
            Err(ApiError::Backend { message, .. }) => OtpVerify {
                success: false,
                message,
            },
            Err(e) => {
                return Ok(VerifyRound::TryAgain {
                    message: e.user_message(),
                })
            }
        };

        if self.record_verification(&verdict)? {
            return Ok(VerifyRound::Verified);
        }
        Ok(VerifyRound::Rejected {
            message: if verdict.message.is_empty() {
                "Invalid OTP!".to_string()
            } else {
                verdict.message
            },
            locked_out: self.state == GateState::Rejected,
        })
    }

    /// Let the caller through exactly once, then reset the gate.
    pub fn consume(&mut self) -> Result<(), OtpError> {
        if self.state == GateState::Verified {
            self.state = GateState::NotRequested;
            Ok(())
        } else {
            Err(OtpError::NotVerified)
        }
    }
}
