//! Simulated payment gateway rules.
//!
//! Nothing here talks to a processor. Card payments are "authorized" by
//! entering [`SIMULATED_OTP`]; UPI and PayPal succeed once the shopper
//! confirms the redirect dialog.

use serde::{Deserialize, Serialize};

use crate::types::Email;

/// The one-time password every simulated card payment accepts.
pub const SIMULATED_OTP: &str = "123456";

/// Minimum characters in a card number.
pub const MIN_CARD_NUMBER_LEN: usize = 12;

/// Minimum characters in a CVV.
pub const MIN_CVV_LEN: usize = 3;

/// Payment validation errors, worded as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Please fill in valid card details.")]
    InvalidCard,
    #[error("Please enter a valid UPI ID.")]
    InvalidUpiId,
    #[error("Please enter a valid PayPal email.")]
    InvalidPaypalEmail,
    #[error("Invalid OTP!")]
    InvalidOtp,
    #[error("Unknown payment method: {0}")]
    UnknownMethod(String),
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    Paypal,
}

impl PaymentMethod {
    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Upi => "upi",
            Self::Paypal => "paypal",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Upi => "UPI",
            Self::Paypal => "PayPal",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Card, Self::Upi, Self::Paypal]
    }

    /// Whether success needs an OTP rather than a confirmation click.
    #[must_use]
    pub const fn requires_otp(self) -> bool {
        matches!(self, Self::Card)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "paypal" => Ok(Self::Paypal),
            other => Err(PaymentError::UnknownMethod(other.to_string())),
        }
    }
}

/// What the shopper typed for the chosen method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDetails {
    Card {
        number: String,
        expiry: String,
        cvv: String,
    },
    Upi {
        id: String,
    },
    Paypal {
        email: String,
    },
}

impl PaymentDetails {
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Card { .. } => PaymentMethod::Card,
            Self::Upi { .. } => PaymentMethod::Upi,
            Self::Paypal { .. } => PaymentMethod::Paypal,
        }
    }

    /// Check the details the way the payment form does.
    ///
    /// # Errors
    ///
    /// Returns the method-specific [`PaymentError`] when a field is missing
    /// or malformed.
    pub fn validate(&self) -> Result<PaymentMethod, PaymentError> {
        match self {
            Self::Card {
                number,
                expiry,
                cvv,
            } => {
                // Lengths count every character, separators included.
                if number.chars().count() < MIN_CARD_NUMBER_LEN
                    || expiry.is_empty()
                    || cvv.chars().count() < MIN_CVV_LEN
                {
                    return Err(PaymentError::InvalidCard);
                }
            }
            Self::Upi { id } => {
                if !id.contains('@') {
                    return Err(PaymentError::InvalidUpiId);
                }
            }
            Self::Paypal { email } => {
                let email = Email::parse(email).map_err(|_| PaymentError::InvalidPaypalEmail)?;
                if !email.as_str().contains('.') {
                    return Err(PaymentError::InvalidPaypalEmail);
                }
            }
        }
        Ok(self.method())
    }
}

/// Check a submitted OTP.
///
/// # Errors
///
/// Returns [`PaymentError::InvalidOtp`] unless the code is exactly
/// [`SIMULATED_OTP`].
pub fn verify_otp(otp: &str) -> Result<(), PaymentError> {
    if otp.trim() == SIMULATED_OTP {
        Ok(())
    } else {
        Err(PaymentError::InvalidOtp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str, expiry: &str, cvv: &str) -> PaymentDetails {
        PaymentDetails::Card {
            number: number.to_string(),
            expiry: expiry.to_string(),
            cvv: cvv.to_string(),
        }
    }

    #[test]
    fn test_card_validation() {
        assert_eq!(
            card("4111 1111 1111", "12/29", "123").validate(),
            Ok(PaymentMethod::Card)
        );
        assert_eq!(
            card("1234 5678 901", "12/29", "123").validate(),
            Ok(PaymentMethod::Card)
        );
        assert_eq!(
            card("41111111111", "12/29", "123").validate(),
            Err(PaymentError::InvalidCard)
        );
        assert_eq!(
            card("411111111111", "", "123").validate(),
            Err(PaymentError::InvalidCard)
        );
        assert_eq!(
            card("411111111111", "12/29", "12").validate(),
            Err(PaymentError::InvalidCard)
        );
    }

    #[test]
    fn test_upi_validation() {
        let ok = PaymentDetails::Upi {
            id: "shopper@okbank".into(),
        };
        let bad = PaymentDetails::Upi {
            id: "shopper".into(),
        };
        assert_eq!(ok.validate(), Ok(PaymentMethod::Upi));
        assert_eq!(bad.validate(), Err(PaymentError::InvalidUpiId));
    }

    #[test]
    fn test_paypal_validation() {
        let ok = PaymentDetails::Paypal {
            email: "me@pay.com".into(),
        };
        let no_dot = PaymentDetails::Paypal {
            email: "me@paycom".into(),
        };
        let no_at = PaymentDetails::Paypal {
            email: "me.pay.com".into(),
        };
        assert_eq!(ok.validate(), Ok(PaymentMethod::Paypal));
        assert_eq!(no_dot.validate(), Err(PaymentError::InvalidPaypalEmail));
        assert_eq!(no_at.validate(), Err(PaymentError::InvalidPaypalEmail));
    }

    #[test]
    fn test_verify_otp() {
        assert!(verify_otp("123456").is_ok());
        assert_eq!(verify_otp("654321"), Err(PaymentError::InvalidOtp));
        assert_eq!(verify_otp(""), Err(PaymentError::InvalidOtp));
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("upi".parse::<PaymentMethod>(), Ok(PaymentMethod::Upi));
        assert!("cash".parse::<PaymentMethod>().is_err());
        assert!(PaymentMethod::Card.requires_otp());
        assert!(!PaymentMethod::Paypal.requires_otp());
    }
}
