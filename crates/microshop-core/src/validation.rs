//! # Validation Module
//!
//! Form rules for the sign-in, listing and checkout screens. Each failure is
//! a [`ValidationError`] whose text is what the screen shows.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen input (strings)                                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  THIS MODULE: trim, parse, check ── first failure ──► alert text        │
//! │        │                                                                │
//! │        ▼ typed request (CreateInventoryRequest, ...)                    │
//! │  Command layer ──► stores / inventory backend                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Forms report the first failing field, in the order the fields appear
//! on screen.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Address, CreateInventoryRequest};
use crate::{DEFAULT_CURRENCY, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length accepted by the auth screens.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Field Validators
// =============================================================================

/// Loose e-mail shape check: `\S+@\S+\.\S+`.
///
/// ## Example
/// ```rust
/// use microshop_core::validation::is_plausible_email;
///
/// assert!(is_plausible_email("ada@example.com"));
/// assert!(!is_plausible_email("ada@example"));
/// assert!(!is_plausible_email("@example.com"));
/// ```
pub fn is_plausible_email(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        let bytes = token.as_bytes();
        let Some(at) = token.find('@') else {
            return false;
        };
        if at == 0 {
            return false;
        }
        // a dot with at least one byte on each side, after the '@'
        bytes
            .iter()
            .enumerate()
            .any(|(i, &b)| b == b'.' && i >= at + 2 && i + 1 < bytes.len())
    })
}

/// Validates the e-mail field of the auth screens.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.is_empty() {
        return Err(ValidationError::required("email", "Email is required"));
    }
    if !is_plausible_email(email) {
        return Err(ValidationError::invalid("email", "Please enter a valid email"));
    }
    Ok(())
}

/// Validates the password field of the auth screens.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password", "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Login form: e-mail then password.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    validate_email(email)?;
    validate_password(password)
}

/// Register form: name, e-mail, password.
pub fn validate_registration(name: &str, email: &str, password: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::required("name", "Name is required"));
    }
    validate_login(email, password)
}

/// Validates a listing quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Parses a positive price typed in major units, at most [`MAX_PRICE_CENTS`].
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    match Money::parse_input(input) {
        Some(money) if money.is_positive() && money.cents() <= MAX_PRICE_CENTS => Ok(money),
        _ => Err(ValidationError::invalid("price", "Please enter a valid price")),
    }
}

// =============================================================================
// Listing Form
// =============================================================================

/// Raw fields of the create-listing screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    /// Price in major units, as typed.
    pub price: String,
    /// Quantity as typed; blank or unparseable means 1.
    pub quantity: String,
    pub category: String,
    pub condition: String,
    /// Shipping cost in major units; blank means none.
    pub shipping_cost: String,
}

impl ListingForm {
    /// Validates the form and builds the create request.
    ///
    /// ## Example
    /// ```rust
    /// use microshop_core::validation::ListingForm;
    ///
    /// let form = ListingForm {
    ///     title: "  Desk lamp ".into(),
    ///     price: "18.5".into(),
    ///     ..Default::default()
    /// };
    /// let req = form.into_request().unwrap();
    /// assert_eq!(req.title, "Desk lamp");
    /// assert_eq!(req.price_cents, 1850);
    /// assert_eq!(req.quantity_available, Some(1));
    /// ```
    pub fn into_request(self) -> ValidationResult<CreateInventoryRequest> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::required("title", "Please enter a title"));
        }

        let price = parse_price(&self.price)?;

        let quantity = match self.quantity.trim().parse::<i64>() {
            Ok(q) if q != 0 => q,
            _ => 1,
        };
        validate_quantity(quantity)?;

        let shipping_cost_cents = match self.shipping_cost.trim() {
            "" => None,
            raw => match Money::parse_input(raw) {
                Some(cost) if (0..=MAX_PRICE_CENTS).contains(&cost.cents()) => {
                    Some(cost.cents())
                }
                _ => {
                    return Err(ValidationError::invalid(
                        "shippingCost",
                        "Please enter a valid shipping cost",
                    ))
                }
            },
        };

        Ok(CreateInventoryRequest {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            price_cents: price.cents(),
            currency: Some(DEFAULT_CURRENCY.to_string()),
            quantity_available: Some(quantity),
            category: non_blank(&self.category),
            condition: non_blank(&self.condition),
            shipping_cost_cents,
            ..Default::default()
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Buyer details collected on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
}

impl CheckoutForm {
    pub fn validate(&self) -> ValidationResult<()> {
        if !self.email.contains('@') {
            return Err(ValidationError::invalid(
                "email",
                "Please enter a valid email address",
            ));
        }
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(ValidationError::required("name", "Please enter your full name"));
        }
        let a = &self.address;
        if a.street.is_empty() || a.city.is_empty() || a.state.is_empty() || a.postal_code.is_empty() {
            return Err(ValidationError::required(
                "address",
                "Please complete your shipping address",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("a@b.c"));
        assert!(is_plausible_email("first.last@shop.example.org"));
        assert!(is_plausible_email("  padded@mail.io  "));
        assert!(!is_plausible_email("a@.c"));
        assert!(!is_plausible_email("a@b."));
        assert!(!is_plausible_email("a.b@c"));
        assert!(!is_plausible_email("no-at-sign.com"));
    }

    #[test]
    fn test_login_messages() {
        assert_eq!(
            validate_login("", "secret1").unwrap_err().to_string(),
            "Email is required"
        );
        assert_eq!(
            validate_login("bob", "secret1").unwrap_err().to_string(),
            "Please enter a valid email"
        );
        assert_eq!(
            validate_login("bob@mail.com", "").unwrap_err().to_string(),
            "Password is required"
        );
        assert_eq!(
            validate_login("bob@mail.com", "12345").unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );
        assert!(validate_login("bob@mail.com", "123456").is_ok());
    }

    #[test]
    fn test_registration_requires_name_first() {
        let err = validate_registration("", "", "").unwrap_err();
        assert_eq!(err.field(), "name");
        assert!(validate_registration("Bob", "bob@mail.com", "hunter22").is_ok());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12.34").unwrap().cents(), 1234);
        assert!(parse_price("0").is_err());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("1e300").is_err());
        assert!(parse_price("1000000").is_err());
        assert_eq!(parse_price("999999.99").unwrap().cents(), MAX_PRICE_CENTS);
        assert_eq!(
            parse_price("abc").unwrap_err().to_string(),
            "Please enter a valid price"
        );
    }

    #[test]
    fn test_listing_form_defaults_and_trimming() {
        let req = ListingForm {
            title: "Bike".into(),
            description: "  red  ".into(),
            price: "120".into(),
            quantity: "0".into(),
            category: "   ".into(),
            condition: " used ".into(),
            shipping_cost: "9.99".into(),
        }
        .into_request()
        .unwrap();

        assert_eq!(req.description, "red");
        assert_eq!(req.price_cents, 12000);
        assert_eq!(req.quantity_available, Some(1));
        assert_eq!(req.category, None);
        assert_eq!(req.condition.as_deref(), Some("used"));
        assert_eq!(req.shipping_cost_cents, Some(999));
        assert_eq!(req.currency.as_deref(), Some("usd"));
    }

    #[test]
    fn test_listing_form_errors() {
        let err = ListingForm {
            title: "   ".into(),
            price: "10".into(),
            ..Default::default()
        }
        .into_request()
        .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a title");

        let err = ListingForm {
            title: "Lamp".into(),
            price: "10".into(),
            quantity: "-4".into(),
            ..Default::default()
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));

        let err = ListingForm {
            title: "Lamp".into(),
            price: "10".into(),
            shipping_cost: "free".into(),
            ..Default::default()
        }
        .into_request()
        .unwrap_err();
        assert_eq!(err.field(), "shippingCost");

        let err = ListingForm {
            title: "Lamp".into(),
            price: "1e300".into(),
            ..Default::default()
        }
        .into_request()
        .unwrap_err();
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn test_checkout_form() {
        let mut form = CheckoutForm {
            email: "buyer@mail.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            address: Address {
                street: "1 Main St".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                postal_code: "62701".into(),
                country: "US".into(),
            },
        };
        assert!(form.validate().is_ok());

        form.address.city.clear();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please complete your shipping address"
        );

        form.last_name.clear();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please enter your full name"
        );

        form.email = "buyer".into();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please enter a valid email address"
        );
    }
}
