//! # Seller Onboarding Form
//!
//! The five-step form a seller fills in before they can publish listings.
//!
//! ```text
//!   BusinessInfo ──► PersonalInfo ──► Address ──► BankAccount ──► Review
//!        │                │              │             │            │
//!   name, type,      first/last,     street, city,  account no,   submit
//!   description      email, phone    state, ZIP     routing, holder
//! ```
//!
//! Each step is validated on "Next"; the first failing field's message is
//! the alert text. The review step has no rules of its own.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::User;
use crate::validation::ValidationResult;

/// Description filled in when the seller chooses to sell as an individual.
pub const INDIVIDUAL_DESCRIPTION: &str = "Selling items on MicroShop marketplace";

/// Country pre-selected on the address step.
pub const DEFAULT_COUNTRY: &str = "US";

// =============================================================================
// Steps
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStep {
    BusinessInfo,
    PersonalInfo,
    Address,
    BankAccount,
    Review,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::BusinessInfo,
        OnboardingStep::PersonalInfo,
        OnboardingStep::Address,
        OnboardingStep::BankAccount,
        OnboardingStep::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::BusinessInfo => "Business Info",
            OnboardingStep::PersonalInfo => "Personal Info",
            OnboardingStep::Address => "Address",
            OnboardingStep::BankAccount => "Bank Account",
            OnboardingStep::Review => "Review",
        }
    }

    /// Zero-based position in the flow.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// The following step, `None` after review.
    pub fn next(&self) -> Option<OnboardingStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The preceding step, `None` on the first.
    pub fn previous(&self) -> Option<OnboardingStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    #[default]
    Individual,
    Company,
}

// =============================================================================
// Form
// =============================================================================

/// Everything the onboarding flow collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingForm {
    pub business_name: String,
    pub business_type: BusinessType,
    pub business_description: String,
    pub business_website: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub account_number: String,
    pub routing_number: String,
    pub account_holder_name: String,
}

impl OnboardingForm {
    /// Form pre-filled from the signed-in user, if any.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use microshop_core::onboarding::OnboardingForm;
    /// use microshop_core::User;
    ///
    /// let user = User {
    ///     id: "1".into(),
    ///     email: "ada@mail.com".into(),
    ///     display_name: "Ada King Lovelace".into(),
    ///     avatar: None,
    ///     created_at: Utc::now(),
    /// };
    /// let form = OnboardingForm::for_user(Some(&user));
    /// assert_eq!(form.first_name, "Ada");
    /// assert_eq!(form.last_name, "King Lovelace");
    /// assert_eq!(form.country, "US");
    /// ```
    pub fn for_user(user: Option<&User>) -> Self {
        let display_name = user.map(|u| u.display_name.as_str()).unwrap_or("");
        let (first_name, last_name) = match display_name.split_once(' ') {
            Some((first, rest)) => (first, rest),
            None => (display_name, ""),
        };

        OnboardingForm {
            business_name: display_name.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: user.map(|u| u.email.clone()).unwrap_or_default(),
            country: DEFAULT_COUNTRY.to_string(),
            account_holder_name: display_name.to_string(),
            ..Default::default()
        }
    }

    /// Switches business type. Individuals get the stock description;
    /// companies start blank. The website is cleared either way.
    pub fn set_business_type(&mut self, business_type: BusinessType) {
        self.business_type = business_type;
        self.business_description = match business_type {
            BusinessType::Individual => INDIVIDUAL_DESCRIPTION.to_string(),
            BusinessType::Company => String::new(),
        };
        self.business_website.clear();
    }

    /// Validates the fields belonging to `step`.
    pub fn validate_step(&self, step: OnboardingStep) -> ValidationResult<()> {
        let checks: Vec<(&str, &str, &str)> = match step {
            OnboardingStep::BusinessInfo => vec![
                (self.business_name.as_str(), "businessName", "Please enter your business name"),
            ],
            OnboardingStep::PersonalInfo => vec![
                (self.first_name.as_str(), "firstName", "Please enter your first name"),
                (self.last_name.as_str(), "lastName", "Please enter your last name"),
                (self.email.as_str(), "email", "Please enter your email"),
                (self.phone.as_str(), "phone", "Please enter your phone number"),
            ],
            OnboardingStep::Address => vec![
                (self.street.as_str(), "street", "Please enter your street address"),
                (self.city.as_str(), "city", "Please enter your city"),
                (self.state.as_str(), "state", "Please enter your state"),
                (self.zip_code.as_str(), "zipCode", "Please enter your ZIP code"),
            ],
            OnboardingStep::BankAccount => vec![
                (self.account_number.as_str(), "accountNumber", "Please enter your account number"),
                (self.routing_number.as_str(), "routingNumber", "Please enter your routing number"),
                (
                    self.account_holder_name.as_str(),
                    "accountHolderName",
                    "Please enter the account holder name",
                ),
            ],
            OnboardingStep::Review => vec![],
        };

        for (value, field, message) in checks {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field, message));
            }
        }

        if step == OnboardingStep::BusinessInfo
            && self.business_type == BusinessType::Company
            && self.business_description.trim().is_empty()
        {
            return Err(ValidationError::required(
                "businessDescription",
                "Please describe your business",
            ));
        }

        Ok(())
    }

    /// Validates every step in order.
    pub fn validate(&self) -> ValidationResult<()> {
        OnboardingStep::ALL
            .iter()
            .try_for_each(|step| self.validate_step(*step))
    }

    /// Last four digits of the bank account, for the review step.
    pub fn masked_account_number(&self) -> String {
        let digits: Vec<char> = self.account_number.chars().collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("****{}", tail)
    }
}
