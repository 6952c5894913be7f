//! Employer entity and the profile data collected during onboarding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::registration::RegistrationStep;
use crate::domain::value_objects::Identity;
use crate::errors::ValidationError;

/// A registered employer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// Public identity carried in session tokens
    pub identity: Identity,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub mobile_number: String,

    /// Job title within the company
    #[serde(default)]
    pub role: String,

    /// Current onboarding step
    pub registration_step: RegistrationStep,

    /// Timestamp when the employer signed up
    pub created_at: DateTime<Utc>,

    /// Timestamp when the employer was last updated
    pub updated_at: DateTime<Utc>,
}

impl Employer {
    /// Creates a new employer with a fresh identity at the first onboarding step
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            identity: Identity::generate(),
            first_name,
            last_name,
            email,
            phone_number: String::new(),
            mobile_number: String::new(),
            role: String::new(),
            registration_step: RegistrationStep::initial(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the non-blank fields of an account update
    pub fn apply(&mut self, update: &AccountUpdate) {
        fn keep_or_replace(field: &mut String, value: &str) {
            let value = value.trim();
            if !value.is_empty() {
                *field = value.to_string();
            }
        }

        keep_or_replace(&mut self.first_name, &update.first_name);
        keep_or_replace(&mut self.last_name, &update.last_name);
        keep_or_replace(&mut self.email, &update.email);
        keep_or_replace(&mut self.phone_number, &update.phone_number);
        keep_or_replace(&mut self.mobile_number, &update.mobile_number);
        keep_or_replace(&mut self.role, &update.role);
        self.updated_at = Utc::now();
    }

    /// Read model returned to clients
    pub fn profile(&self) -> EmployerProfile {
        EmployerProfile {
            publicid: self.identity.to_string(),
            firstname: self.first_name.clone(),
            lastname: self.last_name.clone(),
            email: self.email.clone(),
            phonenumber: self.phone_number.clone(),
            mobilenumber: self.mobile_number.clone(),
            role: self.role.clone(),
            registrationstep: self.registration_step,
        }
    }
}

/// Personal/account details update; blank fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub role: String,
}

/// Employer as reported to clients, including onboarding progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub publicid: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phonenumber: String,
    pub mobilenumber: String,
    pub role: String,
    pub registrationstep: RegistrationStep,
}

/// Company the employer hires for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "streetaddress")]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, rename = "zipcode")]
    pub zip_code: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
}

/// How the employer pays for job packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    Invoice,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::Invoice => "invoice",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit-card" | "creditcard" | "card" => Ok(PaymentMethod::CreditCard),
            "invoice" => Ok(PaymentMethod::Invoice),
            _ => Err(ValidationError::UnknownPaymentMethod {
                value: s.to_string(),
            }),
        }
    }
}

/// Billing details for invoices and receipts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default, rename = "billingname")]
    pub billing_name: String,
    #[serde(default, rename = "billingemail")]
    pub billing_email: String,
    #[serde(default, rename = "billingaddress")]
    pub billing_address: String,
    #[serde(default, rename = "billingzipcode")]
    pub billing_zip_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employer() -> Employer {
        Employer::new("Jane".to_string(), "Doe".to_string(), "jane@example.com".to_string())
    }

    #[test]
    fn test_new_employer_starts_at_change_password() {
        let employer = employer();
        assert_eq!(employer.registration_step, RegistrationStep::ChangePassword);
        assert!(!employer.identity.is_empty());
        assert_eq!(employer.created_at, employer.updated_at);
    }

    #[test]
    fn test_new_employers_get_distinct_identities() {
        assert_ne!(employer().identity, employer().identity);
    }

    #[test]
    fn test_apply_keeps_blank_fields() {
        let mut employer = employer();
        employer.apply(&AccountUpdate {
            last_name: "Smith".to_string(),
            role: "  Recruiter ".to_string(),
            email: "   ".to_string(),
            ..Default::default()
        });

        assert_eq!(employer.first_name, "Jane");
        assert_eq!(employer.last_name, "Smith");
        assert_eq!(employer.email, "jane@example.com");
        assert_eq!(employer.role, "Recruiter");
    }

    #[test]
    fn test_profile_serializes_with_wire_names() {
        let json = serde_json::to_value(employer().profile()).unwrap();
        assert_eq!(json["firstname"], "Jane");
        assert_eq!(json["registrationstep"], "change-password");
        assert!(json["publicid"].as_str().is_some());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("credit-card".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!("Invoice".parse::<PaymentMethod>().unwrap(), PaymentMethod::Invoice);
        assert!("barter".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_company_profile_deserializes_wire_names() {
        let company: CompanyProfile = serde_json::from_str(
            r#"{"name":"Acme","streetaddress":"1 Main St","zipcode":"12345"}"#,
        )
        .unwrap();
        assert_eq!(company.street_address, "1 Main St");
        assert_eq!(company.zip_code, "12345");
        assert!(company.city.is_empty());
    }
}
