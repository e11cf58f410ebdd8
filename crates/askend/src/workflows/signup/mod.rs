//! Account forms: sign-up, sign-in and the professional-info onboarding step.
//!
//! Each form validates to either a cleaned payload ready for the auth backend or a rejection
//! carrying the per-field messages shown next to the inputs.

mod professional;
mod rules;

pub use professional::{
    education_options, format_income, ProfessionalField, ProfessionalInfo,
    ProfessionalInfoError, ProfessionalInfoForm, COMMON_MAJORS, INCOME_STEP,
    MAX_MONTHLY_INCOME, PROFESSIONS,
};
pub use rules::{
    check_password_match, sanitize_mobile_input, to_title_case, validate_email,
    validate_full_name, validate_mobile_number, validate_password, FieldError,
    PasswordCriteria,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub type FieldErrors = BTreeMap<FormField, FieldError>;

/// Account type chosen before sign-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Filler,
    Creator,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Filler => "filler",
            UserRole::Creator => "creator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "filler" => Some(UserRole::Filler),
            "creator" => Some(UserRole::Creator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    MobileNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile_number: String,
    pub agreed_to_terms: bool,
    pub role: UserRole,
}

/// Sign-up payload after validation. The password is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedSignUp {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub mobile_number: String,
    pub role: UserRole,
}

impl ValidatedSignUp {
    /// User metadata stored alongside the auth account.
    pub fn metadata(&self) -> Value {
        json!({
            "full_name": self.full_name,
            "phone_number": self.mobile_number,
            "user_role": self.role.as_str(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpRejected {
    #[error("Please agree to terms and conditions.")]
    TermsNotAccepted { field_errors: FieldErrors },
    #[error("Please ensure your password meets all the listed security criteria and rules.")]
    WeakPassword {
        criteria: PasswordCriteria,
        field_errors: FieldErrors,
    },
    #[error("Please correct the highlighted errors in the form.")]
    InvalidFields { field_errors: FieldErrors },
}

impl SignUpRejected {
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            SignUpRejected::TermsNotAccepted { field_errors }
            | SignUpRejected::WeakPassword { field_errors, .. }
            | SignUpRejected::InvalidFields { field_errors } => field_errors,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SignUpRejected::WeakPassword { .. } => "Security Requirement",
            _ => "Error",
        }
    }
}

impl SignUpForm {
    /// Every field is checked so all messages can be shown at once; the rejection reports the
    /// blocking problem in the order terms, password strength, field errors.
    pub fn validate(&self) -> Result<ValidatedSignUp, SignUpRejected> {
        let mut field_errors = FieldErrors::new();

        if let Err(error) = validate_full_name(&self.full_name) {
            field_errors.insert(FormField::FullName, error);
        }
        if let Err(error) = validate_email(&self.email) {
            field_errors.insert(FormField::Email, error);
        }
        let password_error = validate_password(&self.password).err();
        if let Some(error) = password_error.clone() {
            field_errors.insert(FormField::Password, error);
        }
        if let Err(error) = validate_mobile_number(&self.mobile_number) {
            field_errors.insert(FormField::MobileNumber, error);
        }
        if self.password != self.confirm_password {
            field_errors.insert(FormField::ConfirmPassword, FieldError::PasswordMismatch);
        }

        if !self.agreed_to_terms {
            return Err(SignUpRejected::TermsNotAccepted { field_errors });
        }

        let criteria = PasswordCriteria::assess(&self.password);
        if !criteria.is_strong() || password_error.is_some() {
            return Err(SignUpRejected::WeakPassword {
                criteria,
                field_errors,
            });
        }

        if !field_errors.is_empty() {
            return Err(SignUpRejected::InvalidFields { field_errors });
        }

        Ok(ValidatedSignUp {
            full_name: to_title_case(self.full_name.trim()),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            mobile_number: self.mobile_number.trim().to_string(),
            role: self.role,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error("Please enter both email and password.")]
    MissingCredentials,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInCredentials, SignInError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(SignInError::MissingCredentials);
        }

        Ok(SignInCredentials {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        })
    }
}
