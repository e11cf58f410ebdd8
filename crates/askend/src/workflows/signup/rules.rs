use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const PROFANITY_BLACKLIST: [&str; 9] = [
    "badword1",
    "swearword2",
    "idiot",
    "stupid",
    "admin",
    "password",
    "123456789",
    "qwerty",
    "111111111",
];

const DISPOSABLE_DOMAINS: [&str; 4] = [
    "mailinator.com",
    "tempmail.com",
    "trash-mail.com",
    "guerrillamail.com",
];

const RESERVED_LOCAL_PARTS: [&str; 5] = ["admin", "support", "abuse", "webmaster", "security"];

pub const FULL_NAME_MIN_LENGTH: usize = 3;
pub const FULL_NAME_MAX_LENGTH: usize = 50;
pub const EMAIL_MIN_LENGTH: usize = 6;
pub const EMAIL_MAX_LENGTH: usize = 100;
pub const PASSWORD_MAX_LENGTH: usize = 128;
pub const PASSWORD_MIN_STRONG_LENGTH: usize = 13;
const PASSWORD_SYMBOLS: &str = "!@#$%^&*.";

static NAME_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s'\-]+$").expect("name pattern compiles"));
static REPEATED_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern compiles"));
static EMAIL_SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern compiles")
});
static MOBILE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^03[0-46]\d{8}$").expect("mobile pattern compiles"));
static TITLE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("title pattern compiles"));

/// Field-level validation failures, worded for display next to the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Full Name is required.")]
    FullNameRequired,
    #[error("Name must be at least {0} characters long.")]
    FullNameTooShort(usize),
    #[error("Name cannot exceed {0} characters.")]
    FullNameTooLong(usize),
    #[error("Only letters, spaces, hyphens, or apostrophes are allowed.")]
    FullNameCharacters,
    #[error("Please use only single spaces between words.")]
    FullNameSpacing,
    #[error("Please enter your full name (First and Last Name).")]
    FullNameIncomplete,
    #[error("This name contains inappropriate content.")]
    FullNameInappropriate,
    #[error("Email address is required.")]
    EmailRequired,
    #[error("Email must be between {min} and {max} characters.")]
    EmailLength { min: usize, max: usize },
    #[error("Please enter a valid email address format (e.g., example@domain.com).")]
    EmailFormat,
    #[error("This is a reserved email address (e.g., admin).")]
    EmailReserved,
    #[error("Disposable email domains are not allowed.")]
    EmailDisposable,
    #[error("Password is required.")]
    PasswordRequired,
    #[error("Password cannot exceed {0} characters.")]
    PasswordTooLong(usize),
    #[error("Avoid very common or weak passwords.")]
    PasswordCommon,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Must be 11 digits (e.g., 03XXXXXXXXX) and start with 030, 031, 032, 033, 034, or 036.")]
    MobileNumberFormat,
}

fn contains_blacklisted(value: &str) -> bool {
    let lowered = value.to_lowercase();
    PROFANITY_BLACKLIST
        .iter()
        .any(|word| lowered.contains(word))
}

pub fn validate_full_name(name: &str) -> Result<(), FieldError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FieldError::FullNameRequired);
    }

    let length = trimmed.chars().count();
    if length < FULL_NAME_MIN_LENGTH {
        return Err(FieldError::FullNameTooShort(FULL_NAME_MIN_LENGTH));
    }
    if length > FULL_NAME_MAX_LENGTH {
        return Err(FieldError::FullNameTooLong(FULL_NAME_MAX_LENGTH));
    }
    if !NAME_CHARACTERS.is_match(trimmed) {
        return Err(FieldError::FullNameCharacters);
    }
    if REPEATED_WHITESPACE.is_match(trimmed) {
        return Err(FieldError::FullNameSpacing);
    }
    if !trimmed.contains(' ') {
        return Err(FieldError::FullNameIncomplete);
    }
    if contains_blacklisted(trimmed) {
        return Err(FieldError::FullNameInappropriate);
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(FieldError::EmailRequired);
    }

    let length = trimmed.chars().count();
    if !(EMAIL_MIN_LENGTH..=EMAIL_MAX_LENGTH).contains(&length) {
        return Err(FieldError::EmailLength {
            min: EMAIL_MIN_LENGTH,
            max: EMAIL_MAX_LENGTH,
        });
    }
    if !EMAIL_SYNTAX.is_match(&trimmed.to_lowercase()) {
        return Err(FieldError::EmailFormat);
    }

    let mut parts = trimmed.split('@');
    let local = parts.next().unwrap_or_default().to_lowercase();
    let domain = parts.next().unwrap_or_default().to_lowercase();

    if RESERVED_LOCAL_PARTS.contains(&local.as_str()) {
        return Err(FieldError::EmailReserved);
    }
    if DISPOSABLE_DOMAINS
        .iter()
        .any(|disposable| domain.contains(disposable))
    {
        return Err(FieldError::EmailDisposable);
    }

    Ok(())
}

/// Baseline password rules; strength is reported separately by [`PasswordCriteria`].
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    let trimmed = password.trim();
    if trimmed.is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    if trimmed.chars().count() > PASSWORD_MAX_LENGTH {
        return Err(FieldError::PasswordTooLong(PASSWORD_MAX_LENGTH));
    }
    if contains_blacklisted(trimmed) {
        return Err(FieldError::PasswordCommon);
    }

    Ok(())
}

/// Strength checklist shown beneath the password field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCriteria {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub symbol: bool,
}

impl PasswordCriteria {
    pub fn assess(password: &str) -> Self {
        Self {
            length: password.chars().count() >= PASSWORD_MIN_STRONG_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }

    pub fn is_strong(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.number && self.symbol
    }
}

/// Blank confirmations are not reported; the user has not typed one yet.
pub fn check_password_match(password: &str, confirmation: &str) -> Result<(), FieldError> {
    if !password.is_empty() && !confirmation.is_empty() && password != confirmation {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

/// Mobile numbers are optional; when given they must be a Pakistani `03XXXXXXXXX` number.
pub fn validate_mobile_number(number: &str) -> Result<(), FieldError> {
    let trimmed = number.trim();
    if trimmed.is_empty() || MOBILE_NUMBER.is_match(trimmed) {
        Ok(())
    } else {
        Err(FieldError::MobileNumberFormat)
    }
}

pub fn sanitize_mobile_input(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn to_title_case(text: &str) -> String {
    TITLE_WORD
        .replace_all(text, |captures: &regex::Captures<'_>| {
            let word = &captures[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_rules_apply_in_order() {
        assert_eq!(validate_full_name("   "), Err(FieldError::FullNameRequired));
        assert_eq!(validate_full_name("Al"), Err(FieldError::FullNameTooShort(3)));
        assert_eq!(
            validate_full_name(&"a".repeat(51)),
            Err(FieldError::FullNameTooLong(50))
        );
        assert_eq!(
            validate_full_name("Ayesha Kh4n"),
            Err(FieldError::FullNameCharacters)
        );
        assert_eq!(
            validate_full_name("Ayesha  Khan"),
            Err(FieldError::FullNameSpacing)
        );
        assert_eq!(
            validate_full_name("Ayesha"),
            Err(FieldError::FullNameIncomplete)
        );
        assert_eq!(
            validate_full_name("Stupid Name"),
            Err(FieldError::FullNameInappropriate)
        );
        assert_eq!(validate_full_name("  Ayesha O'Neil-Khan "), Ok(()));
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate_email(""), Err(FieldError::EmailRequired));
        assert_eq!(
            validate_email("a@b.c"),
            Err(FieldError::EmailLength { min: 6, max: 100 })
        );
        assert_eq!(validate_email("ayesha.example.com"), Err(FieldError::EmailFormat));
        assert_eq!(validate_email("ayesha@example"), Err(FieldError::EmailFormat));
        assert_eq!(validate_email("Admin@example.com"), Err(FieldError::EmailReserved));
        assert_eq!(
            validate_email("ayesha@mailinator.com"),
            Err(FieldError::EmailDisposable)
        );
        assert_eq!(validate_email(" Ayesha.Khan@Example.pk "), Ok(()));
        assert_eq!(validate_email("ayesha@[192.168.0.1]"), Ok(()));
    }

    #[test]
    fn password_rules() {
        assert_eq!(validate_password("  "), Err(FieldError::PasswordRequired));
        assert_eq!(
            validate_password(&"x".repeat(129)),
            Err(FieldError::PasswordTooLong(128))
        );
        assert_eq!(
            validate_password("MyPassword!2024"),
            Err(FieldError::PasswordCommon)
        );
        assert_eq!(validate_password("Sunny.Lahore42"), Ok(()));
    }

    #[test]
    fn password_criteria_track_each_requirement() {
        let weak = PasswordCriteria::assess("short");
        assert!(!weak.is_strong());
        assert!(weak.lowercase);
        assert!(!weak.uppercase && !weak.number && !weak.symbol && !weak.length);

        assert!(PasswordCriteria::assess("Sunny.Lahore42").is_strong());
    }

    #[test]
    fn password_match_waits_for_confirmation() {
        assert_eq!(check_password_match("abc", ""), Ok(()));
        assert_eq!(check_password_match("abc", "abc"), Ok(()));
        assert_eq!(
            check_password_match("abc", "abd"),
            Err(FieldError::PasswordMismatch)
        );
    }

    #[test]
    fn mobile_numbers() {
        assert_eq!(validate_mobile_number(""), Ok(()));
        assert_eq!(validate_mobile_number("03001234567"), Ok(()));
        assert_eq!(validate_mobile_number("03612345678"), Ok(()));
        assert_eq!(
            validate_mobile_number("03512345678"),
            Err(FieldError::MobileNumberFormat)
        );
        assert_eq!(
            validate_mobile_number("0300123456"),
            Err(FieldError::MobileNumberFormat)
        );
        assert_eq!(sanitize_mobile_input("0300-123 4567"), "03001234567");
    }

    #[test]
    fn title_case_capitalises_each_word() {
        assert_eq!(to_title_case("ayesha o'neil-KHAN"), "Ayesha O'neil-khan");
        assert_eq!(to_title_case("muhammad  ali"), "Muhammad  Ali");
    }
}
