//! Input checks shared by signup and the onboarding forms

/// Blank required fields collected while checking one request
#[derive(Debug, Default)]
pub struct ValidationErrors {
    missing: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` as missing when the value is blank
    pub fn require(&mut self, field: &str, value: &str) {
        if !validators::not_empty(value) {
            self.missing.push(field.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// Names of the offending fields, in the order they were checked
    pub fn fields(&self) -> Vec<String> {
        self.missing.clone()
    }
}

pub mod validators {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });

    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Shape check only; deliverability is the mail provider's problem
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email.trim())
    }

    /// Company websites must be absolute http(s) URLs
    pub fn is_valid_url(url: &str) -> bool {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
    }
}
