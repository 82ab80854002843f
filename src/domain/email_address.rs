use validator::validate_email;

/// A syntactically valid email address, trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, String> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err("Email cannot be empty".to_string());
        }
        if validate_email(normalized.as_str()) {
            Ok(Self(normalized))
        } else {
            Err(format!("{} is not a valid email", s.trim()))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}
