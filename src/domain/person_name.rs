use unicode_segmentation::UnicodeSegmentation;

/// A human name (subscriber name, user first or last name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// `field` is used to build a readable error message, e.g. "First name".
    pub fn parse(s: String, field: &str) -> Result<PersonName, String> {
        let s = s.trim().to_string();
        let is_empty_or_whitespace = s.is_empty();
        let is_too_long = s.graphemes(true).count() > 256;
        let forbidden_chars = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_chars =
            s.chars().any(|g| forbidden_chars.contains(&g));

        if is_empty_or_whitespace {
            Err(format!("{} cannot be empty", field))
        } else if is_too_long || contains_forbidden_chars {
            Err(format!("{} is not a valid name", field))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}
