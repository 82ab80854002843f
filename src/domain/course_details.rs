use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTitle(String);

impl CourseTitle {
    pub fn parse(s: String) -> Result<CourseTitle, String> {
        let s = s.trim().to_string();
        if s.is_empty() {
            Err("Title cannot be empty".to_string())
        } else if s.graphemes(true).count() > 256 {
            Err("Title is too long".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for CourseTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDescription(String);

impl CourseDescription {
    pub fn parse(s: String) -> Result<CourseDescription, String> {
        let s = s.trim().to_string();
        if s.is_empty() {
            Err("Description cannot be empty".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for CourseDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Integer course attribute (seats, cost) that defaults to 0 and may not be
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative(i32);

impl NonNegative {
    pub fn parse_or_zero(
        s: Option<String>,
        field: &str,
    ) -> Result<NonNegative, String> {
        let raw = match s.as_deref().map(str::trim) {
            None | Some("") => return Ok(Self(0)),
            Some(raw) => raw,
        };
        match raw.parse::<i32>() {
            Ok(value) if value >= 0 => Ok(Self(value)),
            _ => Err(format!("{} must be a whole number of at least 0", field)),
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
