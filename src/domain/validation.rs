use std::fmt;

/// Field-level validation failures collected from a submitted form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Option<String>> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = Option<String>>>(iter: I) -> Self {
        Self(iter.into_iter().flatten().collect())
    }
}

impl From<String> for ValidationErrors {
    fn from(message: String) -> Self {
        Self(vec![message])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" and "))
    }
}

impl std::error::Error for ValidationErrors {}
