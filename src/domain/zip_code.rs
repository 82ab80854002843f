/// A five digit postal code in [10000, 99999].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipCode(i32);

impl ZipCode {
    pub const MIN: i32 = 10000;
    pub const MAX: i32 = 99999;

    pub fn new(value: i32) -> Result<ZipCode, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Self::out_of_range())
        }
    }

    /// Parses the raw form value. A missing or blank value is not an error:
    /// the zip code is optional.
    pub fn parse_optional(
        s: Option<String>,
    ) -> Result<Option<ZipCode>, String> {
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| Self::out_of_range())
                .and_then(Self::new)
                .map(Some),
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    fn out_of_range() -> String {
        format!(
            "Zip code must be a number between {} and {}",
            Self::MIN,
            Self::MAX
        )
    }
}
