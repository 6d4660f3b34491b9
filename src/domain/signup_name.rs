#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupName(String);

impl SignupName {
    /// Trims the name; blank or missing names become `None`.
    pub fn parse(s: Option<String>) -> Option<Self> {
        s.map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Self)
    }
}

impl AsRef<str> for SignupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
