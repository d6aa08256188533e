//! Validated text types shared across the DCR submission crates.
//!
//! Submission metadata travels as plain strings (step ids, section names,
//! qualified field identifiers, filenames). These wrappers push the
//! validation to construction time so downstream code can rely on the
//! invariant instead of re-checking strings at every use site.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// A metadata field identifier lacked a namespace qualifier
    #[error("Metadata field identifier must be namespace-qualified (like `dc.title`)")]
    UnqualifiedField,
    /// A metadata field identifier contained characters outside its charset
    #[error("Metadata field identifier contains invalid characters: {0}")]
    InvalidFieldCharacters(String),
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. Input is trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A namespace-qualified metadata field identifier.
///
/// Field identifiers follow the `schema.element[.qualifier]` shape used by
/// submission input forms, for example `dc.title` or
/// `dc.description.abstract`:
///
/// - at least two segments, joined by `.`
/// - each segment is non-empty, lowercase ASCII: `a-z`, `0-9`, `-`
///
/// Construction rejects anything else, so input-form configuration with a
/// malformed field list fails at load time rather than silently never
/// matching a patch path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MetadataFieldId(String);

impl MetadataFieldId {
    /// Creates a new `MetadataFieldId` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input,
    /// `TextError::UnqualifiedField` if the identifier has fewer than two
    /// segments, and `TextError::InvalidFieldCharacters` if any segment is
    /// empty or contains characters outside `a-z`, `0-9`, `-`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        let segments: Vec<&str> = trimmed.split('.').collect();
        if segments.len() < 2 {
            return Err(TextError::UnqualifiedField);
        }

        let segment_ok = |s: &str| {
            !s.is_empty()
                && s.bytes()
                    .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-'))
        };
        if !segments.iter().all(|s| segment_ok(s)) {
            return Err(TextError::InvalidFieldCharacters(trimmed.to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the namespace segment (everything before the first `.`).
    pub fn namespace(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MetadataFieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MetadataFieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for MetadataFieldId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for MetadataFieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MetadataFieldId::new(&s).map_err(serde::de::Error::custom)
    }
}
