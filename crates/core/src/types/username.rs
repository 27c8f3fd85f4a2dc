//! User name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserName`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UserNameError {
    /// The input string is empty (or whitespace only).
    #[error("user name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("user name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A user name.
///
/// User names identify accounts and must be unique across the shop. The
/// database column is `VARCHAR(20)`, so the same limit is enforced here.
///
/// ## Constraints
///
/// - Not empty after trimming surrounding whitespace
/// - Length: 1-20 characters
///
/// ## Examples
///
/// ```
/// use sundry_core::UserName;
///
/// assert!(UserName::parse("dino").is_ok());
/// assert!(UserName::parse("  spaced  ").is_ok()); // trimmed to "spaced"
///
/// assert!(UserName::parse("").is_err());
/// assert!(UserName::parse("   ").is_err());
/// assert!(UserName::parse("a-name-well-over-twenty-characters").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Maximum length of a user name (database column limit).
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `UserName` from a string.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or whitespace only
    /// - Is longer than 20 characters after trimming
    pub fn parse(s: &str) -> Result<Self, UserNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the user name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UserName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserName {
    type Err = UserNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UserName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for UserName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UserName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert!(UserName::parse("dino").is_ok());
        assert!(UserName::parse("name-test").is_ok());
        assert!(UserName::parse("a").is_ok());
        assert!(UserName::parse("exactly-twenty-chars").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(UserName::parse(""), Err(UserNameError::Empty)));
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert!(matches!(UserName::parse("   "), Err(UserNameError::Empty)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let name = UserName::parse("  dino  ").unwrap();
        assert_eq!(name.as_str(), "dino");
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(21);
        assert!(matches!(
            UserName::parse(&long),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display() {
        let name = UserName::parse("dino").unwrap();
        assert_eq!(format!("{name}"), "dino");
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = UserName::parse("dino").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"dino\"");

        let parsed: UserName = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, name);
    }

    #[test]
    fn test_from_str() {
        let name: UserName = "dino".parse().unwrap();
        assert_eq!(name.as_str(), "dino");
    }
}
