//! Major-version extraction from npm version ranges
//!
//! Dependency declarations carry range strings like `^13.2.0` or `~9.0.1`.
//! The build strategy only depends on the major component, so parsing stays
//! deliberately loose: strip leading range operators, take the first numeric
//! component before a `.`, refuse anything that does not reduce to a
//! non-negative integer.

use crate::error::{Error, Result};

/// Extract the major version from an npm version range string.
///
/// ```
/// use nexpack_core::major_version;
///
/// assert_eq!(major_version("^13.2.0").unwrap(), 13);
/// assert_eq!(major_version("~9.0.1").unwrap(), 9);
/// assert_eq!(major_version("14").unwrap(), 14);
/// ```
pub fn major_version(range: &str) -> Result<u64> {
    let stripped = range.trim().trim_start_matches(['^', '~']);

    let leading = stripped
        .split('.')
        .map(str::trim)
        .find(|part| !part.is_empty())
        .ok_or_else(|| Error::VersionParse {
            range: range.to_string(),
        })?;

    leading.parse().map_err(|_| Error::VersionParse {
        range: range.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_range() {
        assert_eq!(major_version("^13.2.0").unwrap(), 13);
    }

    #[test]
    fn test_tilde_range() {
        assert_eq!(major_version("~9.0.1").unwrap(), 9);
    }

    #[test]
    fn test_bare_major() {
        assert_eq!(major_version("13").unwrap(), 13);
        assert_eq!(major_version("14.1.4").unwrap(), 14);
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(major_version(" ^12.3.4 ").unwrap(), 12);
    }

    #[test]
    fn test_unparseable_ranges() {
        assert!(matches!(
            major_version("latest"),
            Err(Error::VersionParse { .. })
        ));
        assert!(matches!(major_version(""), Err(Error::VersionParse { .. })));
        assert!(matches!(
            major_version("-1.0.0"),
            Err(Error::VersionParse { .. })
        ));
    }
}
