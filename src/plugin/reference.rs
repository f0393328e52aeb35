//! Plugin reference strings.
//!
//! Two addressing schemes are supported, told apart by syntax:
//! - `package#entry` addresses an entry point a package registered in the
//!   shared namespace
//! - `package.module.function` addresses a function by dotted path: all but
//!   the last segment name the module, the last names the function

use std::fmt;

/// A parsed plugin reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// `package#entry`
    EntryPoint { package: String, entry: String },
    /// `module.path.attribute`
    Path { module: String, attribute: String },
}

impl Reference {
    /// Parse a reference string.
    ///
    /// Returns a human-readable message when the string fits neither scheme.
    pub fn parse(reference: &str) -> Result<Self, String> {
        let reference = reference.trim();

        if let Some((package, entry)) = reference.split_once('#') {
            if package.is_empty() || entry.is_empty() || entry.contains('#') {
                return Err(format!(
                    "`{}` is not a valid entry point reference (expected `package#entry`)",
                    reference
                ));
            }
            return Ok(Reference::EntryPoint {
                package: package.to_string(),
                entry: entry.to_string(),
            });
        }

        match reference.rsplit_once('.') {
            Some((module, attribute))
                if !module.is_empty()
                    && !attribute.is_empty()
                    && module.split('.').all(|segment| !segment.is_empty()) =>
            {
                Ok(Reference::Path {
                    module: module.to_string(),
                    attribute: attribute.to_string(),
                })
            }
            _ => Err(format!("`{}` doesn't look like a module path", reference)),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::EntryPoint { package, entry } => write!(f, "{}#{}", package, entry),
            Reference::Path { module, attribute } => write!(f, "{}.{}", module, attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entry_point() {
        assert_eq!(
            Reference::parse("acme#deploy"),
            Ok(Reference::EntryPoint {
                package: "acme".into(),
                entry: "deploy".into()
            })
        );
    }

    #[test]
    fn parses_dotted_path_on_last_dot() {
        assert_eq!(
            Reference::parse("tools.git.status"),
            Ok(Reference::Path {
                module: "tools.git".into(),
                attribute: "status".into()
            })
        );
    }

    #[test]
    fn hash_wins_over_dots() {
        let reference = Reference::parse("acme.tools#deploy").unwrap();
        assert!(matches!(reference, Reference::EntryPoint { package, .. } if package == "acme.tools"));
    }

    #[test]
    fn rejects_single_segment_path() {
        let err = Reference::parse("status").unwrap_err();
        assert!(err.contains("doesn't look like a module path"));
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(Reference::parse(".status").is_err());
        assert!(Reference::parse("tools.").is_err());
        assert!(Reference::parse("tools..status").is_err());
    }

    #[test]
    fn rejects_malformed_entry_points() {
        assert!(Reference::parse("#deploy").is_err());
        assert!(Reference::parse("acme#").is_err());
        assert!(Reference::parse("a#b#c").is_err());
    }

    #[test]
    fn display_round_trips_text() {
        for text in ["acme#deploy", "tools.git.status"] {
            assert_eq!(Reference::parse(text).unwrap().to_string(), text);
        }
    }
}
