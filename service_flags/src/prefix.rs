//! Name prefixes that let one binary carry several copies of a flag group.

use std::fmt;

/// Prefix applied to flag and environment variable names.
///
/// Flag names get a lower-case, hyphenated prefix and environment variables
/// an upper-case, underscored one. Trailing separators on the raw prefix are
/// ignored.
///
/// # Examples
///
/// ```
/// use service_flags::Prefix;
///
/// let prefix = Prefix::new("PreFix");
/// assert_eq!(prefix.flag_name("db-host"), "prefix-db-host");
/// assert_eq!(prefix.env_name("DB_HOST"), "PREFIX_DB_HOST");
/// assert_eq!(Prefix::none().flag_name("db-host"), "db-host");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Prefix {
    raw: String,
}

impl Prefix {
    /// Wraps `raw` as a prefix.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw
            .as_ref()
            .trim()
            .trim_end_matches(|c: char| c == '-' || c == '_');
        Self {
            raw: trimmed.to_owned(),
        }
    }

    /// The empty prefix, which leaves names unchanged.
    #[must_use]
    pub const fn none() -> Self {
        Self { raw: String::new() }
    }

    /// Whether names pass through unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Prefixes a flag name.
    #[must_use]
    pub fn flag_name(&self, name: &str) -> String {
        if self.is_empty() {
            return name.to_owned();
        }
        let head = self.raw.to_lowercase().replace('_', "-");
        format!("{head}-{name}")
    }

    /// Prefixes an environment variable name.
    #[must_use]
    pub fn env_name(&self, name: &str) -> String {
        if self.is_empty() {
            return name.to_owned();
        }
        let head = self.raw.to_uppercase().replace('-', "_");
        format!("{head}_{name}")
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "db", "DB")]
    #[case("PreFix", "prefix-db", "PREFIX_DB")]
    #[case("replica_", "replica-db", "REPLICA_DB")]
    #[case("read-only", "read-only-db", "READ_ONLY_DB")]
    fn prefixes_names(#[case] raw: &str, #[case] flag: &str, #[case] env: &str) {
        let prefix = Prefix::new(raw);
        assert_eq!(prefix.flag_name("db"), flag);
        assert_eq!(prefix.env_name("DB"), env);
    }

    #[test]
    fn separators_alone_collapse_to_none() {
        assert_eq!(Prefix::new("--"), Prefix::none());
    }
}
