//! Identifiers for the scalar types a flag destination can hold.

use std::fmt;

/// Stable key naming a destination's scalar type.
///
/// The type registry is keyed by `Kind`, and error messages use
/// [`Kind::as_str`] to name the offending type.
///
/// # Examples
///
/// ```
/// use flagbind::Kind;
///
/// assert_eq!(Kind::Duration.as_str(), "duration");
/// assert_eq!(Kind::Uint16.to_string(), "uint16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Kind {
    /// `bool`.
    Bool,
    /// `String`.
    String,
    /// `i8`.
    Int8,
    /// `i16`.
    Int16,
    /// `i32`.
    Int32,
    /// `i64`.
    Int64,
    /// `isize`, the platform's native signed integer.
    Int,
    /// `u8`.
    Uint8,
    /// `u16`.
    Uint16,
    /// `u32`.
    Uint32,
    /// `u64`.
    Uint64,
    /// `usize`, the platform's native unsigned integer.
    Uint,
    /// `f32`.
    Float32,
    /// `f64`.
    Float64,
    /// [`std::time::Duration`].
    Duration,
}

impl Kind {
    /// Every supported kind, in registration order.
    pub const ALL: [Self; 15] = [
        Self::Bool,
        Self::String,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Int,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Uint,
        Self::Float32,
        Self::Float64,
        Self::Duration,
    ];

    /// Returns the stable textual key for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Int => "int",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uint => "uint",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Kind;
    use std::collections::BTreeSet;

    #[test]
    fn keys_are_unique() {
        let keys: BTreeSet<_> = Kind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(keys.len(), Kind::ALL.len());
    }
}
