//! The tri-state visibility flag stored on tables.

use std::fmt;

/// Whether a table shows its optional columns.
///
/// Tables encode this as an attribute: `"1"`, `"0"`, or absent. `Unset` means
/// no explicit preference has been recorded yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShowOptional {
    /// No explicit preference.
    #[default]
    Unset,
    /// Optional columns hidden (`"0"`).
    Hidden,
    /// Optional columns shown (`"1"`).
    Shown,
}

impl ShowOptional {
    /// Decode an attribute value. Anything other than `"0"` or `"1"` is `Unset`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("1") => Self::Shown,
            Some("0") => Self::Hidden,
            _ => Self::Unset,
        }
    }

    /// Encode as an attribute value; `Unset` has none.
    pub const fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Shown => Some("1"),
            Self::Hidden => Some("0"),
            Self::Unset => None,
        }
    }

    /// The explicit flag matching a control's `selected` state.
    pub const fn from_selected(selected: bool) -> Self {
        if selected { Self::Shown } else { Self::Hidden }
    }

    /// `Some(shown)` for an explicit flag, `None` for `Unset`.
    pub const fn explicit(self) -> Option<bool> {
        match self {
            Self::Shown => Some(true),
            Self::Hidden => Some(false),
            Self::Unset => None,
        }
    }
}

impl fmt::Display for ShowOptional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr().unwrap_or("unset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_flags_are_explicit() {
        assert_eq!(ShowOptional::from_attr(Some("1")), ShowOptional::Shown);
        assert_eq!(ShowOptional::from_attr(Some("0")), ShowOptional::Hidden);
        for other in [None, Some(""), Some("true"), Some(" 1"), Some("01")] {
            assert_eq!(ShowOptional::from_attr(other), ShowOptional::Unset, "{other:?}");
        }
    }

    #[test]
    fn selected_maps_to_explicit_flag() {
        assert_eq!(ShowOptional::from_selected(true).as_attr(), Some("1"));
        assert_eq!(ShowOptional::from_selected(false).as_attr(), Some("0"));
        assert_eq!(ShowOptional::Unset.explicit(), None);
        assert_eq!(ShowOptional::Hidden.explicit(), Some(false));
    }
}
