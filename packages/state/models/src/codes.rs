//! US state postal code utilities.
//!
//! Provides the two-letter postal codes for the 50 US states + DC along
//! with their full names, and normalization for the loosely formatted
//! state identifiers that upstream data sources tend to emit.

/// Postal codes and full names for the 50 US states + DC, sorted by code.
pub const STATES: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// Maps a two-letter postal code to the full state name.
///
/// Returns `"Unknown"` for unrecognized codes.
#[must_use]
pub fn state_name(code: &str) -> &'static str {
    lookup_code(code).map_or("Unknown", |(_, name)| name)
}

/// Normalizes a loosely formatted state identifier to its canonical
/// two-letter postal code.
///
/// Accepts postal codes in any case and full state names (e.g. `"tx"`,
/// `" Texas "`, `"district of columbia"`). Returns `None` for anything
/// that does not identify one of the 50 states + DC.
#[must_use]
pub fn normalize_state_code(input: &str) -> Option<&'static str> {
    let trimmed = input.trim();
    if let Some((code, _)) = lookup_code(trimmed) {
        return Some(code);
    }
    STATES
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
        .map(|(code, _)| *code)
}

fn lookup_code(code: &str) -> Option<(&'static str, &'static str)> {
    let upper = code.to_ascii_uppercase();
    STATES
        .binary_search_by(|(c, _)| (*c).cmp(upper.as_str()))
        .ok()
        .map(|idx| STATES[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_count() {
        assert_eq!(STATES.len(), 51);
    }

    #[test]
    fn codes_are_sorted_and_unique() {
        for pair in STATES.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "{} must sort before {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn name_coverage() {
        for (code, _) in STATES {
            assert_ne!(state_name(code), "Unknown", "no name for code: {code}");
        }
    }

    #[test]
    fn unknown_code() {
        assert_eq!(state_name("XX"), "Unknown");
        assert_eq!(normalize_state_code("PR"), None);
        assert_eq!(normalize_state_code("Atlantis"), None);
    }

    #[test]
    fn normalizes_case_whitespace_and_names() {
        assert_eq!(normalize_state_code("tx"), Some("TX"));
        assert_eq!(normalize_state_code(" Ca "), Some("CA"));
        assert_eq!(normalize_state_code("New York"), Some("NY"));
        assert_eq!(normalize_state_code("district of columbia"), Some("DC"));
    }
}
