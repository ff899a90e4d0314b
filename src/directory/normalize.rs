//! Name normalization shared by the stores and the engine

/// Rewrite a display or reference name into node-key form
///
/// `"Bob Jones"`, `"Bob_Jones"` and `"E100_Bob_Jones"` all become
/// `"Bob_Jones"`. Only the first two name tokens are kept; a leading token
/// containing a digit is an id prefix and is dropped when a full name follows.
pub fn normalize_person_name(raw: &str) -> String {
    let tokens: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|t| !t.is_empty())
        .collect();

    let tokens = match tokens.as_slice() {
        [first, rest @ ..] if rest.len() >= 2 && first.chars().any(|c| c.is_ascii_digit()) => rest,
        all => all,
    };

    match tokens {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, last, ..] => format!("{}_{}", first, last),
    }
}

/// Normalize a free-text name query
///
/// Two or more words become `First_Last`; a single word is used verbatim.
/// Returns `None` for a blank query.
pub fn normalize_query(term: &str) -> Option<String> {
    let words: Vec<&str> = term.split_whitespace().collect();
    match words.as_slice() {
        [] => None,
        [_] => Some(term.trim().to_string()),
        [first, last, ..] => Some(format!("{}_{}", first, last)),
    }
}

/// A manager reference is usable if it carries at least one letter
pub fn is_valid_manager_reference(raw: &str) -> bool {
    raw.trim().chars().any(char::is_alphabetic)
}

/// Stored names with spaces replaced, the form name and manager lookups match against
pub fn underscore_form(value: &str) -> String {
    value.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_person_name() {
        assert_eq!(normalize_person_name("Bob Jones"), "Bob_Jones");
        assert_eq!(normalize_person_name("Bob_Jones"), "Bob_Jones");
        assert_eq!(normalize_person_name("E100_Bob_Jones"), "Bob_Jones");
        assert_eq!(normalize_person_name("  Mary Ann  Lee "), "Mary_Ann");
        assert_eq!(normalize_person_name("Cher"), "Cher");
        assert_eq!(normalize_person_name("   "), "");
    }

    #[test]
    fn test_id_prefix_needs_a_full_name() {
        // "R2 D2" has no room for a prefix, so both tokens are the name
        assert_eq!(normalize_person_name("R2 D2"), "R2_D2");
    }

    #[test]
    fn test_apostrophes_survive() {
        assert_eq!(normalize_person_name("Sean O'Neil"), "Sean_O'Neil");
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("Alice Smith").as_deref(), Some("Alice_Smith"));
        assert_eq!(normalize_query(" Alice ").as_deref(), Some("Alice"));
        assert_eq!(normalize_query("Alice_Smith").as_deref(), Some("Alice_Smith"));
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("  \t"), None);
    }

    #[test]
    fn test_manager_reference_validity() {
        assert!(is_valid_manager_reference("Bob Jones"));
        assert!(is_valid_manager_reference("No_Boss_Found"));
        assert!(!is_valid_manager_reference(""));
        assert!(!is_valid_manager_reference("1234"));
        assert!(!is_valid_manager_reference(" - "));
    }
}
