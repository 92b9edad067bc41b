// Input validation for airport codes and search terms

/// Returns true if `code` is a syntactically valid IATA airport code: exactly
/// three uppercase Latin letters. Callers uppercase the input first.
pub fn is_airport_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Returns true if every character of `term` is a Latin-1 letter, a digit,
/// a dash or a space. Empty terms are rejected.
///
/// The airport data only uses the Latin-1 character set, so anything above
/// U+00FF can never match.
pub fn is_valid_search_term(term: &str) -> bool {
    !term.is_empty() && term.chars().all(is_search_char)
}

fn is_search_char(c: char) -> bool {
    if u32::from(c) > 0xFF {
        return false;
    }

    c.is_alphabetic() || c.is_ascii_digit() || c == '-' || c == ' '
}
