/// Checks that a PIN candidate is exactly four ASCII digits.
///
/// No coercion: whitespace, signs, and non-ASCII digits are all rejected.
pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == 4 && candidate.bytes().all(|b| b.is_ascii_digit())
}
