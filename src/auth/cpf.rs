//! CPF (Brazilian taxpayer id) cleaning and checksum validation.

const CPF_LEN: usize = 11;

/// Strip every character that is not an ASCII digit.
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check length, the repeated-digit guard and both check digits.
///
/// Total over any input: malformed strings are simply invalid.
#[must_use]
pub fn is_valid(cpf: &str) -> bool {
    let digits: Vec<u32> = clean(cpf).chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LEN {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weighted mod-11 check digit; weights run from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = u32::try_from(digits.len()).unwrap_or(u32::MAX).saturating_add(1);
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}
