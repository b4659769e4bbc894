//! Phone display formatting
//!
//! Phones are stored in the display form the shop reads back to clients,
//! derived from whatever digits the client typed.

/// Keep only the ASCII digits of `input`.
#[must_use]
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone number for display.
///
/// - 11 digits (area code + mobile): `(DD) DDDDD-DDDD`
/// - 10 digits (area code + landline): `(DD) DDDD-DDDD`
/// - anything else: the bare digits, unformatted
///
/// # Examples
///
/// ```
/// use chairbook_domain::utils::phone::format_phone;
///
/// assert_eq!(format_phone("11999998888"), "(11) 99999-8888");
/// assert_eq!(format_phone("(11) 3333-4444"), "(11) 3333-4444");
/// assert_eq!(format_phone("+55 11 99999-8888"), "5511999998888");
/// ```
#[must_use]
pub fn format_phone(input: &str) -> String {
    let digits = phone_digits(input);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => digits,
    }
}
