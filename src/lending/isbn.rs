//! Digit analysis of material identifiers.
//!
//! Identifiers are free-form strings (`978-2-16-148410-0`, `ISSN 0317-8471`, ...).
//! Only their ASCII decimal digits take part in lending rules; everything else
//! is skipped.

/// Iterate over the decimal digits of an identifier, in order
fn digits(isbn: &str) -> impl DoubleEndedIterator<Item = u8> + '_ {
    isbn.bytes().filter(u8::is_ascii_digit)
}

/// Whether the digit projection of `isbn` reads the same both ways.
///
/// An identifier without digits, or whose digits are all zero, is never a
/// palindrome.
pub fn is_palindrome(isbn: &str) -> bool {
    if digits(isbn).all(|d| d == b'0') {
        return false;
    }
    digits(isbn).eq(digits(isbn).rev())
}

/// Sum of the decimal digits of `isbn`
pub fn digit_sum(isbn: &str) -> u32 {
    digits(isbn).map(|d| u32::from(d - b'0')).sum()
}
