//! Invoice number derivation from a fiscal access key.
//!
//! An NF-e access key is a fixed 44-digit identifier; digits 26..=34
//! (1-indexed) carry the invoice sequence number.

/// Resolve the invoice number embedded in a 44-digit access key.
///
/// Separators and any non-digit characters are ignored. Inputs whose digit
/// count differs from 44 are not access keys and yield `None`. Leading
/// zeros are stripped from the extracted slice.
///
/// # Examples
///
/// ```
/// use etiqueta::extractor::access_key::invoice_number;
///
/// let key = "35240512345678000195550010000012341000012349";
/// assert_eq!(invoice_number(key), Some("1234".to_string()));
/// assert_eq!(invoice_number("12345"), None);
/// ```
pub fn invoice_number(key: &str) -> Option<String> {
    let digits: String = key.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 44 {
        return None;
    }
    // 1-indexed positions 26..=34.
    let slice = &digits[25..34];
    slice.parse::<u64>().ok().map(|n| n.to_string())
}
