//! UTF-8 utilities for stream chunking.
//!
//! The chunked relay reads arbitrary byte windows from the input
//! stream, which may cut a multi-byte character in half. These helpers
//! split a byte buffer into its longest complete UTF-8 prefix plus the
//! incomplete tail to carry into the next read.

/// Splits a byte slice into its longest valid UTF-8 prefix and the
/// incomplete trailing bytes.
///
/// The tail is non-empty only when the buffer ends mid-way through a
/// multi-byte sequence; it must be prepended to the next read.
///
/// # Errors
///
/// Returns the byte offset of the first invalid (not merely incomplete)
/// UTF-8 sequence.
///
/// # Examples
///
/// ```
/// use css_relay::io::split_complete_utf8;
///
/// let bytes = "a{c:世".as_bytes();
/// let (prefix, tail) = split_complete_utf8(&bytes[..5]).unwrap();
/// assert_eq!(prefix, "a{c:");
/// assert_eq!(tail, &bytes[4..5]);
/// ```
pub fn split_complete_utf8(bytes: &[u8]) -> std::result::Result<(&str, &[u8]), usize> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok((s, &bytes[bytes.len()..])),
        Err(e) => match e.error_len() {
            // None means the trailing sequence is incomplete, not invalid
            None => {
                let valid = e.valid_up_to();
                match std::str::from_utf8(&bytes[..valid]) {
                    Ok(s) => Ok((s, &bytes[valid..])),
                    Err(inner) => Err(inner.valid_up_to()),
                }
            }
            Some(_) => Err(e.valid_up_to()),
        },
    }
}

/// Validates that a byte slice is valid UTF-8.
///
/// # Errors
///
/// Returns the byte offset of the first invalid UTF-8 sequence.
pub fn validate_utf8(bytes: &[u8]) -> std::result::Result<&str, usize> {
    std::str::from_utf8(bytes).map_err(|e| e.valid_up_to())
}
