//! User ID packets (tag 13, RFC 4880 §5.11): a single UTF-8 string,
//! conventionally `Name (Comment) <email>`, with no further structure.

use crate::{Error, Result};

/// Decodes a User ID packet body as UTF-8.
pub fn decode(body: &[u8]) -> Result<String> {
    std::str::from_utf8(body)
        .map(|s| s.to_string())
        .map_err(|e| Error::BadUserId(e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_plain_user_id() {
        let uid = decode(b"Test Signer <test@example.com>").unwrap();
        assert_eq!(uid, "Test Signer <test@example.com>");
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(decode(&[0xFF, 0xFE]).is_err());
    }
}
