use anyhow::{Context, Result, anyhow};
use arrayvec::ArrayString;
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::Serialize;
use std::fmt;

use crate::common::{SHARE_CODE_BYTES, SHARE_CODE_LEN};

/// Short share code handed out after an upload: lowercase hex of [`SHARE_CODE_BYTES`]
/// bytes drawn from the operating system RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShareCode(ArrayString<SHARE_CODE_LEN>);

impl ShareCode {
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SHARE_CODE_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("Failed to read from the system random source")?;
        Self::from_bytes(bytes)
    }

    fn from_bytes(bytes: [u8; SHARE_CODE_BYTES]) -> Result<Self> {
        let encoded = hex::encode(bytes);
        let code = ArrayString::from(&encoded)
            .map_err(|_| anyhow!("Encoded share code does not fit: {}", encoded))?;
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_share_code(s: &str) -> bool {
        s.len() == SHARE_CODE_LEN
            && s.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn generated_code_is_six_lowercase_hex() {
        for _ in 0..64 {
            let code = ShareCode::generate().unwrap();
            assert!(is_share_code(code.as_str()), "bad code {code}");
        }
    }

    #[test]
    fn encodes_bytes_as_lowercase_hex() {
        let code = ShareCode::from_bytes([0xa1, 0xb2, 0xc3]).unwrap();
        assert_eq!(code.as_str(), "a1b2c3");
        assert_eq!(code.to_string(), "a1b2c3");
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = ShareCode::from_bytes([0x00, 0x0f, 0xff]).unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"000fff\"");
    }

    #[test]
    fn codes_differ_between_draws() {
        let a = ShareCode::generate().unwrap();
        let b = ShareCode::generate().unwrap();
        let c = ShareCode::generate().unwrap();
        // 1 in 16^12 chance of a false failure
        assert!(a != b || b != c);
    }
}
