//! Mint Validator
//!
//! Decides whether a candidate string is a plausible Solana mint address.
//! With the `base58-decode` feature (default) the candidate must decode to
//! exactly 32 bytes; without it a charset/length heuristic is used.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Decoded length of a Solana public key
pub const MINT_BYTES: usize = 32;

/// Shortest base58 rendering of a 32-byte key
pub const MIN_MINT_LEN: usize = 32;

/// Longest base58 rendering of a 32-byte key
pub const MAX_MINT_LEN: usize = 44;

/// Note attached to responses when a mint is rejected
pub const INVALID_MINT_NOTE: &str = "Invalid mint: not base58/32 bytes";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("mint is empty")]
    Empty,

    #[error("{INVALID_MINT_NOTE}: {0}")]
    Invalid(String),
}

/// A validated, whitespace-trimmed mint address.
///
/// Opaque once constructed: nothing downstream parses it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Mint(String);

impl Mint {
    pub fn parse(candidate: &str) -> Result<Self, MintError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(MintError::Empty);
        }
        if !validate(trimmed) {
            return Err(MintError::Invalid(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Mint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a candidate mint string.
pub fn validate(candidate: &str) -> bool {
    let m = candidate.trim();
    if m.is_empty() {
        return false;
    }

    check_key(m)
}

#[cfg(feature = "base58-decode")]
fn check_key(m: &str) -> bool {
    decodes_to_key(m)
}

#[cfg(not(feature = "base58-decode"))]
fn check_key(m: &str) -> bool {
    looks_like_base58_key(m)
}

/// Exact check: base58-decodes to a 32-byte key.
#[cfg(feature = "base58-decode")]
pub fn decodes_to_key(candidate: &str) -> bool {
    bs58::decode(candidate)
        .into_vec()
        .map(|raw| raw.len() == MINT_BYTES)
        .unwrap_or(false)
}

/// Heuristic check: base58 alphabet only, 32..=44 characters.
pub fn looks_like_base58_key(candidate: &str) -> bool {
    let len = candidate.chars().count();
    (MIN_MINT_LEN..=MAX_MINT_LEN).contains(&len) && candidate.chars().all(is_base58_char)
}

/// Bitcoin base58 alphabet: no `0`, `O`, `I` or `l`.
fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";
    const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    #[test]
    fn test_known_mints_are_valid() {
        assert!(validate(WSOL));
        assert!(validate(USDC));
    }

    #[test]
    fn test_all_zero_key_is_valid() {
        // 32 leading '1's decode to 32 zero bytes
        let zero = "1".repeat(32);
        assert!(validate(&zero));
    }

    #[test]
    fn test_empty_and_whitespace_invalid() {
        assert!(!validate(""));
        assert!(!validate("   "));
        assert!(!validate("\t\n"));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert!(validate(&format!("  {}\n", USDC)));
    }

    #[test]
    fn test_length_bounds() {
        for len in [1, 10, 31] {
            assert!(!validate(&"2".repeat(len)), "len {} should be invalid", len);
        }
        for len in [45, 50, 88] {
            assert!(!validate(&"2".repeat(len)), "len {} should be invalid", len);
        }
    }

    #[test]
    fn test_excluded_characters_rejected() {
        for bad in ['0', 'O', 'I', 'l'] {
            let candidate = format!("{}{}", &USDC[..USDC.len() - 1], bad);
            assert!(!validate(&candidate), "{} should be rejected", candidate);
            assert!(!looks_like_base58_key(&candidate));
        }
    }

    #[test]
    fn test_short_rejected() {
        assert!(!validate("short"));
        assert!(Mint::parse("short").is_err());
    }

    #[test]
    fn test_heuristic_accepts_shape() {
        assert!(looks_like_base58_key(USDC));
        assert!(looks_like_base58_key(&"1".repeat(32)));
        assert!(looks_like_base58_key(&"z".repeat(44)));
        assert!(!looks_like_base58_key(&"z".repeat(45)));
        assert!(!looks_like_base58_key(&"z".repeat(31)));
    }

    #[cfg(feature = "base58-decode")]
    #[test]
    fn test_decode_rejects_wrong_byte_length() {
        // 44 chars of 'z' decode to more than 32 bytes
        assert!(looks_like_base58_key(&"z".repeat(44)));
        assert!(!decodes_to_key(&"z".repeat(44)));
    }

    #[test]
    fn test_mint_parse_trims() {
        let mint = Mint::parse(&format!(" {} ", WSOL)).unwrap();
        assert_eq!(mint.as_str(), WSOL);
        assert_eq!(mint.to_string(), WSOL);
    }

    #[test]
    fn test_mint_parse_errors() {
        assert_eq!(Mint::parse("  "), Err(MintError::Empty));
        assert!(matches!(Mint::parse("0OIl"), Err(MintError::Invalid(_))));
    }
}
