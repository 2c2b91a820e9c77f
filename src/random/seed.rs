//! Turning user supplied seeds into engine seeds.
//!
//! Seeds typed by players or designers arrive as text. Numeric text seeds the
//! generator with that number, anything else is hashed so that every string
//! still maps to a reproducible stream.
use once_cell::sync::Lazy;
use rand::TryRngCore;
use rand::rngs::OsRng;
use regex::Regex;

static ZERO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+|-)?0+$").expect("zero seed pattern is valid"));
static NEGATIVE_ONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-0*1$").expect("negative one seed pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    /// Draw a fresh seed from the operating system.
    Entropy,
    Value(i64),
}

/// Resolve seed text.
///
/// 0 and -1 are matched explicitly because they are also what the numeric
/// parse yields on garbage input, and a literal "0" must not fall through to
/// the hash.
pub fn parse_seed_text(text: &str) -> SeedSource {
    if text.is_empty() {
        return SeedSource::Entropy;
    }
    if ZERO_PATTERN.is_match(text) {
        return SeedSource::Value(0);
    }
    if NEGATIVE_ONE_PATTERN.is_match(text) {
        return SeedSource::Value(-1);
    }
    let value = parse_leading_i64(text);
    if value != 0 && value != -1 {
        return SeedSource::Value(value);
    }
    // a hash of 0 or -1 is used as is
    SeedSource::Value(hash_seed_text(text) as i64)
}

/// Base 10 parse of the longest numeric prefix, after leading whitespace and
/// an optional sign. Saturates at the i64 bounds. Returns 0 when there are no
/// digits.
pub fn parse_leading_i64(text: &str) -> i64 {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value = 0i64;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = (byte - b'0') as i64;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// 32 bit hash of the seed text, the first four bytes of its blake3 digest.
pub fn hash_seed_text(text: &str) -> u32 {
    let hash = blake3::hash(text.as_bytes());
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// A 32 bit seed from the operating system. Falls back to the thread rng if
/// the os source is unavailable.
pub fn entropy_seed() -> u32 {
    match OsRng.try_next_u32() {
        Ok(seed) => seed,
        Err(e) => {
            tracing::warn!("os entropy unavailable, using thread rng for seed: {e}");
            rand::random()
        }
    }
}
