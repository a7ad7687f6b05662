use std::sync::OnceLock;

use base64::{
    alphabet::Alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use regex::Regex;

use crate::error::{Result, SiteKeyError};

// Standard base64 with `~` and `-` standing in for `+` and `/`.
pub const KEY_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789~-";

const ALPHABET: Alphabet = match Alphabet::new(KEY_ALPHABET) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("key alphabet must be 64 unique printable characters"),
};

const FIELD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &ALPHABET,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

pub fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '~' || ch == '-'
}

/// Checks that a routing key, crypto key or extra field is a non-empty,
/// unpadded token in the key alphabet. The decoded bytes are discarded.
pub fn validate_key_field(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SiteKeyError::malformed(format!("{} is empty", name)));
    }

    if let Some(bad) = value.chars().find(|ch| !is_key_char(*ch)) {
        return Err(SiteKeyError::malformed(format!(
            "{} contains invalid character {:?}",
            name, bad
        )));
    }

    // Alphabet is already fine here, so a failure means a truncated token
    FIELD_ENGINE.decode(value).map_err(|e| {
        SiteKeyError::malformed(format!("{} is not a valid key token: {}", name, e))
    })?;

    Ok(())
}

/// Largest edition the network accepts; editions are signed 64-bit upstream.
pub const MAX_EDITION: u64 = i64::MAX as u64;

/// Parses an edition number. Only plain ASCII digits are accepted, so signs
/// and whitespace are rejected rather than silently normalised.
pub fn parse_edition(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let edition = segment.parse::<i64>().ok()?;
    u64::try_from(edition).ok()
}

/// Converts a caller-supplied edition, rejecting negatives.
pub fn check_edition(edition: i64) -> Result<u64> {
    u64::try_from(edition).map_err(|_| SiteKeyError::InvalidEdition(edition))
}

fn folded_edition_regex() -> &'static Regex {
    static FOLDED: OnceLock<Regex> = OnceLock::new();
    FOLDED.get_or_init(|| {
        Regex::new(r"^(?P<name>.+)-(?P<edition>[0-9]+)$").expect("folded edition pattern is valid")
    })
}

/// Splits `name-15` into `("name", 15)`. Names without a numeric suffix, or
/// with one that overflows, return `None`.
pub fn split_folded_edition(site_name: &str) -> Option<(&str, u64)> {
    let captures = folded_edition_regex().captures(site_name)?;
    let name = captures.name("name")?.as_str();
    let edition = parse_edition(captures.name("edition")?.as_str())?;

    Some((name, edition))
}

pub fn fold_edition(site_name: &str, edition: u64) -> String {
    format!("{}-{}", site_name, edition)
}

pub fn push_path<S: AsRef<str>>(out: &mut String, segments: &[S]) {
    for segment in segments {
        out.push('/');
        out.push_str(segment.as_ref());
    }
}
