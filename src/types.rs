use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use typed_builder::TypedBuilder;

use crate::{
    builder::AddressBuilder,
    codec::KeyCodec,
    error::SiteKeyError,
    key_encoder::{check_edition, fold_edition, push_path, split_folded_edition},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Fixed reference to one immutable piece of content.
    Ssk,
    /// Updatable reference to a named site at a given edition.
    Usk,
}

impl KeyType {
    pub fn tag(&self) -> &'static str {
        match self {
            KeyType::Ssk => "SSK",
            KeyType::Usk => "USK",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("SSK") {
            Some(KeyType::Ssk)
        } else if tag.eq_ignore_ascii_case("USK") {
            Some(KeyType::Usk)
        } else {
            None
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct KeyCodecOptions {
    /// Keep empty site names and path segments (`a//b`, trailing `/`) instead
    /// of rejecting them.
    #[builder(default = false)]
    pub allow_empty_segments: bool,
    /// Accept and strip a leading `freenet:` scheme.
    #[builder(default = true)]
    pub allow_scheme_prefix: bool,
}

impl Default for KeyCodecOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A parsed SSK or USK address.
///
/// Keys are only produced by [`KeyCodec::parse`] (or derived from another
/// key), so the three key fields are always non-empty and in the key
/// alphabet. `Display` writes the canonical form back out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
    pub(crate) key_type: KeyType,
    pub(crate) routing_key: String,
    pub(crate) crypto_key: String,
    pub(crate) extra: String,
    pub(crate) site_name: Option<String>,
    pub(crate) edition: Option<u64>,
    pub(crate) path_segments: Vec<String>,
}

impl Key {
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    pub fn crypto_key(&self) -> &str {
        &self.crypto_key
    }

    pub fn extra(&self) -> &str {
        &self.extra
    }

    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }

    pub fn edition(&self) -> Option<u64> {
        self.edition
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    pub fn is_versioned(&self) -> bool {
        self.key_type == KeyType::Usk
    }

    pub fn builder(&self) -> AddressBuilder<'_> {
        AddressBuilder::from_key(self)
    }

    /// For a fixed key whose site name ends in `-<edition>`, the base name
    /// and the edition. Versioned keys carry their edition separately and
    /// always return `None`.
    pub fn folded_edition(&self) -> Option<(&str, u64)> {
        match self.key_type {
            KeyType::Ssk => split_folded_edition(self.site_name.as_deref()?),
            KeyType::Usk => None,
        }
    }

    /// The versioned key addressing the same site. Fixed keys without a
    /// folded edition have no versioned counterpart.
    pub fn to_versioned_key(&self) -> Option<Key> {
        match self.key_type {
            KeyType::Usk => Some(self.clone()),
            KeyType::Ssk => {
                let (name, edition) = self.folded_edition()?;
                Some(Key {
                    key_type: KeyType::Usk,
                    site_name: Some(name.to_string()),
                    edition: Some(edition),
                    ..self.clone()
                })
            }
        }
    }

    /// The fixed key for this exact edition, with the edition folded into the
    /// site name.
    pub fn to_fixed_key(&self) -> Key {
        match (self.key_type, self.site_name.as_deref(), self.edition) {
            (KeyType::Usk, Some(name), Some(edition)) => Key {
                key_type: KeyType::Ssk,
                site_name: Some(fold_edition(name, edition)),
                edition: None,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    /// Same site at another edition. A fixed key without a folded edition is
    /// returned unchanged. Negative editions fail with `InvalidEdition`.
    pub fn with_edition(&self, edition: i64) -> Result<Key, SiteKeyError> {
        let edition = check_edition(edition)?;

        let key = match self.key_type {
            KeyType::Usk => Key {
                edition: Some(edition),
                ..self.clone()
            },
            KeyType::Ssk => match self.folded_edition() {
                Some((name, _)) => Key {
                    site_name: Some(fold_edition(name, edition)),
                    ..self.clone()
                },
                None => self.clone(),
            },
        };

        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!(
            "{}@{},{},{}",
            self.key_type.tag(),
            self.routing_key,
            self.crypto_key,
            self.extra
        );

        if let Some(site_name) = &self.site_name {
            out.push('/');
            out.push_str(site_name);
        }

        if let Some(edition) = self.edition {
            out.push('/');
            out.push_str(&edition.to_string());
        }

        push_path(&mut out, &self.path_segments);

        f.write_str(&out)
    }
}

impl FromStr for Key {
    type Err = SiteKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCodec::default().parse(s)
    }
}

impl TryFrom<String> for Key {
    type Error = SiteKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}
