use crate::{
    error::{Result, SiteKeyError},
    key_encoder::{parse_edition, validate_key_field},
    types::{Key, KeyCodecOptions, KeyType},
};

const SCHEME_PREFIX: &str = "freenet:";

const FIELD_NAMES: [&str; 3] = ["routing key", "crypto key", "extra"];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyCodec {
    pub options: KeyCodecOptions,
}

impl KeyCodec {
    pub fn new(options: KeyCodecOptions) -> Self {
        Self { options }
    }

    /// Parses `SSK@r,c,e/site/path...` or `USK@r,c,e/site/edition/path...`.
    ///
    /// The site name of a fixed key is kept verbatim, even when it carries a
    /// folded `-edition` suffix, so that the key writes back out unchanged.
    /// See [`Key::folded_edition`] to split it.
    pub fn parse(&self, uri: &str) -> Result<Key> {
        let uri = self.strip_prefix(uri);

        let (tag, rest) = uri
            .split_once('@')
            .ok_or_else(|| SiteKeyError::malformed("missing '@' after key type"))?;

        let key_type = KeyType::from_tag(tag)
            .ok_or_else(|| SiteKeyError::malformed(format!("unrecognized key type {:?}", tag)))?;

        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, Some(path)),
            None => (rest, None),
        };

        let fields: Vec<&str> = authority.split(',').collect();
        if fields.len() != 3 {
            return Err(SiteKeyError::malformed(format!(
                "expected 3 comma-separated key fields, found {}",
                fields.len()
            )));
        }

        for (name, value) in FIELD_NAMES.iter().zip(fields.iter()) {
            validate_key_field(name, value)?;
        }

        let segments: Vec<String> = match path {
            Some(path) => path.split('/').map(|s| s.to_string()).collect(),
            None => vec![],
        };

        if !self.options.allow_empty_segments && segments.iter().any(|s| s.is_empty()) {
            return Err(SiteKeyError::malformed("empty path segment"));
        }

        let mut segments = segments.into_iter();
        let site_name = segments.next();

        let edition = match key_type {
            KeyType::Ssk => None,
            KeyType::Usk => {
                if site_name.is_none() {
                    return Err(SiteKeyError::malformed("versioned address has no site name"));
                }

                let segment = segments
                    .next()
                    .ok_or_else(|| SiteKeyError::malformed("versioned address has no edition"))?;

                let edition = parse_edition(&segment).ok_or_else(|| {
                    SiteKeyError::malformed(format!("invalid edition {:?}", segment))
                })?;

                Some(edition)
            }
        };

        Ok(Key {
            key_type,
            routing_key: fields[0].to_string(),
            crypto_key: fields[1].to_string(),
            extra: fields[2].to_string(),
            site_name,
            edition,
            path_segments: segments.collect(),
        })
    }

    /// Returns the routing key without building a [`Key`]. Only the `@` and
    /// the first `,` are located; the other fields are not looked at.
    pub fn routing_key<'a>(&self, uri: &'a str) -> Result<&'a str> {
        let uri = self.strip_prefix(uri);

        let (_, rest) = uri
            .split_once('@')
            .ok_or_else(|| SiteKeyError::malformed("missing '@' after key type"))?;

        let comma = rest
            .find(',')
            .ok_or_else(|| SiteKeyError::malformed("missing ',' after routing key"))?;

        let routing_key = &rest[..comma];

        if routing_key.contains('/') {
            return Err(SiteKeyError::malformed("missing ',' after routing key"));
        }

        if routing_key.is_empty() {
            return Err(SiteKeyError::malformed("routing key is empty"));
        }

        Ok(routing_key)
    }

    fn strip_prefix<'a>(&self, uri: &'a str) -> &'a str {
        let mut uri = uri;

        if self.options.allow_scheme_prefix
            && uri.len() >= SCHEME_PREFIX.len()
            && uri.is_char_boundary(SCHEME_PREFIX.len())
            && uri[..SCHEME_PREFIX.len()].eq_ignore_ascii_case(SCHEME_PREFIX)
        {
            uri = &uri[SCHEME_PREFIX.len()..];
        }

        uri.strip_prefix('/').unwrap_or(uri)
    }
}

pub fn parse(uri: &str) -> Result<Key> {
    KeyCodec::default().parse(uri)
}

pub fn routing_key(uri: &str) -> Result<&str> {
    KeyCodec::default().routing_key(uri)
}
