use std::collections::HashMap;

use log::{debug, warn};

use crate::{codec::KeyCodec, error::Result, types::Key};

/// Parses every reference, failing on the first malformed one.
pub fn parse_references<I, S>(codec: &KeyCodec, uris: I) -> Result<Vec<Key>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    uris.into_iter()
        .map(|uri| codec.parse(uri.as_ref()))
        .collect()
}

/// Parses every reference, skipping malformed ones.
pub fn parse_references_lenient<I, S>(codec: &KeyCodec, uris: I) -> Vec<Key>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keys = vec![];
    let mut skipped = 0;

    for uri in uris {
        let uri = uri.as_ref();
        match codec.parse(uri) {
            Ok(key) => keys.push(key),
            Err(e) => {
                warn!("Skipping reference {:?}: {}", uri, e);
                skipped += 1;
            }
        }
    }

    debug!("Parsed {} references, skipped {}", keys.len(), skipped);

    keys
}

/// Groups references by routing key using the fast path, so nothing past
/// the first field is validated. References without a locatable routing key
/// are skipped.
pub fn index_by_routing_key<'a>(
    codec: &KeyCodec,
    uris: &[&'a str],
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut index: HashMap<&'a str, Vec<&'a str>> = HashMap::new();

    for &uri in uris {
        match codec.routing_key(uri) {
            Ok(routing_key) => index.entry(routing_key).or_default().push(uri),
            Err(e) => warn!("Skipping reference {:?}: {}", uri, e),
        }
    }

    index
}
