use crate::{
    error::{Result, SiteKeyError},
    key_encoder::{check_edition, fold_edition, push_path},
    types::{Key, KeyType},
};

/// Writes addresses for the content identified by a routing key, crypto key
/// and extra field. The fields are copied into the output as given.
///
/// The site name must be one non-empty path segment; an empty name or one
/// containing `/` would move every following segment and is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressBuilder<'a> {
    routing_key: &'a str,
    crypto_key: &'a str,
    extra: &'a str,
}

impl<'a> AddressBuilder<'a> {
    pub fn new(routing_key: &'a str, crypto_key: &'a str, extra: &'a str) -> Self {
        Self {
            routing_key,
            crypto_key,
            extra,
        }
    }

    pub fn from_key(key: &'a Key) -> Self {
        Self::new(key.routing_key(), key.crypto_key(), key.extra())
    }

    /// `USK@r,c,e/site/edition/path...`
    pub fn to_versioned<S: AsRef<str>>(
        &self,
        site_name: &str,
        edition: i64,
        path_segments: &[S],
    ) -> Result<String> {
        check_site_name(site_name)?;
        let edition = check_edition(edition)?;

        let mut out = self.authority(KeyType::Usk);
        out.push('/');
        out.push_str(site_name);
        out.push('/');
        out.push_str(&edition.to_string());
        push_path(&mut out, path_segments);

        Ok(out)
    }

    /// `SSK@r,c,e/site/path...`
    pub fn to_fixed<S: AsRef<str>>(&self, site_name: &str, path_segments: &[S]) -> Result<String> {
        check_site_name(site_name)?;

        let mut out = self.authority(KeyType::Ssk);
        out.push('/');
        out.push_str(site_name);
        push_path(&mut out, path_segments);

        Ok(out)
    }

    /// `SSK@r,c,e/site-edition/path...`
    ///
    /// The edition becomes part of the site name segment, which is what the
    /// network stores that edition's manifest under. This is a different
    /// address from the versioned form, not a spelling of it.
    pub fn to_fixed_with_edition<S: AsRef<str>>(
        &self,
        site_name: &str,
        edition: i64,
        path_segments: &[S],
    ) -> Result<String> {
        check_site_name(site_name)?;
        let edition = check_edition(edition)?;

        let mut out = self.authority(KeyType::Ssk);
        out.push('/');
        out.push_str(&fold_edition(site_name, edition));
        push_path(&mut out, path_segments);

        Ok(out)
    }

    fn authority(&self, key_type: KeyType) -> String {
        format!(
            "{}@{},{},{}",
            key_type.tag(),
            self.routing_key,
            self.crypto_key,
            self.extra
        )
    }
}

fn check_site_name(site_name: &str) -> Result<()> {
    if site_name.is_empty() {
        return Err(SiteKeyError::malformed("site name is empty"));
    }

    if site_name.contains('/') {
        return Err(SiteKeyError::malformed(format!(
            "site name {:?} contains '/'",
            site_name
        )));
    }

    Ok(())
}
