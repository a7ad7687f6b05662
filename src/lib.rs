mod builder;
pub use builder::AddressBuilder;

mod codec;
pub use codec::{parse, routing_key, KeyCodec};

pub mod error;
pub use error::SiteKeyError;

pub mod key_encoder;
pub mod references;
pub mod types;

pub use types::{Key, KeyCodecOptions, KeyType};
