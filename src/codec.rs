//! On-disk representations for configuration values.
//!
//! A [`Codec`] turns a value into text and back. The builder defaults to
//! [`Json`]; swap it with [`ConfigBuilder::codec`](crate::ConfigBuilder::codec).
//! The same codec is used for the default file written on first bind and for
//! every later save, so a file never changes style between the two.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// Serialize/deserialize strategy for a configuration file.
pub trait Codec {
    /// Short name used in error messages (`"json"`, `"toml"`).
    fn name(&self) -> &'static str;

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError>;

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError>;
}

/// JSON via `serde_json`. Pretty-printed unless built with [`Json::compact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json {
    pretty: bool,
}

impl Json {
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::pretty()
    }
}

impl Codec for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// TOML via the `toml` crate.
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toml;

#[cfg(feature = "toml")]
impl Codec for Toml {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        Ok(toml::to_string_pretty(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError> {
        Ok(toml::from_str(text)?)
    }
}
