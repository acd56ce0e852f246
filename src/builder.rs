use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::{Codec, Json};
use crate::error::{CodecError, ConflowError};
use crate::file;
use crate::source::ConfigSource;
use crate::types::{Configuration, Location, WriteMode};

/// Entry point for binding a configuration type to a file.
pub struct Conflow;

impl Conflow {
    pub fn builder<T: Configuration>() -> ConfigBuilder<T> {
        ConfigBuilder::create()
    }
}

/// Builder that resolves a default, binds a file, and produces a [`ConfigSource`].
///
/// Calls chain by value. The order that matters:
///
/// - [`set_default()`](Self::set_default) / [`set_default_with()`](Self::set_default_with)
///   and [`codec()`](Self::codec) must come **before** binding, because binding
///   may need to write the default with that codec.
/// - [`bind_file()`](Self::bind_file) or [`bind_in()`](Self::bind_in) does the I/O.
/// - [`build()`](Self::build) hands the loaded value to a source.
pub struct ConfigBuilder<T, C = Json> {
    file_path: Option<PathBuf>,
    default_value: Option<T>,
    current_value: Option<T>,
    codec: C,
    write_mode: WriteMode,
}

impl<T: Configuration> ConfigBuilder<T> {
    /// An empty builder using the pretty [`Json`] codec and [`WriteMode::Truncate`].
    pub fn create() -> Self {
        Self {
            file_path: None,
            default_value: None,
            current_value: None,
            codec: Json::default(),
            write_mode: WriteMode::default(),
        }
    }
}

impl<T: Configuration, C: Codec> ConfigBuilder<T, C> {
    /// Set the value written when the bound file does not exist yet.
    /// Replaces any earlier default.
    pub fn set_default(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Like [`set_default`](Self::set_default), but computes the value with `f`.
    /// The supplier runs immediately.
    pub fn set_default_with<F: FnOnce() -> T>(mut self, f: F) -> Self {
        self.default_value = Some(f());
        self
    }

    /// Replace the codec used to read, create, and save the file.
    pub fn codec<C2: Codec>(self, codec: C2) -> ConfigBuilder<T, C2> {
        ConfigBuilder {
            file_path: self.file_path,
            default_value: self.default_value,
            current_value: self.current_value,
            codec,
            write_mode: self.write_mode,
        }
    }

    /// Set how the resulting source writes its file (default: [`WriteMode::Truncate`]).
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Bind the builder to `path`.
    ///
    /// - If the file exists, its content is decoded as `T`. Content that does
    ///   not decode (empty, not UTF-8, malformed, wrong shape) fails with
    ///   [`ConflowError::Deserialize`] and the file is left as it is.
    /// - If it does not exist, the default is encoded into a new file (creating
    ///   parent directories) and a copy becomes the current value. Without a
    ///   default this fails with [`ConflowError::MissingDefault`] before
    ///   anything is written.
    ///
    /// The default stays on the builder, so binding again to another missing
    /// path seeds that file too.
    pub fn bind_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConflowError>
    where
        T: Clone,
    {
        let path = path.as_ref().to_path_buf();

        let value = match file::read_optional(&path)? {
            Some(bytes) => {
                let value = self.decode(&path, bytes)?;
                debug!(path = %path.display(), codec = self.codec.name(), "loaded configuration");
                value
            }
            None => {
                let value = self
                    .default_value
                    .clone()
                    .ok_or_else(|| ConflowError::MissingDefault { path: path.clone() })?;
                self.write_default(&path, &value)?;
                value
            }
        };

        self.file_path = Some(path);
        self.current_value = Some(value);
        Ok(self)
    }

    /// Bind `{location}/{file_name}`. See [`bind_file`](Self::bind_file).
    ///
    /// `app_name` is only consulted for [`Location::Platform`].
    pub fn bind_in(
        self,
        location: &Location,
        app_name: &str,
        file_name: &str,
    ) -> Result<Self, ConflowError>
    where
        T: Clone,
    {
        let path = file::resolve_file_path(location, app_name, file_name)?;
        self.bind_file(path)
    }

    /// Produce the bound source. Fails with [`ConflowError::NotBound`] unless a
    /// bind succeeded.
    pub fn build(self) -> Result<ConfigSource<T, C>, ConflowError> {
        let (Some(path), Some(value)) = (self.file_path, self.current_value) else {
            return Err(ConflowError::NotBound);
        };
        Ok(ConfigSource::new(path, value, self.codec, self.write_mode))
    }

    fn decode(&self, path: &Path, bytes: Vec<u8>) -> Result<T, ConflowError> {
        let deserialize_error = |source: CodecError| ConflowError::Deserialize {
            path: path.to_path_buf(),
            codec: self.codec.name(),
            source,
        };

        let text = String::from_utf8(bytes).map_err(|e| deserialize_error(e.into()))?;
        self.codec.decode(&text).map_err(deserialize_error)
    }

    fn write_default(&self, path: &Path, value: &T) -> Result<(), ConflowError> {
        let text = self
            .codec
            .encode(value)
            .map_err(|source| ConflowError::Serialize {
                path: path.to_path_buf(),
                codec: self.codec.name(),
                source,
            })?;

        file::create_new(path, &text)?;
        warn!(
            path = %path.display(),
            "configuration file did not exist; created it with default content"
        );
        Ok(())
    }
}
