//! The bound configuration value and its save operation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec::{Codec, Json};
use crate::error::ConflowError;
use crate::file;
use crate::flow::ConfigFlow;
use crate::types::{Configuration, WriteMode};

/// A configuration value bound to the file it was loaded from.
///
/// Produced by [`ConfigBuilder::build`](crate::ConfigBuilder::build). The source
/// is the only thing that writes the file; edits made through
/// [`data_mut`](Self::data_mut) or a [`ConfigFlow`] stay in memory until
/// [`save`](Self::save) runs.
#[derive(Debug)]
pub struct ConfigSource<T, C = Json> {
    path: PathBuf,
    data: T,
    codec: C,
    write_mode: WriteMode,
}

impl<T: Configuration, C: Codec> ConfigSource<T, C> {
    pub(crate) fn new(path: PathBuf, data: T, codec: C, write_mode: WriteMode) -> Self {
        Self {
            path,
            data,
            codec,
            write_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Replace the in-memory value. Nothing is written until [`save`](Self::save).
    pub fn set_data(&mut self, data: T) {
        self.data = data;
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// The manifest version of the current value.
    pub fn version(&self) -> u32 {
        self.data.manifest().version
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Encode the current value and overwrite the file with it.
    ///
    /// Whether a crash mid-write can corrupt the file depends on the
    /// [`WriteMode`]; with the default `Truncate` it can.
    pub fn save(&self) -> Result<(), ConflowError> {
        let text = self
            .codec
            .encode(&self.data)
            .map_err(|source| ConflowError::Serialize {
                path: self.path.clone(),
                codec: self.codec.name(),
                source,
            })?;

        file::write(&self.path, &text, self.write_mode)?;
        debug!(path = %self.path.display(), mode = ?self.write_mode, "saved configuration");
        Ok(())
    }

    /// Open a flow: a scoped handle that saves this source when released.
    pub fn flow(&mut self) -> ConfigFlow<'_, T, C> {
        ConfigFlow::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ConfigBuilder;
    use crate::fixtures::test::{ServerConfig, Settings, default_settings};
    use std::fs;
    use tempfile::TempDir;

    fn source_at(path: PathBuf) -> ConfigSource<Settings> {
        ConfigSource::new(path, default_settings(), Json::default(), WriteMode::Truncate)
    }

    #[test]
    fn save_writes_indented_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{}").unwrap();

        source_at(path.clone()).save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"name\": \"x\""));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({"version": 1, "name": "x"}));
    }

    #[test]
    fn save_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        let long_name = "n".repeat(256);
        fs::write(&path, format!(r#"{{"version":1,"name":"{long_name}"}}"#)).unwrap();

        source_at(path.clone()).save().unwrap();

        let back: Settings = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, default_settings());
    }

    #[test]
    fn set_data_is_in_memory_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"version":1,"name":"x"}"#).unwrap();

        let mut source = source_at(path.clone());
        source.set_data(Settings {
            name: "changed".into(),
            ..default_settings()
        });

        assert_eq!(source.data().name, "changed");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"version":1,"name":"x"}"#
        );
    }

    #[test]
    fn version_reads_manifest() {
        let dir = TempDir::new().unwrap();
        let mut source = source_at(dir.path().join("cfg.json"));
        source.data_mut().manifest.version = 7;
        assert_eq!(source.version(), 7);
    }

    #[test]
    fn save_then_rebind_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.json");

        let mut source = ConfigBuilder::<ServerConfig>::create()
            .set_default(ServerConfig::default())
            .bind_file(&path)
            .unwrap()
            .build()
            .unwrap();

        source.data_mut().port = 9443;
        source.data_mut().tags.push("edge".into());
        source.data_mut().database.url = Some("postgres://db/app".into());
        source.save().unwrap();
        let expected = source.into_data();

        let reloaded = ConfigBuilder::<ServerConfig>::create()
            .bind_file(&path)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(reloaded.data(), &expected);
    }

    #[test]
    fn atomic_save_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"version":1,"name":"old"}"#).unwrap();

        let source =
            ConfigSource::new(path.clone(), default_settings(), Json::compact(), WriteMode::Atomic);
        source.save().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"version":1,"name":"x"}"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn atomic_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");

        let mut source = ConfigBuilder::create()
            .set_default(default_settings())
            .write_mode(WriteMode::Atomic)
            .bind_file(&path)
            .unwrap()
            .build()
            .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        source.data_mut().name = "shared".into();
        source.save().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn save_surfaces_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("cfg.json");

        let result = source_at(path).save();
        assert!(matches!(result, Err(ConflowError::IoError { .. })));
    }

    #[test]
    fn multiple_flows_in_sequence_last_writer_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        let mut source = source_at(path.clone());

        source.flow().name = "first".into();
        source.flow().name = "second".into();

        let back: Settings = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.name, "second");
    }
}
