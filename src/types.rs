//! Shared types: the manifest, the configuration capability, file locations,
//! and write strategies.
//!
//! # Locations
//!
//! [`Location`] names a directory the way most apps think about config:
//!
//! | Variant | Resolves to |
//! |---------|-------------|
//! | `Platform` | OS config dir for the app (`~/.config/{app}` on Linux) |
//! | `Home(".myapp")` | `$HOME/.myapp` |
//! | `Cwd` | the current working directory |
//! | `Path(dir)` | `dir`, verbatim |
//!
//! A location plus a file name gives the path that
//! [`bind_in`](crate::ConfigBuilder::bind_in) binds. Passing a plain path to
//! [`bind_file`](crate::ConfigBuilder::bind_file) skips resolution entirely.
//!
//! # Write modes
//!
//! [`WriteMode::Truncate`] rewrites the file in place. It is simple and keeps
//! the file's inode, but a crash halfway through leaves a truncated file
//! behind. [`WriteMode::Atomic`] writes a sibling temp file and renames it
//! over the target, so readers only ever see the old or the new content.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Version marker embedded in a configuration value.
///
/// The version is carried through load and save untouched. Nothing reads it
/// for migration decisions yet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Manifest {
    pub version: u32,
}

impl Manifest {
    pub const fn new(version: u32) -> Self {
        Self { version }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A configuration shape that can be bound to a file.
///
/// Implementors are plain serde types that expose their [`Manifest`]:
///
/// ```
/// use conflow::{Configuration, Manifest};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Settings {
///     manifest: Manifest,
///     name: String,
/// }
///
/// impl Configuration for Settings {
///     fn manifest(&self) -> &Manifest {
///         &self.manifest
///     }
/// }
/// ```
pub trait Configuration: Serialize + DeserializeOwned {
    fn manifest(&self) -> &Manifest;
}

/// Directory in which a config file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// How a source writes its file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the file and write the new content in place.
    #[default]
    Truncate,
    /// Write to a temp file in the same directory, then rename it over the target.
    Atomic,
}
