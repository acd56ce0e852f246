//! Bind a typed configuration struct to a file. Set a default, bind a path,
//! edit, and the file follows.
//!
//! Conflow keeps one configuration value in sync with one file on disk. A
//! builder loads the file (or writes your default when it is missing), hands
//! you a [`ConfigSource`] that owns the value, and the source gives out
//! [`ConfigFlow`] handles that save automatically when they go out of scope.
//!
//! ```ignore
//! let mut source = Conflow::builder::<Settings>()
//!     .set_default(Settings::default())
//!     .bind_file("settings.json")?
//!     .build()?;
//!
//! {
//!     let mut flow = source.flow();
//!     flow.name = "y".into();
//! } // saved here
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! ConfigBuilder::create()
//!     .set_default(..)     how to seed a missing file
//!     .codec(..)           how the file is encoded (JSON by default)
//!     .bind_file(path)     load it, or create it from the default
//!     .build()             -> ConfigSource
//!          .flow()         -> ConfigFlow, saves on release
//! ```
//!
//! Each step fails loudly instead of guessing:
//!
//! - Binding a missing file with no default is
//!   [`MissingDefault`](ConflowError::MissingDefault); no file is created.
//! - Calling [`build()`](ConfigBuilder::build) before a successful bind is
//!   [`NotBound`](ConflowError::NotBound).
//! - A file that exists but does not decode (empty, malformed, the wrong
//!   shape) is [`Deserialize`](ConflowError::Deserialize). It is **never**
//!   replaced with the default; fix or delete it yourself.
//! - Any filesystem failure is [`IoError`](ConflowError::IoError), with the
//!   path it happened on.
//!
//! # The configuration type
//!
//! Any serde type works, as long as it exposes a [`Manifest`] through the
//! [`Configuration`] trait. The manifest's `version` is loaded and saved with
//! the rest of the value; it is there so a future release can migrate old
//! files, and nothing inspects it today.
//!
//! Use `#[serde(flatten)]` on the manifest field to keep `version` at the top
//! level of the file instead of under a `manifest` key.
//!
//! # Sources and flows
//!
//! A [`ConfigSource`] is the only writer of its file. Mutate it directly with
//! [`data_mut()`](ConfigSource::data_mut) / [`set_data()`](ConfigSource::set_data)
//! and call [`save()`](ConfigSource::save), or open a [`ConfigFlow`]:
//!
//! - A flow dereferences to the live value; there is no copy.
//! - Releasing the flow saves exactly once, whether it is closed with
//!   [`close()`](ConfigFlow::close), dropped, or dropped while unwinding.
//! - A manual [`save()`](ConfigFlow::save) does not release the flow; release
//!   saves again.
//! - `close()` returns the save error. A failed save inside `drop` is logged
//!   at error level through `tracing` and otherwise lost.
//!
//! A flow mutably borrows its source, so flows over one source run one after
//! another. Separate processes writing the same path are not coordinated:
//! the last write wins.
//!
//! # Codecs
//!
//! The [`Codec`] trait decides the on-disk format. [`Json`] (pretty by
//! default, [`Json::compact()`] for one line) ships always; [`Toml`] ships
//! behind the default `toml` feature. The same codec writes the default file
//! and every later save.
//!
//! # Locations and write modes
//!
//! [`bind_in()`](ConfigBuilder::bind_in) resolves a [`Location`] (platform
//! config dir, a home subdirectory, the CWD, or an explicit directory) plus a
//! file name before binding. [`WriteMode::Atomic`] makes saves go through a
//! temp file and a rename; the default [`WriteMode::Truncate`] rewrites the
//! file in place.
//!
//! # Logging
//!
//! Events go through `tracing`: `debug` for loads and saves, `warn` when a
//! file is created from the default, `error` for a failed release-time save.
//! Install whatever subscriber your application already uses.

pub mod error;
pub mod types;

mod builder;
mod codec;
mod file;
mod flow;
mod source;

#[cfg(test)]
mod fixtures;

pub use builder::{ConfigBuilder, Conflow};
#[cfg(feature = "toml")]
pub use codec::Toml;
pub use codec::{Codec, Json};
pub use error::{CodecError, ConflowError};
pub use flow::ConfigFlow;
pub use source::ConfigSource;
pub use types::{Configuration, Location, Manifest, WriteMode};
