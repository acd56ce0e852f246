//! Scoped handles that save their source on release.
//!
//! A [`ConfigFlow`] mutably borrows a [`ConfigSource`], so edits made through
//! it are edits to the source itself; there is no separate copy to go stale.
//! The flow is released exactly once, either explicitly with
//! [`close`](ConfigFlow::close) or implicitly when it is dropped, including
//! during unwinding. Release always runs a save, even if
//! [`save`](ConfigFlow::save) was already called by hand.
//!
//! ```no_run
//! # use conflow::{Configuration, ConfigSource, Manifest};
//! # #[derive(serde::Serialize, serde::Deserialize)]
//! # struct Settings { manifest: Manifest, name: String }
//! # impl Configuration for Settings {
//! #     fn manifest(&self) -> &Manifest { &self.manifest }
//! # }
//! # fn edit(source: &mut ConfigSource<Settings>) -> Result<(), conflow::ConflowError> {
//! let mut flow = source.flow();
//! flow.name = "y".into();
//! flow.close()?; // saved; errors surface here
//! # Ok(())
//! # }
//! ```
//!
//! Dropping a flow instead of closing it also saves, but a failure can only
//! be logged, since `drop` has nowhere to return it.

use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::codec::{Codec, Json};
use crate::error::ConflowError;
use crate::source::ConfigSource;
use crate::types::Configuration;

pub struct ConfigFlow<'a, T: Configuration, C: Codec = Json> {
    source: &'a mut ConfigSource<T, C>,
    released: bool,
}

impl<'a, T: Configuration, C: Codec> ConfigFlow<'a, T, C> {
    pub(crate) fn new(source: &'a mut ConfigSource<T, C>) -> Self {
        Self {
            source,
            released: false,
        }
    }

    /// The live value of the underlying source.
    pub fn data(&self) -> &T {
        self.source.data()
    }

    pub fn data_mut(&mut self) -> &mut T {
        self.source.data_mut()
    }

    pub fn source(&self) -> &ConfigSource<T, C> {
        &*self.source
    }

    /// Save the source now. The flow stays open and will save again on release.
    pub fn save(&self) -> Result<(), ConflowError> {
        self.source.save()
    }

    /// Release the flow, saving the source and returning the outcome.
    pub fn close(mut self) -> Result<(), ConflowError> {
        self.released = true;
        self.source.save()
    }
}

impl<T: Configuration, C: Codec> Deref for ConfigFlow<'_, T, C> {
    type Target = T;

    fn deref(&self) -> &T {
        self.data()
    }
}

impl<T: Configuration, C: Codec> DerefMut for ConfigFlow<'_, T, C> {
    fn deref_mut(&mut self) -> &mut T {
        self.data_mut()
    }
}

impl<T: Configuration, C: Codec> Drop for ConfigFlow<'_, T, C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Err(e) = self.source.save() {
            error!(
                path = %self.source.path().display(),
                error = %e,
                "failed to save configuration on flow release"
            );
        }
    }
}

impl<T: Configuration + std::fmt::Debug, C: Codec> std::fmt::Debug for ConfigFlow<'_, T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFlow")
            .field("path", &self.source.path())
            .field("data", self.source.data())
            .field("released", &self.released)
            .finish()
    }
}
