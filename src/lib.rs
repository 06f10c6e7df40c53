//! Dynamically-loaded OpenCL bindings.
//!
//! The [`raw`] module mirrors the native API: scalar and handle types, the
//! numeric codes used to query and configure OpenCL objects, and the entry
//! points resolved from the system OpenCL library at runtime.
//!
//! With the default `safe` feature enabled, the crate root also exposes a safe
//! layer on top of it: typed info queries for every object kind, and handle
//! wrappers tying the native reference counts to Rust ownership.

pub extern crate dlopen;

#[macro_use]
mod macros;

pub mod raw;

#[cfg(feature = "safe")]
pub mod safe;

#[cfg(feature = "safe")]
pub use safe::*;

use crate::raw::OpenCLVersion;

/// Attempt to load the system OpenCL library, if not already loaded.
///
/// The outcome is cached for the lifetime of the process, so calling this more
/// than once is cheap and always returns the same result.
pub fn load_opencl() -> std::result::Result<OpenCLVersion, &'static dlopen::Error> {
    raw::functions::load_opencl()
}
