//! Safe wrappers around the raw OpenCL API.
//!
//! Everything in this module is re-exported from the crate root.

#[macro_use]
mod macros;

pub mod buffer;
pub mod context;
pub mod device;
mod error;
pub mod event;
pub mod kernel;
pub mod platform;
pub mod program;
pub mod queue;
pub mod sampler;
pub mod util;

pub use error::*;
