//! Raw OpenCL bindings
//!
//! Everything here maps directly onto the C API: type aliases, the numeric
//! codes defined by the OpenCL specification, and the dynamically loaded entry
//! points. Nothing in this module is safe to use without consulting the
//! OpenCL documentation.

#![allow(non_camel_case_types)]

mod constants;
pub mod functions;
mod info;
mod table;
mod types;
mod version;

pub use constants::*;
pub use functions::RawOpenCL;
pub use info::*;
pub use table::*;
pub use types::*;
pub use version::*;
