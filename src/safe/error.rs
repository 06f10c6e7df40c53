use crate::raw::{cl_int, cl_uint, error_name, OpenCLVersion};
use std::ffi::NulError;
use std::fmt::{self, Debug, Display, Formatter};

/// An error code returned by an OpenCL API call
#[derive(thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    code: cl_int,
    context: &'static str,
}

impl ApiError {
    /// Create a new `ApiError` with the given error code and context
    pub fn new(code: cl_int, context: &'static str) -> Self {
        Self { code, context }
    }

    /// The raw OpenCL error code
    pub fn code(&self) -> cl_int {
        self.code
    }

    /// The name of the API function that returned the error
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// The symbolic name of the error code, if known
    pub fn name(&self) -> Option<&'static str> {
        error_name(self.code)
    }
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}: OpenCL error {} ({})",
            self.context,
            self.code,
            self.name().unwrap_or("unknown error code")
        )
    }
}

/// An error related to OpenCL
#[derive(thiserror::Error)]
pub enum Error {
    /// Error that occurred within an OpenCL API call
    #[error("{0}")]
    ApiError(#[from] ApiError),

    /// Error converting a flag value to a Rust enum
    #[error("Invalid flag value {value:x} for type {context}")]
    InvalidFlag {
        value: cl_uint,
        context: &'static str,
    },

    /// Data length mismatch
    #[error("Expected data length of {expected}, got data length {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    /// Unsupported system OpenCL version
    #[error("{expected} required for {context}, but system only supports {actual}")]
    UnsupportedVersion {
        expected: OpenCLVersion,
        actual: OpenCLVersion,
        context: &'static str,
    },

    /// The OpenCL library couldn't be loaded
    #[error("Failed to load OpenCL: {0}")]
    LoadError(&'static dlopen::Error),

    /// A program failed to compile or link
    #[error("{error}\n{log}")]
    BuildFailed { error: ApiError, log: String },

    /// A kernel argument was set with a Rust type that doesn't match the
    /// OpenCL C type declared by the kernel
    #[error("Kernel argument {index} has type {c_type}, which can't be set from {rust_type}")]
    ArgTypeMismatch {
        index: u32,
        c_type: String,
        rust_type: String,
    },

    /// An argument was rejected before reaching OpenCL
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A string passed to OpenCL contained a nul byte
    #[error("{0}")]
    Nul(#[from] NulError),
}

impl Error {
    /// Get the underlying OpenCL error code, if this error came from an API call
    pub fn api_error(&self) -> Option<ApiError> {
        match self {
            Error::ApiError(e) => Some(*e),
            Error::BuildFailed { error, .. } => Some(*error),
            _ => None,
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

/// An OpenCL result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{CL_BUILD_PROGRAM_FAILURE, CL_INVALID_VALUE};

    #[test]
    fn test_api_error_display() {
        let e = ApiError::new(CL_INVALID_VALUE, "clGetDeviceInfo");
        assert_eq!(
            e.to_string(),
            "clGetDeviceInfo: OpenCL error -30 (CL_INVALID_VALUE)"
        );
        assert_eq!(format!("{:?}", e), e.to_string());
        assert_eq!(e.name(), Some("CL_INVALID_VALUE"));

        let unknown = ApiError::new(-9999, "clFoo");
        assert!(unknown.to_string().contains("unknown error code"));
        assert_eq!(unknown.name(), None);
    }

    #[test]
    fn test_error_api_code() {
        let e: Error = ApiError::new(CL_INVALID_VALUE, "clFlush").into();
        assert_eq!(e.api_error().map(|e| e.code()), Some(CL_INVALID_VALUE));

        let e = Error::BuildFailed {
            error: ApiError::new(CL_BUILD_PROGRAM_FAILURE, "clBuildProgram"),
            log: "error: expected ';'".to_string(),
        };
        assert_eq!(e.api_error().map(|e| e.context()), Some("clBuildProgram"));
        assert!(e.to_string().ends_with("expected ';'"));

        assert!(Error::InvalidArgument("x".into()).api_error().is_none());
    }

    #[test]
    fn test_error_conversions() {
        fn name(s: &str) -> Result<std::ffi::CString> {
            Ok(std::ffi::CString::new(s)?)
        }

        fn flush(code: cl_int) -> Result<()> {
            wrap_result!("clFlush" => code)
        }

        assert!(name("vector_add").is_ok());
        match name("vector\0add") {
            Err(Error::Nul(e)) => assert_eq!(e.nul_position(), 6),
            other => panic!("unexpected result: {:?}", other),
        }

        let e = flush(CL_INVALID_VALUE).unwrap_err();
        assert_eq!(dbg!(e).api_error().map(|e| e.code()), Some(CL_INVALID_VALUE));
    }

    #[test]
    fn test_version_error_display() {
        let e = Error::UnsupportedVersion {
            expected: OpenCLVersion::CL20,
            actual: OpenCLVersion::CL12,
            context: "clCreateCommandQueueWithProperties",
        };
        dbg!(&e);
        assert_eq!(
            e.to_string(),
            "OpenCL 2.0 required for clCreateCommandQueueWithProperties, but system only supports OpenCL 1.2"
        );
    }
}
