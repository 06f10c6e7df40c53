use crate::context::Context;
use crate::program::Program;
use crate::raw::*;
use crate::util::api;
use crate::{ApiError, Error, Result};
use sealed::ProgramBuilderTypeInternal;
use std::borrow::Cow;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr::{null, null_mut};

mod sealed {
    use super::ProgramBuilder;
    use crate::program::ProgramBuilderType;
    use crate::raw::{cl_int, cl_program, RawOpenCL};

    pub trait ProgramBuilderTypeInternal {
        const CONTEXT: &'static str;

        unsafe fn create_program(
            builder: &ProgramBuilder<Self>,
            api: &RawOpenCL,
            err: *mut cl_int,
        ) -> cl_program
        where
            Self: Sized + ProgramBuilderType;
    }
}

/// A program builder type, specifying how a program should be built (e.g.
/// compiled from source code, loaded from a binary, etc)
pub trait ProgramBuilderType: sealed::ProgramBuilderTypeInternal {}

/// A `ProgramBuilderType` implementation for programs to be compiled from
/// source
pub enum FromSource<'a> {
    /// Build the program from a single source file
    Single(&'a [u8]),
    /// Build the program from several source files, compiled together
    Multiple(Vec<&'a [u8]>),
}

impl<'a> ProgramBuilderTypeInternal for FromSource<'a> {
    const CONTEXT: &'static str = "clCreateProgramWithSource";

    unsafe fn create_program(
        builder: &ProgramBuilder<Self>,
        api: &RawOpenCL,
        err: *mut cl_int,
    ) -> cl_program {
        let sources = match &builder.ty {
            FromSource::Single(src) => vec![*src],
            FromSource::Multiple(srcs) => srcs.clone(),
        };

        let ptrs: Vec<*const c_char> = sources.iter().map(|s| s.as_ptr() as _).collect();
        let lens: Vec<usize> = sources.iter().map(|s| s.len()).collect();

        api.CL10.clCreateProgramWithSource(
            builder.ctx.raw(),
            ptrs.len() as cl_uint,
            ptrs.as_ptr(),
            lens.as_ptr(),
            err,
        )
    }
}

impl<'a> ProgramBuilderType for FromSource<'a> {}

/// A partially built OpenCL program
#[must_use]
pub struct ProgramBuilder<'a, T: ProgramBuilderType> {
    ctx: &'a Context,
    ty: T,
    opts: Option<Cow<'a, str>>,
}

impl<'a> ProgramBuilder<'a, FromSource<'a>> {
    /// Begin building a program with a single source file
    pub fn with_source(ctx: &'a Context, src: &'a impl AsRef<[u8]>) -> Self {
        Self {
            ctx,
            ty: FromSource::Single(src.as_ref()),
            opts: None,
        }
    }

    /// Begin building a program from several source files
    pub fn with_sources<S: AsRef<[u8]>>(ctx: &'a Context, srcs: &'a [S]) -> Self {
        Self {
            ctx,
            ty: FromSource::Multiple(srcs.iter().map(|s| s.as_ref()).collect()),
            opts: None,
        }
    }
}

impl<'a, T: ProgramBuilderType> ProgramBuilder<'a, T> {
    /// Append an option to be passed to the compiler
    pub fn opt(&mut self, opts: impl Into<Cow<'a, str>>) -> &mut Self {
        match &mut self.opts {
            Some(old) => {
                *old += " ";
                *old += opts.into();
            }
            o => *o = Some(opts.into()),
        };
        self
    }

    /// The options passed to the compiler so far, separated by spaces
    pub fn options(&self) -> Option<&str> {
        self.opts.as_deref()
    }

    /// Build the program for every device in the context.
    ///
    /// If compilation fails, `Error::BuildFailed` is returned with the build
    /// log of each device.
    pub fn build(&self) -> Result<Program> {
        let opts = self.opts.as_deref().map(CString::new).transpose()?;
        let api = api()?;

        let program = unsafe {
            let mut err = CL_SUCCESS;
            let raw = T::create_program(self, api, &mut err);
            wrap_result!(T::CONTEXT => err)?;
            Program::from_raw(raw)
        };

        let status = unsafe {
            api.CL10.clBuildProgram(
                program.raw(),
                0,
                null(),
                opts.as_ref().map_or(null(), |o| o.as_ptr()),
                None,
                null_mut(),
            )
        };

        if status == CL_BUILD_PROGRAM_FAILURE {
            let log = program
                .build_log()
                .unwrap_or_else(|e| format!("<build log unavailable: {}>", e));

            return Err(Error::BuildFailed {
                error: ApiError::new(status, "clBuildProgram"),
                log,
            });
        }

        wrap_result!("clBuildProgram" => status)?;
        Ok(program)
    }
}

impl Context {
    /// Begin building a program for this context from a single source file
    pub fn program_with_source<'a>(
        &'a self,
        src: &'a impl AsRef<[u8]>,
    ) -> ProgramBuilder<'a, FromSource<'a>> {
        ProgramBuilder::with_source(self, src)
    }
}

flag_enum! {
    /// The build status of a program on a device
    pub enum BuildStatus(cl_build_status) {
        None = CL_BUILD_NONE,
        InProgress = CL_BUILD_IN_PROGRESS,
        Success = CL_BUILD_SUCCESS,
        Error = CL_BUILD_ERROR,
    }
}

flag_enum! {
    pub enum ProgramBinaryType(cl_program_binary_type) {
        None = CL_PROGRAM_BINARY_TYPE_NONE,
        CompiledObject = CL_PROGRAM_BINARY_TYPE_COMPILED_OBJECT,
        Library = CL_PROGRAM_BINARY_TYPE_LIBRARY,
        Executable = CL_PROGRAM_BINARY_TYPE_EXECUTABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_options_joined() {
        let ctx = unsafe { Context::from_raw(null_mut()) };
        let src = "kernel void noop() {}";

        {
            let mut builder = ProgramBuilder::with_source(&ctx, &src);
            assert_eq!(builder.options(), None);

            builder.opt("-cl-fast-relaxed-math").opt(String::from("-DN=4"));
            assert_eq!(
                dbg!(builder.options()),
                Some("-cl-fast-relaxed-math -DN=4")
            );

            match &builder.ty {
                FromSource::Single(s) => assert_eq!(*s, src.as_bytes()),
                FromSource::Multiple(_) => panic!("expected a single source"),
            }
        }

        {
            let srcs = ["kernel void a() {}", "kernel void b() {}"];
            let builder = ProgramBuilder::with_sources(&ctx, &srcs);

            match &builder.ty {
                FromSource::Multiple(s) => assert_eq!(s.len(), 2),
                FromSource::Single(_) => panic!("expected multiple sources"),
            }
        }

        std::mem::forget(ctx);
    }

    #[test]
    fn test_options_with_nul_rejected() {
        let ctx = unsafe { Context::from_raw(null_mut()) };
        let src = "";

        {
            let mut builder = ProgramBuilder::with_source(&ctx, &src);
            builder.opt("-D\0");

            match builder.build() {
                Err(Error::Nul(_)) => {}
                other => panic!("unexpected result: {:?}", other.map(|_| ())),
            }
        }

        std::mem::forget(ctx);
    }

    #[test]
    fn test_build_status() {
        assert_eq!(
            BuildStatus::try_from(CL_BUILD_IN_PROGRESS).unwrap(),
            BuildStatus::InProgress
        );
        assert_eq!(BuildStatus::Error.raw(), -2);
        assert!(ProgramBinaryType::try_from(3).is_err());
    }
}
