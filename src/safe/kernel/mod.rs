//! Kernels
//!
//! A `Kernel` is a single function exported by a built `Program`, together
//! with the arguments currently assigned to it.

mod types;

use crate::context::Context;
use crate::device::Device;
use crate::program::Program;
use crate::raw::*;
use crate::util::{api, Handle, HandleKind, KernelKind, MemKind, OclInfoInternal};
use crate::{Error, Result};
use libc::size_t;
use std::collections::HashMap;
use std::ffi::{c_void, CString};
pub use types::*;

/// An OpenCL kernel.
///
/// Every buffer assigned as an argument is retained by the kernel until the
/// argument is replaced or the kernel is dropped. Kernels may be sent between
/// threads but not shared, since `clSetKernelArg` isn't thread safe.
pub struct Kernel {
    handle: Handle<KernelKind>,
    bound: BoundArgs<MemKind>,
}

/// References held on behalf of a kernel's arguments, by argument index
struct BoundArgs<K: HandleKind>(HashMap<cl_uint, Handle<K>>);

impl<K: HandleKind> BoundArgs<K> {
    fn new() -> Self {
        BoundArgs(HashMap::new())
    }

    /// Assign argument `index` using `set`, then hold a reference to `handle`
    /// in place of whatever the argument held before. Nothing changes if
    /// `set` fails.
    fn assign<F>(&mut self, index: cl_uint, handle: Option<&Handle<K>>, set: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let retained = handle.map(Handle::try_clone).transpose()?;
        set()?;

        match retained {
            Some(handle) => self.0.insert(index, handle),
            None => self.0.remove(&index),
        };

        Ok(())
    }
}

info_debug!(Kernel);

impl OclInfoInternal for Kernel {
    type Param = cl_kernel_info;
    const DEBUG_CONTEXT: &'static str = "clGetKernelInfo";

    fn info_table() -> &'static InfoTable<cl_kernel_info> {
        &KERNEL_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetKernelInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Kernel {
    pub fn raw(&self) -> cl_kernel {
        self.handle.raw()
    }

    /// Wrap the given raw kernel handle, taking ownership of one reference.
    ///
    /// # Safety
    ///
    /// The handle must be a valid OpenCL kernel whose reference is owned by
    /// the caller. Arguments set before wrapping aren't tracked, so buffers
    /// assigned to them must be kept alive separately.
    pub unsafe fn from_raw(handle: cl_kernel) -> Self {
        Self {
            handle: Handle::from_raw(handle),
            bound: BoundArgs::new(),
        }
    }

    info_funcs! {
        pub fn function_name(&self) -> CString = CL_KERNEL_FUNCTION_NAME;
        pub fn num_args(&self) -> cl_uint = CL_KERNEL_NUM_ARGS;
        pub fn reference_count(&self) -> cl_uint = CL_KERNEL_REFERENCE_COUNT;
        pub fn context_raw(&self) -> cl_context = CL_KERNEL_CONTEXT;
        pub fn program_raw(&self) -> cl_program = CL_KERNEL_PROGRAM;
        pub fn attributes(&self) -> CString = CL_KERNEL_ATTRIBUTES;
    }

    /// Get the context this kernel was created in
    pub fn context(&self) -> Result<Context> {
        unsafe { Handle::retain_raw(self.context_raw()?).map(Context) }
    }

    /// Get the program this kernel was created from
    pub fn program(&self) -> Result<Program> {
        unsafe { Handle::retain_raw(self.program_raw()?).map(Program) }
    }

    fn check_index(&self, index: cl_uint) -> Result<()> {
        let num_args = self.num_args()?;

        if index >= num_args {
            return Err(Error::InvalidArgument(format!(
                "argument index {} is out of range for kernel of arity {}",
                index, num_args
            )));
        }

        Ok(())
    }

    /// Get information about one of this kernel's arguments. Requires OpenCL
    /// 1.2, and a program built with `-cl-kernel-arg-info` on some platforms.
    pub fn arg_info(&self, index: cl_uint) -> Result<KernelArgInfo> {
        self.check_index(index)?;

        Ok(KernelArgInfo {
            kernel: self,
            index,
        })
    }

    /// Get information about this kernel specific to the given device
    pub fn work_group_info(&self, device: Device) -> KernelWorkGroupInfo {
        KernelWorkGroupInfo {
            kernel: self,
            device,
        }
    }

    /// Assign a kernel argument.
    ///
    /// When argument info is available, the OpenCL C type of the argument is
    /// checked against the Rust type, returning `Error::ArgTypeMismatch` if
    /// they don't match. The check only catches obvious mistakes and isn't a
    /// guarantee of correctness.
    pub fn set_arg<A: KernelArg>(&mut self, index: cl_uint, arg: &A) -> Result<()> {
        self.check_index(index)?;

        let check_types = crate::raw::functions::system_version()
            .map_or(false, |v| v >= OpenCLVersion::CL12);

        if check_types {
            match self.arg_info(index)?.type_name() {
                Ok(c_type) => check_arg_type::<A>(index, &c_type.to_string_lossy())?,
                Err(e) => log::warn!(
                    "Could not check type of argument #{} of kernel {:?}: {}",
                    index,
                    self.raw(),
                    e
                ),
            }
        }

        self.set_arg_unchecked(index, arg)
    }

    /// Assign a kernel argument without checking its type or index
    pub fn set_arg_unchecked<A: KernelArg>(&mut self, index: cl_uint, arg: &A) -> Result<()> {
        let api = api()?;
        let raw = self.raw();

        self.bound.assign(index, arg.mem_handle(), || unsafe {
            let (size, ptr) = arg.as_raw_kernel_arg();

            wrap_result!("clSetKernelArg" => api.CL10.clSetKernelArg(
                raw,
                index,
                size,
                ptr as *const c_void
            ))
        })
    }
}

impl Program {
    /// Create a kernel for the function with the given name
    pub fn create_kernel(&self, name: &str) -> Result<Kernel> {
        let name = CString::new(name)?;
        let api = api()?;

        unsafe {
            let mut err = CL_SUCCESS;
            let kernel = api.CL10.clCreateKernel(self.raw(), name.as_ptr(), &mut err);
            wrap_result!("clCreateKernel" => err)?;
            Ok(Kernel::from_raw(kernel))
        }
    }
}

fn check_arg_type<A: KernelArg>(index: cl_uint, c_type: &str) -> Result<()> {
    if A::is_param_type_compatible(c_type) {
        Ok(())
    } else {
        Err(Error::ArgTypeMismatch {
            index,
            c_type: c_type.to_string(),
            rust_type: tynm::type_name::<A>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::flags::HostReadWrite;
    use crate::buffer::Buffer;
    use crate::ApiError;

    #[test]
    fn test_bound_args_hold_references() {
        use crate::util::fake_handles::{counts, FakeKind, BROKEN};

        let mut bound = BoundArgs::<FakeKind>::new();
        let first = unsafe { Handle::<FakeKind>::from_raw(101) };
        let second = unsafe { Handle::<FakeKind>::from_raw(102) };

        bound.assign(0, Some(&first), || Ok(())).unwrap();
        assert_eq!(counts(101), (1, 0));

        // replacing an argument releases the reference held for the old one
        bound.assign(0, Some(&second), || Ok(())).unwrap();
        assert_eq!(counts(101), (1, 1));
        assert_eq!(counts(102), (1, 0));

        // a failed assignment leaves the held reference alone
        let err = bound
            .assign(0, Some(&first), || {
                Err(ApiError::new(CL_INVALID_ARG_VALUE, "clSetKernelArg").into())
            })
            .unwrap_err();
        assert_eq!(dbg!(err).api_error().unwrap().code(), CL_INVALID_ARG_VALUE);
        assert_eq!(counts(101), (2, 2));
        assert_eq!(counts(102), (1, 0));

        // overwriting with a plain value drops the reference
        bound.assign(0, None, || Ok(())).unwrap();
        assert_eq!(counts(102), (1, 1));

        bound.assign(1, Some(&first), || Ok(())).unwrap();
        bound.assign(2, Some(&second), || Ok(())).unwrap();
        assert_eq!(counts(101), (3, 2));
        assert_eq!(counts(102), (2, 1));

        // a handle which can't be retained is never assigned
        let broken = unsafe { Handle::<FakeKind>::from_raw(BROKEN) };
        let mut called = false;
        assert!(bound
            .assign(3, Some(&broken), || {
                called = true;
                Ok(())
            })
            .is_err());
        assert!(!called);
        std::mem::forget(broken);

        drop(bound);
        assert_eq!(counts(101), (3, 3));
        assert_eq!(counts(102), (2, 2));

        drop(first);
        drop(second);
        assert_eq!(counts(101), (3, 4));
        assert_eq!(counts(102), (2, 3));
    }

    #[test]
    fn test_check_arg_type() {
        assert!(check_arg_type::<cl_float>(0, "float").is_ok());
        assert!(check_arg_type::<Buffer<'static, HostReadWrite, cl_int>>(1, "int*").is_ok());
        assert!(check_arg_type::<LocalMemory<cl_uchar>>(2, "uchar*").is_ok());

        match check_arg_type::<cl_uint>(3, "float") {
            Err(Error::ArgTypeMismatch {
                index,
                c_type,
                rust_type,
            }) => {
                assert_eq!(index, 3);
                assert_eq!(c_type, "float");
                assert_eq!(dbg!(rust_type), "u32");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(check_arg_type::<Buffer<'static, HostReadWrite, cl_int>>(0, "int").is_err());
    }
}
