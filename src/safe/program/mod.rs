//! Programs
//!
//! In OpenCL, a `Program` exports kernels that can be executed to perform work
//! on specialized hardware.

mod types;

use crate::context::Context;
use crate::device::Device;
use crate::raw::*;
use crate::util::{api, Handle, OclInfoInternal, ProgramKind};
use crate::{Error, Result};
use libc::size_t;
use std::ffi::{c_void, CString};
use std::fmt::{self, Debug, Formatter};
use std::mem::size_of;
use std::ptr::null_mut;
pub use types::*;

/// An OpenCL program
#[derive(PartialEq, Eq, Hash)]
pub struct Program(pub(crate) Handle<ProgramKind>);

unsafe impl Sync for Program {}

info_debug!(Program);

impl OclInfoInternal for Program {
    type Param = cl_program_info;
    const DEBUG_CONTEXT: &'static str = "clGetProgramInfo";

    fn info_table() -> &'static InfoTable<cl_program_info> {
        &PROGRAM_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetProgramInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Program {
    /// Get the raw handle for this program. The handle stays valid for as long
    /// as this `Program` exists.
    pub fn raw(&self) -> cl_program {
        self.0.raw()
    }

    /// Wrap the given raw program handle, taking ownership of one reference
    ///
    /// # Safety
    ///
    /// The handle must be a valid OpenCL program whose reference is owned by
    /// the caller.
    pub unsafe fn from_raw(handle: cl_program) -> Self {
        Program(Handle::from_raw(handle))
    }

    /// Create another reference to this program, using `clRetainProgram`
    pub fn try_clone(&self) -> Result<Self> {
        self.0.try_clone().map(Program)
    }

    info_funcs! {
        pub fn reference_count(&self) -> cl_uint = CL_PROGRAM_REFERENCE_COUNT;
        pub fn context_raw(&self) -> cl_context = CL_PROGRAM_CONTEXT;
        pub fn num_devices(&self) -> cl_uint = CL_PROGRAM_NUM_DEVICES;
        pub fn device_ids(&self) -> Vec<cl_device_id> = CL_PROGRAM_DEVICES;
        pub fn source(&self) -> CString = CL_PROGRAM_SOURCE;
        pub fn binary_sizes(&self) -> Vec<size_t> = CL_PROGRAM_BINARY_SIZES;
        pub fn num_kernels(&self) -> size_t = CL_PROGRAM_NUM_KERNELS;
        pub fn kernel_names_raw(&self) -> CString = CL_PROGRAM_KERNEL_NAMES;
        pub fn il(&self) -> Vec<u8> = CL_PROGRAM_IL;
    }

    /// Get the context this program was created in
    pub fn context(&self) -> Result<Context> {
        unsafe { Handle::retain_raw(self.context_raw()?).map(Context) }
    }

    /// Get the devices this program is associated with
    pub fn devices(&self) -> Result<Vec<Device>> {
        Ok(self.device_ids()?.into_iter().map(Device).collect())
    }

    /// Get the names of every kernel in this program
    pub fn kernel_names(&self) -> Result<Vec<String>> {
        Ok(split_kernel_names(
            &self.kernel_names_raw()?.to_string_lossy(),
        ))
    }

    /// Get the compiled binary for each device, in the same order as
    /// `devices`. Devices without a binary get an empty vector.
    pub fn binaries(&self) -> Result<Vec<Vec<u8>>> {
        let mut binaries: Vec<Vec<u8>> = self
            .binary_sizes()?
            .into_iter()
            .map(|size| vec![0; size])
            .collect();

        let mut ptrs: Vec<*mut u8> = binaries
            .iter_mut()
            .map(|b| {
                if b.is_empty() {
                    null_mut()
                } else {
                    b.as_mut_ptr()
                }
            })
            .collect();

        unsafe {
            wrap_result!(Self::DEBUG_CONTEXT => self.raw_info_internal(
                CL_PROGRAM_BINARIES,
                ptrs.len() * size_of::<*mut u8>(),
                ptrs.as_mut_ptr() as _,
                null_mut()
            )?)?;
        }

        Ok(binaries)
    }

    /// Get program build info for a given device, which must be one of this
    /// program's devices
    pub fn build_info(&self, device: Device) -> Result<ProgramBuildInfo> {
        if !self.device_ids()?.contains(&device.raw()) {
            return Err(Error::InvalidArgument(
                "program is not associated with the given device".to_string(),
            ));
        }

        Ok(ProgramBuildInfo {
            device,
            program: self,
        })
    }

    /// Concatenate the build logs of every device of this program
    pub(crate) fn build_log(&self) -> Result<String> {
        let mut logs = Vec::new();

        for device in self.devices()? {
            let log = self.build_info(device)?.log()?;
            let log = log.to_string_lossy();

            if !log.trim().is_empty() {
                logs.push(log.trim_end().to_string());
            }
        }

        Ok(logs.join("\n"))
    }
}

/// Build information for a program on one of its devices
pub struct ProgramBuildInfo<'a> {
    device: Device,
    program: &'a Program,
}

impl OclInfoInternal for ProgramBuildInfo<'_> {
    type Param = cl_program_build_info;
    const DEBUG_CONTEXT: &'static str = "clGetProgramBuildInfo";

    fn info_table() -> &'static InfoTable<cl_program_build_info> {
        &PROGRAM_BUILD_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetProgramBuildInfo(
            self.program.raw(),
            self.device.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl ProgramBuildInfo<'_> {
    pub fn device(&self) -> Device {
        self.device
    }

    info_funcs! {
        pub fn status(&self) -> BuildStatus = CL_PROGRAM_BUILD_STATUS;
        pub fn options(&self) -> CString = CL_PROGRAM_BUILD_OPTIONS;
        pub fn log(&self) -> CString = CL_PROGRAM_BUILD_LOG;
        pub fn binary_type(&self) -> ProgramBinaryType = CL_PROGRAM_BINARY_TYPE;
        pub fn global_variable_total_size(&self) -> size_t = CL_PROGRAM_BUILD_GLOBAL_VARIABLE_TOTAL_SIZE;
    }
}

impl Debug for ProgramBuildInfo<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        crate::util::OclInfo::info_fmt(self, f)
    }
}

fn split_kernel_names(names: &str) -> Vec<String> {
    names
        .split(';')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_kernel_names() {
        assert_eq!(
            dbg!(split_kernel_names("add;mul;reduce_sum")),
            vec!["add", "mul", "reduce_sum"]
        );
        assert_eq!(split_kernel_names("single"), vec!["single"]);
        assert!(split_kernel_names("").is_empty());
        assert_eq!(split_kernel_names("a;;b;"), vec!["a", "b"]);
    }
}
