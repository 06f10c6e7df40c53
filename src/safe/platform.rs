//! Platforms
//!
//! An OpenCL platform is an OpenCL driver providing access to specialized
//! hardware. A system can have zero or more platforms, and each platform can
//! provide zero or more devices.

use crate::device::{Device, DeviceType};
use crate::raw::{
    cl_int, cl_platform_id, cl_platform_info, cl_uint, cl_ulong, InfoTable, CL_DEVICE_NOT_FOUND,
    PLATFORM_INFO,
};
use crate::util::{api, OclInfoInternal};
use crate::Result;
use libc::size_t;
use std::ffi::c_void;
use std::ffi::CString;
use std::ptr::null_mut;

/// An OpenCL platform
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform(pub(crate) cl_platform_id);

unsafe impl Send for Platform {}
unsafe impl Sync for Platform {}

info_debug!(Platform);

impl OclInfoInternal for Platform {
    type Param = cl_platform_info;
    const DEBUG_CONTEXT: &'static str = "clGetPlatformInfo";

    fn info_table() -> &'static InfoTable<cl_platform_info> {
        &PLATFORM_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetPlatformInfo(
            self.0,
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Platform {
    /// Get a list of OpenCL platforms available on this system.
    pub fn get_platforms() -> Result<Vec<Platform>> {
        let api = api()?;

        unsafe {
            let mut num_platforms: cl_uint = 0;

            wrap_result!("clGetPlatformIDs" => api.CL10.clGetPlatformIDs(
                0,
                null_mut(),
                &mut num_platforms as _
            ))?;

            if num_platforms == 0 {
                return Ok(vec![]);
            }

            let mut ids = vec![null_mut(); num_platforms as usize];

            wrap_result!("clGetPlatformIDs" => api.CL10.clGetPlatformIDs(
                num_platforms,
                ids.as_mut_ptr(),
                &mut num_platforms as _,
            ))?;

            ids.truncate(num_platforms as usize);

            Ok(ids.into_iter().map(Platform).collect())
        }
    }

    /// Get a list of OpenCL devices of the given type from this platform.
    ///
    /// A platform with no matching devices produces an empty list rather than
    /// an error.
    pub fn get_devices(self, typ: DeviceType) -> Result<Vec<Device>> {
        let api = api()?;

        unsafe {
            let mut num_devices: cl_uint = 0;

            match api.CL10.clGetDeviceIDs(self.0, typ.raw(), 0, null_mut(), &mut num_devices) {
                CL_DEVICE_NOT_FOUND => return Ok(vec![]),
                code => wrap_result!("clGetDeviceIDs" => code)?,
            }

            if num_devices == 0 {
                return Ok(vec![]);
            }

            let mut ids = vec![null_mut(); num_devices as usize];

            wrap_result!("clGetDeviceIDs" => api.CL10.clGetDeviceIDs(
                self.0,
                typ.raw(),
                num_devices,
                ids.as_mut_ptr(),
                &mut num_devices as _,
            ))?;

            ids.truncate(num_devices as usize);

            Ok(ids.into_iter().map(Device).collect())
        }
    }

    /// Get the raw handle for this platform
    pub fn raw(self) -> cl_platform_id {
        self.0
    }

    /// Wrap the given raw platform handle
    ///
    /// # Safety
    ///
    /// If the given handle is not a valid OpenCL platform ID, behavior is
    /// undefined.
    pub unsafe fn from_raw(handle: cl_platform_id) -> Self {
        Self(handle)
    }

    info_funcs! {
        pub fn profile(&self) -> CString = CL_PLATFORM_PROFILE;
        pub fn version(&self) -> CString = CL_PLATFORM_VERSION;
        pub fn name(&self) -> CString = CL_PLATFORM_NAME;
        pub fn vendor(&self) -> CString = CL_PLATFORM_VENDOR;
        pub fn extensions(&self) -> CString = CL_PLATFORM_EXTENSIONS;
        pub fn host_timer_resolution(&self) -> cl_ulong = CL_PLATFORM_HOST_TIMER_RESOLUTION;
    }

    /// Check whether this platform advertises the given extension
    pub fn has_extension(self, name: &str) -> Result<bool> {
        Ok(self
            .extensions()?
            .to_string_lossy()
            .split_whitespace()
            .any(|e| e == name))
    }

    /// Unload the OpenCL C program compiler for this platform.
    pub fn unload_compiler(self) -> Result<()> {
        let cl12 = api_since!("clUnloadPlatformCompiler" => CL12)?;

        unsafe {
            wrap_result!("clUnloadPlatformCompiler" => cl12.clUnloadPlatformCompiler(self.raw()))
        }
    }
}
