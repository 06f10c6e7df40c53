//! Dynamically loaded OpenCL entry points.
//!
//! Entry points are grouped by the OpenCL version that introduced them. The
//! 1.0 group must resolve for the library to load at all; later groups are
//! optional, and the highest contiguous group that resolved determines the
//! version reported by [`load_opencl`].

#![allow(non_snake_case)]

use crate::raw::types::*;
use crate::raw::OpenCLVersion;
use dlopen::wrapper::Container;
use lazy_static::lazy_static;
use libc::size_t;
use std::env;
use std::ffi::OsString;
use std::io;
use std::os::raw::{c_char, c_void};

/// Environment variable naming an OpenCL library to load instead of the
/// platform default.
pub const LIBRARY_ENV_VAR: &str = "OCL_QUERY_LIBRARY";

#[cfg(target_os = "windows")]
const DEFAULT_LIBRARIES: &[&str] = &["OpenCL.dll"];

#[cfg(target_os = "macos")]
const DEFAULT_LIBRARIES: &[&str] = &["/System/Library/Frameworks/OpenCL.framework/OpenCL"];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const DEFAULT_LIBRARIES: &[&str] = &["libOpenCL.so.1", "libOpenCL.so"];

raw_functions! {
    CL10: CL10 {
        fn clGetPlatformIDs(
            num_entries: cl_uint,
            platforms: *mut cl_platform_id,
            num_platforms: *mut cl_uint,
        ) -> cl_int;
        fn clGetPlatformInfo(
            platform: cl_platform_id,
            param_name: cl_platform_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clGetDeviceIDs(
            platform: cl_platform_id,
            device_type: cl_device_type,
            num_entries: cl_uint,
            devices: *mut cl_device_id,
            num_devices: *mut cl_uint,
        ) -> cl_int;
        fn clGetDeviceInfo(
            device: cl_device_id,
            param_name: cl_device_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clCreateContext(
            properties: *const cl_context_properties,
            num_devices: cl_uint,
            devices: *const cl_device_id,
            pfn_notify: cl_context_notify_fn,
            user_data: *mut c_void,
            errcode_ret: *mut cl_int,
        ) -> cl_context;
        fn clRetainContext(context: cl_context) -> cl_int;
        fn clReleaseContext(context: cl_context) -> cl_int;
        fn clGetContextInfo(
            context: cl_context,
            param_name: cl_context_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clCreateCommandQueue(
            context: cl_context,
            device: cl_device_id,
            properties: cl_command_queue_properties,
            errcode_ret: *mut cl_int,
        ) -> cl_command_queue;
        fn clRetainCommandQueue(command_queue: cl_command_queue) -> cl_int;
        fn clReleaseCommandQueue(command_queue: cl_command_queue) -> cl_int;
        fn clGetCommandQueueInfo(
            command_queue: cl_command_queue,
            param_name: cl_command_queue_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clCreateBuffer(
            context: cl_context,
            flags: cl_mem_flags,
            size: size_t,
            host_ptr: *mut c_void,
            errcode_ret: *mut cl_int,
        ) -> cl_mem;
        fn clRetainMemObject(memobj: cl_mem) -> cl_int;
        fn clReleaseMemObject(memobj: cl_mem) -> cl_int;
        fn clGetMemObjectInfo(
            memobj: cl_mem,
            param_name: cl_mem_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clCreateSampler(
            context: cl_context,
            normalized_coords: cl_bool,
            addressing_mode: cl_addressing_mode,
            filter_mode: cl_filter_mode,
            errcode_ret: *mut cl_int,
        ) -> cl_sampler;
        fn clRetainSampler(sampler: cl_sampler) -> cl_int;
        fn clReleaseSampler(sampler: cl_sampler) -> cl_int;
        fn clGetSamplerInfo(
            sampler: cl_sampler,
            param_name: cl_sampler_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clCreateProgramWithSource(
            context: cl_context,
            count: cl_uint,
            strings: *const *const c_char,
            lengths: *const size_t,
            errcode_ret: *mut cl_int,
        ) -> cl_program;
        fn clRetainProgram(program: cl_program) -> cl_int;
        fn clReleaseProgram(program: cl_program) -> cl_int;
        fn clBuildProgram(
            program: cl_program,
            num_devices: cl_uint,
            device_list: *const cl_device_id,
            options: *const c_char,
            pfn_notify: cl_program_notify_fn,
            user_data: *mut c_void,
        ) -> cl_int;
        fn clGetProgramInfo(
            program: cl_program,
            param_name: cl_program_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clGetProgramBuildInfo(
            program: cl_program,
            device: cl_device_id,
            param_name: cl_program_build_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clCreateKernel(
            program: cl_program,
            kernel_name: *const c_char,
            errcode_ret: *mut cl_int,
        ) -> cl_kernel;
        fn clRetainKernel(kernel: cl_kernel) -> cl_int;
        fn clReleaseKernel(kernel: cl_kernel) -> cl_int;
        fn clSetKernelArg(
            kernel: cl_kernel,
            arg_index: cl_uint,
            arg_size: size_t,
            arg_value: *const c_void,
        ) -> cl_int;
        fn clGetKernelInfo(
            kernel: cl_kernel,
            param_name: cl_kernel_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clGetKernelWorkGroupInfo(
            kernel: cl_kernel,
            device: cl_device_id,
            param_name: cl_kernel_work_group_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clWaitForEvents(num_events: cl_uint, event_list: *const cl_event) -> cl_int;
        fn clGetEventInfo(
            event: cl_event,
            param_name: cl_event_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clRetainEvent(event: cl_event) -> cl_int;
        fn clReleaseEvent(event: cl_event) -> cl_int;
        fn clGetEventProfilingInfo(
            event: cl_event,
            param_name: cl_profiling_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clFlush(command_queue: cl_command_queue) -> cl_int;
        fn clFinish(command_queue: cl_command_queue) -> cl_int;
        fn clEnqueueReadBuffer(
            command_queue: cl_command_queue,
            buffer: cl_mem,
            blocking_read: cl_bool,
            offset: size_t,
            size: size_t,
            ptr: *mut c_void,
            num_events_in_wait_list: cl_uint,
            event_wait_list: *const cl_event,
            event: *mut cl_event,
        ) -> cl_int;
        fn clEnqueueWriteBuffer(
            command_queue: cl_command_queue,
            buffer: cl_mem,
            blocking_write: cl_bool,
            offset: size_t,
            size: size_t,
            ptr: *const c_void,
            num_events_in_wait_list: cl_uint,
            event_wait_list: *const cl_event,
            event: *mut cl_event,
        ) -> cl_int;
        fn clEnqueueNDRangeKernel(
            command_queue: cl_command_queue,
            kernel: cl_kernel,
            work_dim: cl_uint,
            global_work_offset: *const size_t,
            global_work_size: *const size_t,
            local_work_size: *const size_t,
            num_events_in_wait_list: cl_uint,
            event_wait_list: *const cl_event,
            event: *mut cl_event,
        ) -> cl_int;
    }

    CL11: Option<CL11> {
        fn clCreateSubBuffer(
            buffer: cl_mem,
            flags: cl_mem_flags,
            buffer_create_type: cl_buffer_create_type,
            buffer_create_info: *const c_void,
            errcode_ret: *mut cl_int,
        ) -> cl_mem;
        fn clCreateUserEvent(context: cl_context, errcode_ret: *mut cl_int) -> cl_event;
        fn clSetUserEventStatus(event: cl_event, execution_status: cl_int) -> cl_int;
    }

    CL12: Option<CL12> {
        fn clCreateSubDevices(
            in_device: cl_device_id,
            properties: *const cl_device_partition_property,
            num_devices: cl_uint,
            out_devices: *mut cl_device_id,
            num_devices_ret: *mut cl_uint,
        ) -> cl_int;
        fn clRetainDevice(device: cl_device_id) -> cl_int;
        fn clReleaseDevice(device: cl_device_id) -> cl_int;
        fn clUnloadPlatformCompiler(platform: cl_platform_id) -> cl_int;
        fn clGetKernelArgInfo(
            kernel: cl_kernel,
            arg_indx: cl_uint,
            param_name: cl_kernel_arg_info,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> cl_int;
        fn clEnqueueFillBuffer(
            command_queue: cl_command_queue,
            buffer: cl_mem,
            pattern: *const c_void,
            pattern_size: size_t,
            offset: size_t,
            size: size_t,
            num_events_in_wait_list: cl_uint,
            event_wait_list: *const cl_event,
            event: *mut cl_event,
        ) -> cl_int;
        fn clEnqueueMarkerWithWaitList(
            command_queue: cl_command_queue,
            num_events_in_wait_list: cl_uint,
            event_wait_list: *const cl_event,
            event: *mut cl_event,
        ) -> cl_int;
    }

    CL20: Option<CL20> {
        fn clCreateCommandQueueWithProperties(
            context: cl_context,
            device: cl_device_id,
            properties: *const cl_queue_properties,
            errcode_ret: *mut cl_int,
        ) -> cl_command_queue;
        fn clCreateSamplerWithProperties(
            context: cl_context,
            sampler_properties: *const cl_sampler_properties,
            errcode_ret: *mut cl_int,
        ) -> cl_sampler;
    }

    CL21: Option<CL21> {
        fn clGetHostTimer(device: cl_device_id, host_timestamp: *mut cl_ulong) -> cl_int;
        fn clGetDeviceAndHostTimer(
            device: cl_device_id,
            device_timestamp: *mut cl_ulong,
            host_timestamp: *mut cl_ulong,
        ) -> cl_int;
    }
}

impl RawOpenCL {
    /// The highest OpenCL version for which this library provides every entry
    /// point, including those of all earlier versions.
    pub fn version(&self) -> OpenCLVersion {
        if self.CL11.is_none() {
            OpenCLVersion::CL10
        } else if self.CL12.is_none() {
            OpenCLVersion::CL11
        } else if self.CL20.is_none() {
            OpenCLVersion::CL12
        } else if self.CL21.is_none() {
            OpenCLVersion::CL20
        } else {
            OpenCLVersion::CL21
        }
    }
}

/// Candidate library names, in the order they should be tried.
fn library_candidates() -> Vec<OsString> {
    env::var_os(LIBRARY_ENV_VAR)
        .into_iter()
        .chain(DEFAULT_LIBRARIES.iter().map(OsString::from))
        .collect()
}

fn load_library() -> Result<(Container<RawOpenCL>, OpenCLVersion), dlopen::Error> {
    let mut last_err = None;

    for name in library_candidates() {
        match unsafe { Container::<RawOpenCL>::load(&name) } {
            Ok(container) => {
                let version = container.version();

                #[cfg(feature = "log")]
                log::debug!("Loaded OpenCL {} from {:?}", version, name);

                return Ok((container, version));
            }
            Err(e) => {
                #[cfg(feature = "log")]
                log::debug!("Couldn't load OpenCL from {:?}: {}", name, e);

                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        dlopen::Error::OpeningLibraryError(io::Error::new(
            io::ErrorKind::NotFound,
            "no OpenCL library candidates",
        ))
    }))
}

lazy_static! {
    static ref OPENCL: Result<(Container<RawOpenCL>, OpenCLVersion), dlopen::Error> =
        load_library();
}

/// Attempt to load the system OpenCL library, if not already loaded.
pub fn load_opencl() -> Result<OpenCLVersion, &'static dlopen::Error> {
    let loaded: &'static _ = &*OPENCL;
    loaded.as_ref().map(|(_, version)| *version)
}

/// Get the loaded entry points, loading the library first if necessary.
pub fn api() -> Result<&'static RawOpenCL, &'static dlopen::Error> {
    let loaded: &'static _ = &*OPENCL;
    loaded.as_ref().map(|(container, _)| &**container)
}

/// Get the version of the loaded OpenCL library, or `None` if it couldn't be
/// loaded.
pub fn system_version() -> Option<OpenCLVersion> {
    load_opencl().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_candidates_end_with_defaults() {
        let candidates = library_candidates();
        assert!(candidates.len() >= DEFAULT_LIBRARIES.len());

        let tail = &candidates[candidates.len() - DEFAULT_LIBRARIES.len()..];
        for (c, d) in tail.iter().zip(DEFAULT_LIBRARIES) {
            assert_eq!(c, &OsString::from(d));
        }
    }

    #[test]
    fn test_load_is_cached() {
        let first = load_opencl().map_err(|e| e as *const _);
        let second = load_opencl().map_err(|e| e as *const _);
        assert_eq!(dbg!(first), second);
    }
}
