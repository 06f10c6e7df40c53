//! Contexts
//!
//! A context groups one or more devices from the same platform, and owns the
//! memory objects, programs and queues created for them.

use crate::device::Device;
use crate::platform::Platform;
use crate::raw::{
    cl_context, cl_context_info, cl_context_properties, cl_device_id, cl_int, cl_uint, InfoTable,
    CONTEXT_INFO, CL_CONTEXT_PLATFORM, CL_SUCCESS,
};
use crate::util::{api, properties_list, properties_pairs, ContextKind, Handle, OclInfoInternal};
use crate::{Error, Result};
use libc::size_t;
use std::ffi::c_void;
use std::ptr::null_mut;

/// An OpenCL context
#[derive(PartialEq, Eq, Hash)]
pub struct Context(pub(crate) Handle<ContextKind>);

unsafe impl Sync for Context {}

info_debug!(Context);

impl OclInfoInternal for Context {
    type Param = cl_context_info;
    const DEBUG_CONTEXT: &'static str = "clGetContextInfo";

    fn info_table() -> &'static InfoTable<cl_context_info> {
        &CONTEXT_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetContextInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Context {
    /// Create a context for the given devices, which must all belong to the
    /// same platform.
    pub fn new(devices: &[Device]) -> Result<Self> {
        let first = devices.first().ok_or_else(|| {
            Error::InvalidArgument("a context needs at least one device".to_string())
        })?;

        let props = properties_list(&[(
            CL_CONTEXT_PLATFORM,
            first.platform_id()? as cl_context_properties,
        )]);
        let ids: Vec<cl_device_id> = devices.iter().map(|d| d.raw()).collect();
        let api = api()?;

        unsafe {
            let mut err = CL_SUCCESS;

            let id = api.CL10.clCreateContext(
                props.as_ptr(),
                ids.len() as cl_uint,
                ids.as_ptr(),
                None,
                null_mut(),
                &mut err,
            );

            wrap_result!("clCreateContext" => err)?;
            Ok(Context(Handle::from_raw(id)))
        }
    }

    /// Get the raw handle for this context
    pub fn raw(&self) -> cl_context {
        self.0.raw()
    }

    /// Wrap the given raw context handle, taking ownership of one reference
    ///
    /// # Safety
    ///
    /// The handle must be a valid OpenCL context whose reference is owned by
    /// the caller.
    pub unsafe fn from_raw(handle: cl_context) -> Self {
        Context(Handle::from_raw(handle))
    }

    /// Create another reference to this context
    pub fn try_clone(&self) -> Result<Self> {
        self.0.try_clone().map(Context)
    }

    info_funcs! {
        pub fn reference_count(&self) -> cl_uint = CL_CONTEXT_REFERENCE_COUNT;
        pub fn num_devices(&self) -> cl_uint = CL_CONTEXT_NUM_DEVICES;
        pub fn device_ids(&self) -> Vec<cl_device_id> = CL_CONTEXT_DEVICES;
        pub fn raw_properties(&self) -> Vec<cl_context_properties> = CL_CONTEXT_PROPERTIES;
    }

    /// Get the devices in this context
    pub fn devices(&self) -> Result<Vec<Device>> {
        Ok(self.device_ids()?.into_iter().map(Device).collect())
    }

    /// Get the properties this context was created with, as key/value pairs
    pub fn properties(&self) -> Result<Vec<(cl_context_properties, cl_context_properties)>> {
        Ok(properties_pairs(&self.raw_properties()?))
    }

    /// Get the platform of this context's devices
    pub fn platform(&self) -> Result<Platform> {
        let from_props = self
            .properties()?
            .into_iter()
            .find(|(k, _)| *k == CL_CONTEXT_PLATFORM)
            .map(|(_, v)| Platform(v as _));

        match from_props {
            Some(platform) => Ok(platform),
            None => self
                .devices()?
                .first()
                .ok_or_else(|| Error::InvalidArgument("context has no devices".to_string()))?
                .platform(),
        }
    }
}
