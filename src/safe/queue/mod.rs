//! Command queues
//!
//! Memory transfers and kernel executions are submitted to a device through a
//! queue, using the builder-style `BufferCmd` and `KernelCmd` types.

mod types;

use crate::buffer::flags::HostAccess;
use crate::buffer::{Buffer, MemSafe};
use crate::context::Context;
use crate::device::Device;
use crate::event::{raw_wait_list, wait_list_ptr, Event};
use crate::kernel::Kernel;
use crate::raw::*;
use crate::util::{api, Handle, OclInfoInternal, QueueKind};
use crate::Result;
use libc::size_t;
use std::ffi::c_void;
use std::ptr::null_mut;
pub use types::*;

/// An OpenCL command queue
#[derive(PartialEq, Eq, Hash)]
pub struct Queue(pub(crate) Handle<QueueKind>);

unsafe impl Sync for Queue {}

info_debug!(Queue);

impl OclInfoInternal for Queue {
    type Param = cl_command_queue_info;
    const DEBUG_CONTEXT: &'static str = "clGetCommandQueueInfo";

    fn info_table() -> &'static InfoTable<cl_command_queue_info> {
        &COMMAND_QUEUE_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetCommandQueueInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Queue {
    /// Get the raw handle for this queue
    pub fn raw(&self) -> cl_command_queue {
        self.0.raw()
    }

    /// Wrap the given raw queue handle, taking ownership of one reference
    ///
    /// # Safety
    ///
    /// The handle must be a valid OpenCL command queue whose reference is owned
    /// by the caller.
    pub unsafe fn from_raw(handle: cl_command_queue) -> Self {
        Queue(Handle::from_raw(handle))
    }

    pub fn try_clone(&self) -> Result<Self> {
        self.0.try_clone().map(Queue)
    }

    info_funcs! {
        pub fn context_raw(&self) -> cl_context = CL_QUEUE_CONTEXT;
        pub fn device_raw(&self) -> cl_device_id = CL_QUEUE_DEVICE;
        pub fn reference_count(&self) -> cl_uint = CL_QUEUE_REFERENCE_COUNT;
        pub fn properties(&self) -> QueueProperties = CL_QUEUE_PROPERTIES;
        pub fn size(&self) -> cl_uint = CL_QUEUE_SIZE;
        pub fn device_default_raw(&self) -> cl_command_queue = CL_QUEUE_DEVICE_DEFAULT;
    }

    /// Get the context this queue was created in
    pub fn context(&self) -> Result<Context> {
        unsafe { Handle::retain_raw(self.context_raw()?).map(Context) }
    }

    /// Get the device this queue submits commands to
    pub fn device(&self) -> Result<Device> {
        self.device_raw().map(Device)
    }

    /// Get the default on-device queue for this queue's device, if any
    pub fn device_default(&self) -> Result<Option<Queue>> {
        let raw = self.device_default_raw()?;

        if raw.is_null() {
            return Ok(None);
        }

        unsafe { Handle::retain_raw(raw).map(|h| Some(Queue(h))) }
    }

    /// Start a memory command on the given buffer
    pub fn buffer_cmd<'q, 'b, 'a, 'w, H: HostAccess, T: MemSafe>(
        &'q self,
        buffer: &'b Buffer<'a, H, T>,
    ) -> BufferCmd<'q, 'b, 'a, 'w, H, T> {
        BufferCmd {
            queue: self,
            buffer,
            offset: None,
            wait_list: Vec::new(),
        }
    }

    /// Start an execution command for the given kernel
    pub fn kernel_cmd<'q, 'k, 'w>(&'q self, kernel: &'k Kernel) -> KernelCmd<'q, 'k, 'w> {
        KernelCmd {
            queue: self,
            kernel,
            global_offset: None,
            local_size: None,
            wait_list: Vec::new(),
        }
    }

    /// Enqueue a marker which completes once the given events have finished,
    /// or once every previously enqueued command has finished if the list is
    /// empty.
    pub fn marker(&self, wait_for: &[&Event]) -> Result<Event> {
        let cl12 = api_since!("clEnqueueMarkerWithWaitList" => CL12)?;
        let list = raw_wait_list(wait_for);

        unsafe {
            let mut event = null_mut();

            wrap_result!("clEnqueueMarkerWithWaitList" => cl12.clEnqueueMarkerWithWaitList(
                self.raw(),
                list.len() as cl_uint,
                wait_list_ptr(&list),
                &mut event
            ))?;

            Ok(Event::from_raw(event))
        }
    }

    /// Submit every queued command to the device
    pub fn flush(&self) -> Result<()> {
        let api = api()?;
        unsafe { wrap_result!("clFlush" => api.CL10.clFlush(self.raw())) }
    }

    /// Block until every queued command has finished
    pub fn finish(&self) -> Result<()> {
        let api = api()?;
        unsafe { wrap_result!("clFinish" => api.CL10.clFinish(self.raw())) }
    }
}

impl Context {
    /// Start building a command queue for the given device in this context
    pub fn queue_builder<'c, 'd>(&'c self, device: &'d Device) -> QueueBuilder<'c, 'd> {
        QueueBuilder::new(self, device)
    }
}
