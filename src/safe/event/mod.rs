//! Events
//!
//! Every enqueued command produces an event which can be waited on, used to
//! order other commands, or queried for profiling information.

mod types;

use crate::context::Context;
use crate::queue::Queue;
use crate::raw::{
    cl_command_queue, cl_context, cl_event, cl_event_info, cl_int, cl_profiling_info, cl_uint,
    InfoTable, OpenCLVersion, CL_COMPLETE, CL_PROFILING_COMMAND_COMPLETE,
    CL_PROFILING_COMMAND_END, CL_PROFILING_COMMAND_QUEUED, CL_PROFILING_COMMAND_START,
    CL_PROFILING_COMMAND_SUBMIT, CL_SUCCESS, EVENT_INFO, PROFILING_INFO,
};
use crate::util::{api, EventKind, Handle, OclInfo, OclInfoInternal};
use crate::{Error, Result};
use libc::size_t;
use std::ffi::c_void;
use std::fmt::{self, Debug, Formatter};
use std::ptr::null;
pub use types::*;

/// An OpenCL event
#[derive(PartialEq, Eq, Hash)]
pub struct Event(pub(crate) Handle<EventKind>);

unsafe impl Sync for Event {}

info_debug!(Event);

impl OclInfoInternal for Event {
    type Param = cl_event_info;
    const DEBUG_CONTEXT: &'static str = "clGetEventInfo";

    fn info_table() -> &'static InfoTable<cl_event_info> {
        &EVENT_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetEventInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

/// Raw handles for an event wait list
pub(crate) fn raw_wait_list(events: &[&Event]) -> Vec<cl_event> {
    events.iter().map(|e| e.raw()).collect()
}

/// The pointer OpenCL expects for a wait list: null when it's empty
pub(crate) fn wait_list_ptr(list: &[cl_event]) -> *const cl_event {
    if list.is_empty() {
        null()
    } else {
        list.as_ptr()
    }
}

impl Event {
    /// Get the raw handle for this event
    pub fn raw(&self) -> cl_event {
        self.0.raw()
    }

    /// Wrap the given raw event handle, taking ownership of one reference
    ///
    /// # Safety
    ///
    /// The handle must be a valid OpenCL event whose reference is owned by the
    /// caller.
    pub unsafe fn from_raw(handle: cl_event) -> Self {
        Event(Handle::from_raw(handle))
    }

    pub fn try_clone(&self) -> Result<Self> {
        self.0.try_clone().map(Event)
    }

    info_funcs! {
        pub fn command_queue_raw(&self) -> cl_command_queue = CL_EVENT_COMMAND_QUEUE;
        pub fn context_raw(&self) -> cl_context = CL_EVENT_CONTEXT;
        pub fn command_type(&self) -> CommandType = CL_EVENT_COMMAND_TYPE;
        pub fn execution_status(&self) -> ExecutionStatus = CL_EVENT_COMMAND_EXECUTION_STATUS;
        pub fn reference_count(&self) -> cl_uint = CL_EVENT_REFERENCE_COUNT;
    }

    /// Get the queue this event's command was enqueued on, or `None` for user
    /// events
    pub fn command_queue(&self) -> Result<Option<Queue>> {
        let raw = self.command_queue_raw()?;

        if raw.is_null() {
            return Ok(None);
        }

        unsafe { Handle::retain_raw(raw).map(|h| Some(Queue(h))) }
    }

    /// Get the context this event belongs to
    pub fn context(&self) -> Result<Context> {
        unsafe { Handle::retain_raw(self.context_raw()?).map(Context) }
    }

    /// Block until this event's command has finished
    pub fn wait(&self) -> Result<()> {
        Event::wait_all(&[self])
    }

    /// Block until every given event has finished. An empty list returns
    /// immediately.
    pub fn wait_all(events: &[&Event]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let list = raw_wait_list(events);
        let api = api()?;

        unsafe {
            wrap_result!("clWaitForEvents" => api.CL10.clWaitForEvents(
                list.len() as cl_uint,
                list.as_ptr()
            ))
        }
    }

    /// Get a view of this event's profiling counters. Profiling must be enabled
    /// on the queue the command was submitted to.
    pub fn profiling(&self) -> EventProfiling {
        EventProfiling(self)
    }

    /// Read every profiling counter for this event's command
    pub fn profiling_info(&self) -> Result<ProfilingInfo> {
        let p = self.profiling();
        let complete = match crate::raw::functions::system_version() {
            Some(v) if v >= OpenCLVersion::CL20 => Some(p.get_info(CL_PROFILING_COMMAND_COMPLETE)?),
            _ => None,
        };

        Ok(ProfilingInfo {
            queued: p.get_info(CL_PROFILING_COMMAND_QUEUED)?,
            submit: p.get_info(CL_PROFILING_COMMAND_SUBMIT)?,
            start: p.get_info(CL_PROFILING_COMMAND_START)?,
            end: p.get_info(CL_PROFILING_COMMAND_END)?,
            complete,
        })
    }
}

/// Profiling counters of an event
pub struct EventProfiling<'a>(&'a Event);

impl OclInfoInternal for EventProfiling<'_> {
    type Param = cl_profiling_info;
    const DEBUG_CONTEXT: &'static str = "clGetEventProfilingInfo";

    fn info_table() -> &'static InfoTable<cl_profiling_info> {
        &PROFILING_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetEventProfilingInfo(
            self.0.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Debug for EventProfiling<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.info_fmt(f)
    }
}

/// An event whose status is controlled by the host
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct UserEvent(Event);

impl UserEvent {
    /// Get the underlying event, e.g. to add it to a wait list
    pub fn event(&self) -> &Event {
        &self.0
    }

    /// Mark the event as complete, releasing any commands waiting on it
    pub fn set_complete(&self) -> Result<()> {
        self.set_status(CL_COMPLETE)
    }

    /// Mark the event as failed with the given negative error code. Commands
    /// waiting on it are terminated.
    pub fn set_failed(&self, code: cl_int) -> Result<()> {
        if code >= 0 {
            return Err(Error::InvalidArgument(format!(
                "user event failure status must be negative, got {}",
                code
            )));
        }

        self.set_status(code)
    }

    fn set_status(&self, status: cl_int) -> Result<()> {
        let cl11 = api_since!("clSetUserEventStatus" => CL11)?;

        unsafe {
            wrap_result!("clSetUserEventStatus" => cl11.clSetUserEventStatus(self.0.raw(), status))
        }
    }
}

impl AsRef<Event> for UserEvent {
    fn as_ref(&self) -> &Event {
        &self.0
    }
}

impl Context {
    /// Create a user event in this context, initially `Submitted`
    pub fn create_user_event(&self) -> Result<UserEvent> {
        let cl11 = api_since!("clCreateUserEvent" => CL11)?;

        unsafe {
            let mut err = CL_SUCCESS;
            let raw = cl11.clCreateUserEvent(self.raw(), &mut err);
            wrap_result!("clCreateUserEvent" => err)?;
            Ok(UserEvent(Event::from_raw(raw)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_all_empty() {
        assert!(Event::wait_all(&[]).is_ok());
    }

    #[test]
    fn test_wait_list_ptr() {
        assert!(wait_list_ptr(&[]).is_null());

        let list = [0x10 as cl_event, 0x20 as cl_event];
        assert_eq!(wait_list_ptr(&list), list.as_ptr());
    }
}
