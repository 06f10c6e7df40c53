use crate::buffer::flags::{HostAccess, HostReadable, HostWritable};
use crate::buffer::{Buffer, MemSafe};
use crate::context::Context;
use crate::device::Device;
use crate::event::{raw_wait_list, wait_list_ptr, Event};
use crate::kernel::Kernel;
use crate::queue::Queue;
use crate::raw::*;
use crate::util::{api, check_dimensions, check_range, properties_list, Handle};
use crate::{Error, Result};
use std::mem::{size_of, size_of_val};
use std::ptr::{null, null_mut};

bitfield! {
    pub struct QueueProperties(cl_command_queue_properties) {
        pub const OUT_OF_ORDER_EXEC_MODE_ENABLE = CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE;
        pub const PROFILING_ENABLE = CL_QUEUE_PROFILING_ENABLE;
        pub const ON_DEVICE = CL_QUEUE_ON_DEVICE;
        pub const ON_DEVICE_DEFAULT = CL_QUEUE_ON_DEVICE_DEFAULT;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueueBuilder<'c, 'd> {
    context: &'c Context,
    device: &'d Device,
    properties: Option<QueueProperties>,
    size: Option<cl_uint>,
}

impl<'c, 'd> QueueBuilder<'c, 'd> {
    pub fn new(context: &'c Context, device: &'d Device) -> Self {
        Self {
            context,
            device,
            properties: None,
            size: None,
        }
    }

    pub fn properties(self, properties: QueueProperties) -> Self {
        Self {
            properties: Some(properties),
            ..self
        }
    }

    /// Set the size of an on-device queue, in bytes. Requires the `ON_DEVICE`
    /// property.
    pub fn size(self, size: cl_uint) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    /// The zero-terminated property list for `clCreateCommandQueueWithProperties`,
    /// or `None` when the queue can be created with `clCreateCommandQueue`
    fn properties_list(&self) -> Result<Option<Vec<cl_queue_properties>>> {
        let props = self.properties.unwrap_or_default();
        let on_device = props.contains(QueueProperties::ON_DEVICE);

        match self.size {
            Some(_) if !on_device => Err(Error::InvalidArgument(
                "cannot set queue size unless queue property ON_DEVICE is set".to_string(),
            )),
            Some(size) => Ok(Some(properties_list(&[
                (CL_QUEUE_PROPERTY_PROPERTIES, props.raw()),
                (CL_QUEUE_PROPERTY_SIZE, size as _),
            ]))),
            None if on_device => Ok(Some(properties_list(&[(
                CL_QUEUE_PROPERTY_PROPERTIES,
                props.raw(),
            )]))),
            None => Ok(None),
        }
    }

    pub fn build(self) -> Result<Queue> {
        let list = self.properties_list()?;

        unsafe {
            let mut err = CL_SUCCESS;

            let context = create_function(&list);

            let queue = match list {
                Some(list) => {
                    let cl20 = api_since!(context => CL20)?;

                    cl20.clCreateCommandQueueWithProperties(
                        self.context.raw(),
                        self.device.raw(),
                        list.as_ptr(),
                        &mut err as _,
                    )
                }
                None => api()?.CL10.clCreateCommandQueue(
                    self.context.raw(),
                    self.device.raw(),
                    self.properties.map(|p| p.raw()).unwrap_or_default(),
                    &mut err as _,
                ),
            };

            wrap_result!(context => err)?;
            Ok(Queue(Handle::from_raw(queue)))
        }
    }
}

/// The function a queue with the given property list is created with
fn create_function(list: &Option<Vec<cl_queue_properties>>) -> &'static str {
    match list {
        Some(_) => "clCreateCommandQueueWithProperties",
        None => "clCreateCommandQueue",
    }
}

/// Validate the work sizes of an NDRange command
pub(crate) fn check_work_sizes(
    global: &[usize],
    local: Option<&[usize]>,
    offset: Option<&[usize]>,
) -> Result<()> {
    check_dimensions(global)?;

    for (name, other) in &[("local work size", local), ("global work offset", offset)] {
        if let Some(other) = other {
            if other.len() != global.len() {
                return Err(Error::InvalidArgument(format!(
                    "{} has {} dimensions, but global work size has {}",
                    name,
                    other.len(),
                    global.len()
                )));
            }
        }
    }

    if let Some(local) = local {
        if local.contains(&0) {
            return Err(Error::InvalidArgument(format!(
                "local work size {:?} has a zero-sized dimension",
                local
            )));
        }
    }

    Ok(())
}

/// A memory command on a buffer
///
/// Events in the wait list are borrowed until the command is enqueued.
#[must_use]
pub struct BufferCmd<'q, 'b, 'a, 'w, H: HostAccess, T: MemSafe> {
    pub(super) queue: &'q Queue,
    pub(super) buffer: &'b Buffer<'a, H, T>,
    pub(super) offset: Option<usize>,
    pub(super) wait_list: Vec<&'w Event>,
}

impl<'q, 'b, 'a, 'w, H: HostAccess, T: MemSafe> BufferCmd<'q, 'b, 'a, 'w, H, T> {
    /// Set the offset within the OpenCL buffer for this memory operation, in
    /// elements.
    ///
    /// Offsets in host memory should be set using slicing.
    pub fn offset(self, offset: usize) -> Self {
        Self {
            offset: Some(offset),
            ..self
        }
    }

    /// Don't start this command until the given events have finished
    pub fn wait_for(mut self, events: &[&'w Event]) -> Self {
        self.wait_list.extend_from_slice(events);
        self
    }

    fn byte_range(&self, len: usize) -> Result<(usize, usize)> {
        let offset = self.offset.unwrap_or(0);
        check_range(offset, len, self.buffer.len())?;
        Ok((offset * size_of::<T>(), len * size_of::<T>()))
    }

    /// Perform a blocking read of the buffer into the given slice.
    pub fn read(self, dest: &mut [T]) -> Result<()>
    where
        H: HostReadable,
    {
        let (offset, size) = self.byte_range(dest.len())?;
        let api = api()?;
        let wait_list = raw_wait_list(&self.wait_list);

        unsafe {
            wrap_result!("clEnqueueReadBuffer" => api.CL10.clEnqueueReadBuffer(
                self.queue.raw(),
                self.buffer.raw(),
                CL_TRUE,
                offset,
                size,
                dest.as_mut_ptr() as _,
                wait_list.len() as cl_uint,
                wait_list_ptr(&wait_list),
                null_mut()
            ))
        }
    }

    /// Perform a blocking write of the given slice into the buffer.
    pub fn write(self, src: &[T]) -> Result<()>
    where
        H: HostWritable,
    {
        let (offset, size) = self.byte_range(src.len())?;
        let api = api()?;
        let wait_list = raw_wait_list(&self.wait_list);

        unsafe {
            wrap_result!("clEnqueueWriteBuffer" => api.CL10.clEnqueueWriteBuffer(
                self.queue.raw(),
                self.buffer.raw(),
                CL_TRUE,
                offset,
                size,
                src.as_ptr() as _,
                wait_list.len() as cl_uint,
                wait_list_ptr(&wait_list),
                null_mut(),
            ))
        }
    }

    /// Fill `len` elements of the buffer with copies of `pattern`, or the rest
    /// of the buffer if `len` is `None`.
    pub fn fill(self, pattern: T, len: Option<usize>) -> Result<Event> {
        let len = len.unwrap_or_else(|| self.buffer.len().saturating_sub(self.offset.unwrap_or(0)));
        let (offset, size) = self.byte_range(len)?;
        let cl12 = api_since!("clEnqueueFillBuffer" => CL12)?;
        let wait_list = raw_wait_list(&self.wait_list);

        unsafe {
            let mut event = null_mut();

            wrap_result!("clEnqueueFillBuffer" => cl12.clEnqueueFillBuffer(
                self.queue.raw(),
                self.buffer.raw(),
                &pattern as *const T as _,
                size_of_val(&pattern),
                offset,
                size,
                wait_list.len() as cl_uint,
                wait_list_ptr(&wait_list),
                &mut event
            ))?;

            Ok(Event::from_raw(event))
        }
    }
}

/// A kernel execution command
///
/// Work sizes and events in the wait list are borrowed until the command is
/// enqueued.
#[must_use]
pub struct KernelCmd<'q, 'k, 'w> {
    pub(super) queue: &'q Queue,
    pub(super) kernel: &'k Kernel,
    pub(super) global_offset: Option<&'w [usize]>,
    pub(super) local_size: Option<&'w [usize]>,
    pub(super) wait_list: Vec<&'w Event>,
}

impl<'q, 'k, 'w> KernelCmd<'q, 'k, 'w> {
    pub fn global_offset(self, offset: &'w [usize]) -> Self {
        Self {
            global_offset: Some(offset),
            ..self
        }
    }

    pub fn local_size(self, size: &'w [usize]) -> Self {
        Self {
            local_size: Some(size),
            ..self
        }
    }

    /// Don't start this command until the given events have finished
    pub fn wait_for(mut self, events: &[&'w Event]) -> Self {
        self.wait_list.extend_from_slice(events);
        self
    }

    /// Enqueue the kernel over the given global work size.
    pub fn exec_ndrange(self, global_size: &[usize]) -> Result<Event> {
        check_work_sizes(global_size, self.local_size, self.global_offset)?;
        let api = api()?;
        let wait_list = raw_wait_list(&self.wait_list);

        unsafe {
            let mut event = null_mut();

            wrap_result!("clEnqueueNDRangeKernel" => api.CL10.clEnqueueNDRangeKernel(
                self.queue.raw(),
                self.kernel.raw(),
                global_size.len() as cl_uint,
                self.global_offset.map_or(null(), |o| o.as_ptr()),
                global_size.as_ptr(),
                self.local_size.map_or(null(), |l| l.as_ptr()),
                wait_list.len() as cl_uint,
                wait_list_ptr(&wait_list),
                &mut event
            ))?;

            Ok(Event::from_raw(event))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_work_sizes() {
        assert!(check_work_sizes(&[1024], None, None).is_ok());
        assert!(check_work_sizes(&[64, 64], Some(&[8, 8][..]), Some(&[0, 0][..])).is_ok());

        assert!(check_work_sizes(&[], None, None).is_err());
        assert!(check_work_sizes(&[1, 2, 3, 4], None, None).is_err());
        assert!(check_work_sizes(&[64, 0], None, None).is_err());
        assert!(check_work_sizes(&[64, 64], Some(&[8][..]), None).is_err());
        assert!(check_work_sizes(&[64], None, Some(&[0, 0][..])).is_err());
        assert!(check_work_sizes(&[64], Some(&[0][..]), None).is_err());

        let err = check_work_sizes(&[64, 64], Some(&[8, 8, 1][..]), None).unwrap_err();
        assert!(dbg!(err.to_string()).contains("local work size has 3 dimensions"));
    }

    #[test]
    fn test_queue_properties_list() {
        let context = unsafe { Context::from_raw(null_mut()) };
        let device = unsafe { Device::from_raw(null_mut()) };
        let builder = QueueBuilder::new(&context, &device);

        assert_eq!(builder.properties_list().unwrap(), None);
        assert!(builder.size(1024).properties_list().is_err());

        let profiling = builder.properties(QueueProperties::PROFILING_ENABLE);
        let list = profiling.properties_list().unwrap();
        assert_eq!(list, None);
        assert_eq!(create_function(&list), "clCreateCommandQueue");

        let on_device = builder
            .properties(QueueProperties::ON_DEVICE | QueueProperties::OUT_OF_ORDER_EXEC_MODE_ENABLE)
            .size(1024);
        assert_eq!(
            on_device.properties_list().unwrap(),
            Some(vec![
                CL_QUEUE_PROPERTY_PROPERTIES,
                CL_QUEUE_ON_DEVICE | CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE,
                CL_QUEUE_PROPERTY_SIZE,
                1024,
                0
            ])
        );
        assert_eq!(
            create_function(&on_device.properties_list().unwrap()),
            "clCreateCommandQueueWithProperties"
        );

        // the handle was never valid, so don't release it
        std::mem::forget(context);
    }

    #[test]
    fn test_wait_list_borrows_events() {
        use crate::buffer::flags::HostReadWrite;

        let queue = Queue(unsafe { Handle::from_raw(null_mut()) });
        let buffer = unsafe { Buffer::<HostReadWrite, cl_int>::from_raw(null_mut(), 4) };
        let kernel = unsafe { Kernel::from_raw(null_mut()) };
        let first = unsafe { Event::from_raw(0x10 as cl_event) };
        let second = unsafe { Event::from_raw(0x20 as cl_event) };

        let cmd = queue.buffer_cmd(&buffer).wait_for(&[&first]).wait_for(&[&second]);
        assert_eq!(cmd.wait_list.len(), 2);
        assert!(std::ptr::eq(cmd.wait_list[0], &first));
        assert!(std::ptr::eq(cmd.wait_list[1], &second));
        assert_eq!(
            raw_wait_list(&cmd.wait_list),
            vec![0x10 as cl_event, 0x20 as cl_event]
        );
        drop(cmd);

        let cmd = queue.kernel_cmd(&kernel).wait_for(&[&second, &first]);
        assert!(std::ptr::eq(cmd.wait_list[0], &second));
        assert!(std::ptr::eq(cmd.wait_list[1], &first));
        drop(cmd);

        // none of the handles were ever valid, so don't release them
        std::mem::forget(first);
        std::mem::forget(second);
        std::mem::forget(kernel);
        std::mem::forget(buffer);
        std::mem::forget(queue);
    }

    #[test]
    fn test_queue_properties_debug() {
        let props = QueueProperties::PROFILING_ENABLE | QueueProperties::ON_DEVICE;
        let s = format!("{:?}", props);
        assert!(s.contains("PROFILING_ENABLE"));
        assert!(s.contains("ON_DEVICE"));
        assert!(!s.contains("OUT_OF_ORDER"));
    }
}
