//! Buffers
//!
//! Buffers are typed, and their host accessibility is tracked in the type
//! system so that reads and writes which OpenCL would reject don't compile.

pub mod flags;
mod types;

use crate::context::Context;
use crate::raw::*;
use crate::util::{api, check_range, Handle, MemKind, OclInfoInternal};
use crate::{Error, Result};
use flags::*;
use libc::size_t;
use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem::size_of;
pub use types::*;

/// A typed OpenCL buffer.
///
/// The lifetime `'a` covers host memory used as the buffer's storage, for
/// buffers built with `build_using_slice`.
pub struct Buffer<'a, H: HostAccess, T: MemSafe> {
    _lifetime: PhantomData<&'a mut [T]>,
    _host_access: PhantomData<H>,
    pub(crate) handle: Handle<MemKind>,
    len: usize,
}

unsafe impl<'a, H: HostAccess, T: MemSafe> Sync for Buffer<'a, H, T> {}

impl<'a, H: HostAccess, T: MemSafe> std::fmt::Debug for Buffer<'a, H, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        crate::util::OclInfo::info_fmt(self, f)
    }
}

impl<'a, H: HostAccess, T: MemSafe> OclInfoInternal for Buffer<'a, H, T> {
    type Param = cl_mem_info;
    const DEBUG_CONTEXT: &'static str = "clGetMemObjectInfo";

    fn info_table() -> &'static InfoTable<cl_mem_info> {
        &MEM_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetMemObjectInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl<'a, H: HostAccess, T: MemSafe> Buffer<'a, H, T> {
    /// Wrap a newly created mem object holding `len` elements
    ///
    /// # Safety
    ///
    /// The caller must own a reference to `raw`, which must be a buffer of at
    /// least `len * size_of::<T>()` bytes with host access matching `H`.
    pub(crate) unsafe fn from_raw(raw: cl_mem, len: usize) -> Self {
        Self {
            _lifetime: PhantomData,
            _host_access: PhantomData,
            handle: Handle::from_raw(raw),
            len,
        }
    }

    pub fn raw(&self) -> cl_mem {
        self.handle.raw()
    }

    /// Number of elements in this buffer
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of this buffer in bytes, as computed on the host
    pub fn rust_size(&self) -> size_t {
        self.len * size_of::<T>()
    }

    info_funcs! {
        pub fn mem_type(&self) -> MemObjectType = CL_MEM_TYPE;
        pub fn flags(&self) -> BufferFlagsInfo = CL_MEM_FLAGS;
        pub fn size(&self) -> size_t = CL_MEM_SIZE;
        pub fn host_ptr(&self) -> *mut c_void = CL_MEM_HOST_PTR;
        pub fn map_count(&self) -> cl_uint = CL_MEM_MAP_COUNT;
        pub fn reference_count(&self) -> cl_uint = CL_MEM_REFERENCE_COUNT;
        pub fn context_raw(&self) -> cl_context = CL_MEM_CONTEXT;
        pub fn associated_memobject_raw(&self) -> cl_mem = CL_MEM_ASSOCIATED_MEMOBJECT;
        pub fn offset(&self) -> size_t = CL_MEM_OFFSET;
    }

    /// Get the context this buffer was created in
    pub fn context(&self) -> Result<Context> {
        unsafe { Handle::retain_raw(self.context_raw()?).map(Context) }
    }

    /// Create a buffer aliasing `len` elements of this buffer starting at
    /// element `offset`. The sub-buffer inherits this buffer's flags.
    ///
    /// OpenCL requires the byte offset to be a multiple of the device's
    /// `mem_base_addr_align`, and reports `CL_MISALIGNED_SUB_BUFFER_OFFSET`
    /// otherwise.
    pub fn sub_buffer(&self, offset: usize, len: usize) -> Result<Buffer<'a, H, T>> {
        if len == 0 {
            return Err(Error::InvalidArgument(
                "sub-buffer must contain at least one element".to_string(),
            ));
        }

        check_range(offset, len, self.len)?;

        let cl11 = api_since!("clCreateSubBuffer" => CL11)?;
        let region = cl_buffer_region {
            origin: offset * size_of::<T>(),
            size: len * size_of::<T>(),
        };

        unsafe {
            let mut err = CL_SUCCESS;

            let raw = cl11.clCreateSubBuffer(
                self.raw(),
                0,
                CL_BUFFER_CREATE_TYPE_REGION,
                &region as *const _ as _,
                &mut err,
            );

            wrap_result!("clCreateSubBuffer" => err)?;
            Ok(Buffer::from_raw(raw, len))
        }
    }
}
