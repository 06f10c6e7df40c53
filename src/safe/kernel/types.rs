use super::Kernel;
use crate::buffer::flags::HostAccess;
use crate::buffer::{Buffer, MemSafe};
use crate::device::Device;
use crate::raw::*;
use crate::util::{api, Handle, MemKind, OclInfoInternal};
use crate::Result;
use libc::size_t;
use std::ffi::{c_void, CString};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{size_of, size_of_val};
use std::ptr::null;

/// Information about a single kernel argument
#[derive(Clone, Copy)]
pub struct KernelArgInfo<'a> {
    pub(super) kernel: &'a Kernel,
    pub(super) index: cl_uint,
}

impl OclInfoInternal for KernelArgInfo<'_> {
    type Param = cl_kernel_arg_info;
    const DEBUG_CONTEXT: &'static str = "clGetKernelArgInfo";

    fn info_table() -> &'static InfoTable<cl_kernel_arg_info> {
        &KERNEL_ARG_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        let cl12 = api_since!(Self::DEBUG_CONTEXT => CL12)?;

        Ok(cl12.clGetKernelArgInfo(
            self.kernel.raw(),
            self.index,
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Debug for KernelArgInfo<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        crate::util::OclInfo::info_fmt(self, f)
    }
}

impl KernelArgInfo<'_> {
    pub fn index(&self) -> cl_uint {
        self.index
    }

    info_funcs! {
        pub fn address_qualifier(&self) -> ArgAddressQualifier = CL_KERNEL_ARG_ADDRESS_QUALIFIER;
        pub fn access_qualifier(&self) -> ArgAccessQualifier = CL_KERNEL_ARG_ACCESS_QUALIFIER;
        pub fn type_name(&self) -> CString = CL_KERNEL_ARG_TYPE_NAME;
        pub fn type_qualifier(&self) -> ArgTypeQualifier = CL_KERNEL_ARG_TYPE_QUALIFIER;
        pub fn arg_name(&self) -> CString = CL_KERNEL_ARG_NAME;
    }
}

flag_enum! {
    pub enum ArgAddressQualifier(cl_kernel_arg_address_qualifier) {
        Global = CL_KERNEL_ARG_ADDRESS_GLOBAL,
        Local = CL_KERNEL_ARG_ADDRESS_LOCAL,
        Constant = CL_KERNEL_ARG_ADDRESS_CONSTANT,
        Private = CL_KERNEL_ARG_ADDRESS_PRIVATE,
    }
}

flag_enum! {
    pub enum ArgAccessQualifier(cl_kernel_arg_access_qualifier) {
        ReadOnly = CL_KERNEL_ARG_ACCESS_READ_ONLY,
        WriteOnly = CL_KERNEL_ARG_ACCESS_WRITE_ONLY,
        ReadWrite = CL_KERNEL_ARG_ACCESS_READ_WRITE,
        None = CL_KERNEL_ARG_ACCESS_NONE,
    }
}

bitfield! {
    pub struct ArgTypeQualifier(cl_kernel_arg_type_qualifier) {
        pub const NONE = CL_KERNEL_ARG_TYPE_NONE;
        pub const CONST = CL_KERNEL_ARG_TYPE_CONST;
        pub const RESTRICT = CL_KERNEL_ARG_TYPE_RESTRICT;
        pub const VOLATILE = CL_KERNEL_ARG_TYPE_VOLATILE;
        pub const PIPE = CL_KERNEL_ARG_TYPE_PIPE;
    }
}

/// Information about a kernel specific to one device
#[derive(Clone, Copy)]
pub struct KernelWorkGroupInfo<'a> {
    pub(super) kernel: &'a Kernel,
    pub(super) device: Device,
}

impl OclInfoInternal for KernelWorkGroupInfo<'_> {
    type Param = cl_kernel_work_group_info;
    const DEBUG_CONTEXT: &'static str = "clGetKernelWorkGroupInfo";

    fn info_table() -> &'static InfoTable<cl_kernel_work_group_info> {
        &KERNEL_WORK_GROUP_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetKernelWorkGroupInfo(
            self.kernel.raw(),
            self.device.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Debug for KernelWorkGroupInfo<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        crate::util::OclInfo::info_fmt(self, f)
    }
}

impl KernelWorkGroupInfo<'_> {
    info_funcs! {
        pub fn work_group_size(&self) -> size_t = CL_KERNEL_WORK_GROUP_SIZE;
        pub fn compile_work_group_size(&self) -> Vec<size_t> = CL_KERNEL_COMPILE_WORK_GROUP_SIZE;
        pub fn local_mem_size(&self) -> cl_ulong = CL_KERNEL_LOCAL_MEM_SIZE;
        pub fn preferred_work_group_size_multiple(&self) -> size_t = CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE;
        pub fn private_mem_size(&self) -> cl_ulong = CL_KERNEL_PRIVATE_MEM_SIZE;
    }
}

/// A trait implemented by types that can be used as an individual kernel
/// argument
pub trait KernelArg {
    /// The type of value which is passed to the `clSetKernelArg` call
    type ArgType;

    /// Check whether a given OpenCL C type (e.g. `float` or `ulong*`) is
    /// compatible with this kernel argument type.
    fn is_param_type_compatible(c_type: &str) -> bool;

    /// Get the data of this kernel argument, as a size and pointer to be
    /// passed to `clSetKernelArg`
    fn as_raw_kernel_arg(&self) -> (size_t, *const Self::ArgType);

    /// The memory object the kernel should keep alive while this argument is
    /// assigned, if any
    fn mem_handle(&self) -> Option<&Handle<MemKind>> {
        None
    }
}

/// Check a pointer-typed OpenCL C argument such as `float*` against the element
/// type `T`
fn is_pointer_to<T: MemSafe>(c_type: &str) -> bool {
    c_type
        .rsplitn(2, '*')
        .nth(1)
        .map(|pointee| T::is_param_type_compatible(pointee.trim()))
        .unwrap_or(false)
}

// values can be used as individual kernel args
impl<T: MemSafe> KernelArg for T {
    type ArgType = T;

    fn is_param_type_compatible(c_type: &str) -> bool {
        <T as MemSafe>::is_param_type_compatible(c_type)
    }

    fn as_raw_kernel_arg(&self) -> (size_t, *const T) {
        (size_of_val(self), self as *const T)
    }
}

// buffers can be used as individual kernel args
impl<H: HostAccess, T: MemSafe> KernelArg for Buffer<'static, H, T> {
    type ArgType = cl_mem;

    fn is_param_type_compatible(c_type: &str) -> bool {
        is_pointer_to::<T>(c_type)
    }

    fn as_raw_kernel_arg(&self) -> (size_t, *const cl_mem) {
        (size_of::<cl_mem>(), self.handle.raw_ptr())
    }

    fn mem_handle(&self) -> Option<&Handle<MemKind>> {
        Some(&self.handle)
    }
}

/// Space for `len` elements of `T` in `__local` memory, allocated by OpenCL
/// for each work-group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalMemory<T: MemSafe> {
    _type: PhantomData<T>,
    len: usize,
}

impl<T: MemSafe> LocalMemory<T> {
    pub fn new(len: usize) -> Self {
        Self {
            _type: PhantomData,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: MemSafe> KernelArg for LocalMemory<T> {
    type ArgType = T;

    fn is_param_type_compatible(c_type: &str) -> bool {
        is_pointer_to::<T>(c_type)
    }

    fn as_raw_kernel_arg(&self) -> (size_t, *const T) {
        (self.len * size_of::<T>(), null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::flags::HostNoAccess;

    #[test]
    fn test_scalar_arg() {
        let value: cl_ulong = 42;
        let (size, ptr) = value.as_raw_kernel_arg();
        assert_eq!(size, 8);
        assert_eq!(unsafe { *ptr }, 42);

        assert!(<cl_ulong as KernelArg>::is_param_type_compatible("ulong"));
        assert!(!<cl_ulong as KernelArg>::is_param_type_compatible("ulong*"));
    }

    #[test]
    fn test_pointer_types() {
        assert!(is_pointer_to::<cl_float>("float*"));
        assert!(is_pointer_to::<cl_float>("float *"));
        assert!(!is_pointer_to::<cl_float>("float"));
        assert!(!is_pointer_to::<cl_float>("double*"));
        assert!(
            <Buffer<'static, HostNoAccess, cl_char> as KernelArg>::is_param_type_compatible(
                "char*"
            )
        );
    }

    #[test]
    fn test_local_memory() {
        let local = LocalMemory::<cl_float>::new(256);
        let (size, ptr) = dbg!(local).as_raw_kernel_arg();
        assert_eq!(size, 1024);
        assert!(ptr.is_null());
        assert!(local.mem_handle().is_none());
        assert!(LocalMemory::<cl_int>::new(0).is_empty());
    }

    #[test]
    fn test_type_qualifier_debug() {
        let q = ArgTypeQualifier::CONST | ArgTypeQualifier::RESTRICT;
        assert_eq!(format!("{:?}", q), "ArgTypeQualifier(CONST | RESTRICT)");
    }
}
