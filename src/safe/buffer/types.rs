use super::flags::*;
use super::Buffer;
use crate::context::Context;
use crate::raw::*;
use crate::util::api;
use crate::{Error, Result};
use std::marker::PhantomData;
use std::mem::size_of;
use std::ptr::null_mut;

/// A trait indicating that a type may be safely stored in an OpenCL buffer.
/// OpenCL buffers allow data to be moved and manipulated in ways that may
/// violate Rust's safety rules. Therefore, this trait may only be implemented
/// for types that have the lifetime `'static`, are sized, have copy semantics,
/// and can be freely moved. Additionally, the type should be valid for every
/// possible bit pattern, but this is currently not expressible through Rust's
/// type system.
pub unsafe trait MemSafe: 'static + Sized + Copy + Unpin {
    /// The name of the equivalent OpenCL C type, e.g. `float` or `ulong`
    const C_TYPE: &'static str;

    /// Check whether a given OpenCL C type is compatible with this Rust type.
    /// This is used when assigning kernel arguments as a sanity check, but
    /// should not be trusted as a guarantee of correctness.
    fn is_param_type_compatible(c_type: &str) -> bool {
        c_type == Self::C_TYPE
    }
}

macro_rules! mem_safe {
    ( $( $ty:ty => $c_type:literal ),* $(,)? ) => {
        $(
            unsafe impl MemSafe for $ty {
                const C_TYPE: &'static str = $c_type;
            }
        )*
    };
}

mem_safe! {
    cl_char => "char",
    cl_uchar => "uchar",
    cl_short => "short",
    cl_ushort => "ushort",
    cl_int => "int",
    cl_uint => "uint",
    cl_long => "long",
    cl_ulong => "ulong",
    cl_float => "float",
    cl_double => "double",
}

#[derive(Clone, Copy)]
pub struct BufferBuilder<
    'c,
    H: HostAccess = HostReadWrite,
    D: DeviceAccess = DeviceReadWrite,
    F: BufferFlags = NoFlags,
> {
    _host_access: PhantomData<H>,
    _device_access: PhantomData<D>,
    _flags: PhantomData<F>,
    context: &'c Context,
}

impl<'c> BufferBuilder<'c> {
    /// Start building a new OpenCL buffer for the given context.
    pub fn new(context: &'c Context) -> Self {
        Self {
            _host_access: PhantomData,
            _device_access: PhantomData,
            _flags: PhantomData,
            context,
        }
    }
}

impl<'c, H: HostAccess, D: DeviceAccess, F: BufferFlags> BufferBuilder<'c, H, D, F> {
    fn update_flags<H2: HostAccess, D2: DeviceAccess, F2: BufferFlags>(
        self,
    ) -> BufferBuilder<'c, H2, D2, F2> {
        BufferBuilder {
            _host_access: PhantomData,
            _device_access: PhantomData,
            _flags: PhantomData,
            context: self.context,
        }
    }

    /// Set the host accessibility for this buffer.
    pub fn host_access<H2: HostAccess>(self) -> BufferBuilder<'c, H2, D, F> {
        self.update_flags()
    }

    /// Set the device accessibility for this buffer.
    pub fn device_access<D2: DeviceAccess>(self) -> BufferBuilder<'c, H, D2, F> {
        self.update_flags()
    }

    /// Set the `CL_MEM_ALLOC_HOST_PTR` flag when creating this buffer.
    pub fn alloc_host_ptr(self) -> BufferBuilder<'c, H, D, AllocHostPtr> {
        self.update_flags()
    }

    /// The flags passed to `clCreateBuffer`, excluding host pointer flags
    pub fn flags(&self) -> BufferFlagsInfo {
        BufferFlagsInfo::from_raw(H::FLAGS | D::FLAGS | F::FLAGS)
    }

    fn build<'a, T: MemSafe>(
        self,
        len: usize,
        host_ptr: *mut T,
        extra_flags: cl_mem_flags,
    ) -> Result<Buffer<'a, H, T>> {
        if len == 0 {
            return Err(Error::InvalidArgument(
                "buffer must contain at least one element".to_string(),
            ));
        }

        let api = api()?;

        unsafe {
            let mut err = CL_SUCCESS;

            let handle = api.CL10.clCreateBuffer(
                self.context.raw(),
                self.flags().raw() | extra_flags,
                len * size_of::<T>(),
                host_ptr as _,
                &mut err as _,
            );

            wrap_result!("clCreateBuffer" => err)?;

            Ok(Buffer::from_raw(handle, len))
        }
    }

    /// Build a buffer, copying initial data from the given slice, with the
    /// `CL_MEM_COPY_HOST_PTR` flag set.
    pub fn build_copying_slice<T: MemSafe>(self, slice: &[T]) -> Result<Buffer<'static, H, T>> {
        self.build(slice.len(), slice.as_ptr() as *mut _, CL_MEM_COPY_HOST_PTR)
    }

    /// Build a buffer with space for `len` elements of type `T`. The initial
    /// contents of the buffer are unspecified.
    pub fn build_with_size<T: MemSafe>(self, len: usize) -> Result<Buffer<'static, H, T>> {
        self.build(len, null_mut(), 0)
    }
}

impl<'c, H: HostAccess, D: DeviceAccess> BufferBuilder<'c, H, D, NoFlags> {
    /// Build a buffer using the given slice for storage, with the
    /// `CL_MEM_USE_HOST_PTR` flag set.
    ///
    /// The slice stays mutably borrowed for as long as the buffer exists, so
    /// the host can't observe the device's writes except through the buffer.
    pub fn build_using_slice<'a, T: MemSafe>(
        self,
        slice: &'a mut [T],
    ) -> Result<Buffer<'a, H, T>> {
        self.build(slice.len(), slice.as_mut_ptr(), CL_MEM_USE_HOST_PTR)
    }
}

impl Context {
    /// Start building a new OpenCL buffer for this context.
    pub fn buffer_builder(&self) -> BufferBuilder {
        BufferBuilder::new(self)
    }
}

bitfield! {
    /// Flags used to construct a buffer.
    ///
    /// These values cannot be used when constructing a buffer using the safe
    /// API (since traits and type parameters are used instead, to provide
    /// compile-time safety) but they're provided anyways as the output of the
    /// `CL_MEM_FLAGS` info function.
    pub struct BufferFlagsInfo(cl_mem_flags) {
        pub const READ_WRITE = CL_MEM_READ_WRITE;
        pub const WRITE_ONLY = CL_MEM_WRITE_ONLY;
        pub const READ_ONLY = CL_MEM_READ_ONLY;
        pub const USE_HOST_PTR = CL_MEM_USE_HOST_PTR;
        pub const ALLOC_HOST_PTR = CL_MEM_ALLOC_HOST_PTR;
        pub const COPY_HOST_PTR = CL_MEM_COPY_HOST_PTR;
        pub const HOST_WRITE_ONLY = CL_MEM_HOST_WRITE_ONLY;
        pub const HOST_READ_ONLY = CL_MEM_HOST_READ_ONLY;
        pub const HOST_NO_ACCESS = CL_MEM_HOST_NO_ACCESS;
    }
}

flag_enum! {
    /// The type of an OpenCL memory object
    pub enum MemObjectType(cl_mem_object_type) {
        Buffer = CL_MEM_OBJECT_BUFFER,
        Image2D = CL_MEM_OBJECT_IMAGE2D,
        Image3D = CL_MEM_OBJECT_IMAGE3D,
        Image2DArray = CL_MEM_OBJECT_IMAGE2D_ARRAY,
        Image1D = CL_MEM_OBJECT_IMAGE1D,
        Image1DArray = CL_MEM_OBJECT_IMAGE1D_ARRAY,
        Image1DBuffer = CL_MEM_OBJECT_IMAGE1D_BUFFER,
        Pipe = CL_MEM_OBJECT_PIPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_compatible() {
        assert!(cl_float::is_param_type_compatible("float"));
        assert!(!cl_float::is_param_type_compatible("double"));
        assert!(cl_uchar::is_param_type_compatible("uchar"));
        assert_eq!(<cl_ulong as MemSafe>::C_TYPE, "ulong");
    }

    #[test]
    fn test_builder_flags() {
        let context = unsafe { Context::from_raw(null_mut()) };

        let default = context.buffer_builder();
        assert_eq!(default.flags(), BufferFlagsInfo::READ_WRITE);

        let restricted = context
            .buffer_builder()
            .host_access::<HostReadOnly>()
            .device_access::<DeviceWriteOnly>()
            .alloc_host_ptr();
        assert_eq!(
            restricted.flags(),
            BufferFlagsInfo::HOST_READ_ONLY
                | BufferFlagsInfo::WRITE_ONLY
                | BufferFlagsInfo::ALLOC_HOST_PTR
        );
        assert!(dbg!(format!("{:?}", restricted.flags())).contains("HOST_READ_ONLY"));

        // rejected before reaching OpenCL
        assert!(context.buffer_builder().build_with_size::<cl_int>(0).is_err());

        std::mem::forget(context);
    }
}
