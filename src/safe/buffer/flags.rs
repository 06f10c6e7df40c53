//! Buffer access and use flags, to allow validity checks to be performed at
//! compile time by the type system.

use crate::raw::*;

mod sealed {
    use crate::raw::cl_mem_flags;

    pub trait FlagInternal {
        const FLAGS: cl_mem_flags;
    }
}

/// A trait denoting a buffer host accessibility type.
///
/// Types implementing this trait indicate whether an OpenCL memory object can
/// be read/written by the host.
pub trait HostAccess: sealed::FlagInternal {}

/// A trait denoting a buffer that may be read by the host.
pub trait HostReadable: HostAccess {}

/// A trait denoting a buffer that may be written by the host.
pub trait HostWritable: HostAccess {}

/// A trait denoting a buffer device accessibility type.
///
/// Types implementing this trait indicate whether an OpenCL memory object can
/// be read/written by the OpenCL device.
pub trait DeviceAccess: sealed::FlagInternal {}

/// A trait used to specify extra buffer flags.
pub trait BufferFlags: sealed::FlagInternal {}

macro_rules! mem_flag_types {
    (
        $(
            $( #[ $outer:meta ] )*
            pub struct $name:ident = $flags:expr => $( $marker:ident ),+;
        )*
    ) => {
        $(
            $( #[ $outer ] )*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl sealed::FlagInternal for $name {
                const FLAGS: cl_mem_flags = $flags;
            }

            $( impl $marker for $name {} )+
        )*
    };
}

mem_flag_types! {
    /// The host may not read or write the buffer once it's been created.
    pub struct HostNoAccess = CL_MEM_HOST_NO_ACCESS => HostAccess;
    /// The host may only read the buffer once it's been created.
    pub struct HostReadOnly = CL_MEM_HOST_READ_ONLY => HostAccess, HostReadable;
    /// The host may only write the buffer once it's been created.
    pub struct HostWriteOnly = CL_MEM_HOST_WRITE_ONLY => HostAccess, HostWritable;
    /// The host may read and write the buffer.
    pub struct HostReadWrite = 0 => HostAccess, HostReadable, HostWritable;

    /// The device may only read the buffer.
    pub struct DeviceReadOnly = CL_MEM_READ_ONLY => DeviceAccess;
    /// The device may only write the buffer.
    pub struct DeviceWriteOnly = CL_MEM_WRITE_ONLY => DeviceAccess;
    /// The device may read and write the buffer.
    pub struct DeviceReadWrite = CL_MEM_READ_WRITE => DeviceAccess;

    /// Don't set any special buffer flags.
    pub struct NoFlags = 0 => BufferFlags;
    /// Set the `CL_MEM_ALLOC_HOST_PTR` flag indicating that the buffer should
    /// be allocated in host-accessible memory.
    pub struct AllocHostPtr = CL_MEM_ALLOC_HOST_PTR => BufferFlags;
}

#[cfg(test)]
mod tests {
    use super::sealed::FlagInternal;
    use super::*;

    fn host_flags<H: HostAccess>() -> cl_mem_flags {
        H::FLAGS
    }

    #[test]
    fn test_flag_values() {
        assert_eq!(host_flags::<HostReadWrite>(), 0);
        assert_eq!(host_flags::<HostNoAccess>(), CL_MEM_HOST_NO_ACCESS);
        assert_eq!(DeviceReadOnly::FLAGS, CL_MEM_READ_ONLY);
        assert_eq!(AllocHostPtr::FLAGS, CL_MEM_ALLOC_HOST_PTR);
        assert_eq!(dbg!(HostWriteOnly), HostWriteOnly::default());
    }
}
