use crate::raw::{
    cl_command_queue, cl_context, cl_device_id, cl_event, cl_kernel, cl_mem, cl_program,
    cl_sampler,
};
use crate::Result;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::ManuallyDrop;

pub(crate) mod sealed {
    use crate::Result;
    use std::fmt::Debug;
    use std::hash::Hash;

    pub trait HandleKindInternal {
        type Raw: Copy + Eq + Hash + Debug;

        const RETAIN_CONTEXT: &'static str;
        const RELEASE_CONTEXT: &'static str;

        unsafe fn retain(raw: Self::Raw) -> Result<()>;

        unsafe fn release(raw: Self::Raw) -> Result<()>;
    }
}

/// A kind of reference counted OpenCL object
pub trait HandleKind: sealed::HandleKindInternal {}

impl<K: sealed::HandleKindInternal> HandleKind for K {}

macro_rules! handle_kinds {
    (
        $(
            $( #[ $outer:meta ] )*
            pub enum $kind:ident($raw:ty): $ver:ident => $retain:ident, $release:ident;
        )*
    ) => {
        $(
            $( #[ $outer ] )*
            #[derive(Debug)]
            pub enum $kind {}

            impl sealed::HandleKindInternal for $kind {
                type Raw = $raw;

                const RETAIN_CONTEXT: &'static str = stringify!($retain);
                const RELEASE_CONTEXT: &'static str = stringify!($release);

                unsafe fn retain(raw: $raw) -> Result<()> {
                    let api = api_since!(stringify!($retain) => $ver)?;
                    wrap_result!(stringify!($retain) => api.$retain(raw))
                }

                unsafe fn release(raw: $raw) -> Result<()> {
                    let api = api_since!(stringify!($release) => $ver)?;
                    wrap_result!(stringify!($release) => api.$release(raw))
                }
            }
        )*
    };
}

handle_kinds! {
    pub enum ContextKind(cl_context): CL10 => clRetainContext, clReleaseContext;
    pub enum QueueKind(cl_command_queue): CL10 => clRetainCommandQueue, clReleaseCommandQueue;
    pub enum MemKind(cl_mem): CL10 => clRetainMemObject, clReleaseMemObject;
    pub enum ProgramKind(cl_program): CL10 => clRetainProgram, clReleaseProgram;
    pub enum KernelKind(cl_kernel): CL10 => clRetainKernel, clReleaseKernel;
    pub enum EventKind(cl_event): CL10 => clRetainEvent, clReleaseEvent;
    pub enum SamplerKind(cl_sampler): CL10 => clRetainSampler, clReleaseSampler;
    /// Sub-devices only. Root devices aren't reference counted.
    pub enum DeviceKind(cl_device_id): CL12 => clRetainDevice, clReleaseDevice;
}

/// An owned reference to an OpenCL object.
///
/// Each `Handle` accounts for exactly one reference count on the underlying
/// object, which is released when the handle is dropped.
pub struct Handle<K: HandleKind> {
    raw: K::Raw,
}

impl<K: HandleKind> Handle<K> {
    /// Take ownership of an existing reference, such as one returned by a
    /// `clCreate___` function.
    ///
    /// # Safety
    ///
    /// `raw` must be a valid object of the right kind, and the caller must own
    /// a reference to it which isn't released anywhere else.
    pub unsafe fn from_raw(raw: K::Raw) -> Self {
        Self { raw }
    }

    /// Retain an additional reference to an object, such as one returned by
    /// an information query.
    ///
    /// # Safety
    ///
    /// `raw` must be a valid object of the right kind.
    pub unsafe fn retain_raw(raw: K::Raw) -> Result<Self> {
        K::retain(raw)?;
        Ok(Self { raw })
    }

    /// Get the raw handle, without affecting its reference count
    pub fn raw(&self) -> K::Raw {
        self.raw
    }

    /// Pointer to the stored raw handle, for APIs taking the handle by address
    pub(crate) fn raw_ptr(&self) -> *const K::Raw {
        &self.raw
    }

    /// Give up ownership of the reference without releasing it
    pub fn into_raw(self) -> K::Raw {
        ManuallyDrop::new(self).raw
    }

    /// Create another handle to the same object, incrementing its reference
    /// count
    pub fn try_clone(&self) -> Result<Self> {
        unsafe { Self::retain_raw(self.raw) }
    }
}

impl<K: HandleKind> Drop for Handle<K> {
    fn drop(&mut self) {
        unsafe {
            if let Err(e) = K::release(self.raw) {
                log::warn!(
                    "{} failed for {:?}: {:?}",
                    K::RELEASE_CONTEXT,
                    self.raw,
                    e
                );
            }
        }
    }
}

impl<K: HandleKind> Debug for Handle<K> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Handle({:?})", self.raw)
    }
}

impl<K: HandleKind> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: HandleKind> Eq for Handle<K> {}

impl<K: HandleKind> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state)
    }
}

// OpenCL objects are reference counted by the driver and every API call other
// than clSetKernelArg is thread safe.
unsafe impl<K: HandleKind> Send for Handle<K> {}

#[cfg(test)]
pub(crate) mod tests {
    use super::sealed::HandleKindInternal;
    use super::*;
    use crate::raw::CL_INVALID_MEM_OBJECT;
    use crate::ApiError;
    use lazy_static::lazy_static;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub(crate) const BROKEN: usize = 0xdead;

    lazy_static! {
        // raw handle -> (retains, releases)
        static ref COUNTS: Mutex<HashMap<usize, (usize, usize)>> = Mutex::new(HashMap::new());
    }

    /// Retains and releases seen so far for a fake handle
    pub(crate) fn counts(raw: usize) -> (usize, usize) {
        COUNTS.lock().unwrap().get(&raw).copied().unwrap_or_default()
    }

    pub(crate) enum FakeKind {}

    impl HandleKindInternal for FakeKind {
        type Raw = usize;

        const RETAIN_CONTEXT: &'static str = "clRetainFake";
        const RELEASE_CONTEXT: &'static str = "clReleaseFake";

        unsafe fn retain(raw: usize) -> Result<()> {
            if raw == BROKEN {
                return Err(ApiError::new(CL_INVALID_MEM_OBJECT, Self::RETAIN_CONTEXT).into());
            }
            COUNTS.lock().unwrap().entry(raw).or_default().0 += 1;
            Ok(())
        }

        unsafe fn release(raw: usize) -> Result<()> {
            if raw == BROKEN {
                return Err(ApiError::new(CL_INVALID_MEM_OBJECT, Self::RELEASE_CONTEXT).into());
            }
            COUNTS.lock().unwrap().entry(raw).or_default().1 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_drop_releases_once() {
        let h = unsafe { Handle::<FakeKind>::from_raw(1) };
        assert_eq!(h.raw(), 1);
        drop(h);
        assert_eq!(counts(1), (0, 1));
    }

    #[test]
    fn test_clone_retains() {
        let a = unsafe { Handle::<FakeKind>::from_raw(2) };
        let b = a.try_clone().unwrap();
        assert_eq!(a, b);
        assert_eq!(counts(2), (1, 0));
        drop(a);
        drop(b);
        assert_eq!(counts(2), (1, 2));
    }

    #[test]
    fn test_retain_raw() {
        let h = unsafe { Handle::<FakeKind>::retain_raw(3).unwrap() };
        drop(h);
        assert_eq!(counts(3), (1, 1));

        let err = unsafe { Handle::<FakeKind>::retain_raw(BROKEN) }.unwrap_err();
        assert_eq!(err.api_error().unwrap().context(), "clRetainFake");
    }

    #[test]
    fn test_into_raw_skips_release() {
        let h = unsafe { Handle::<FakeKind>::from_raw(4) };
        assert_eq!(h.into_raw(), 4);
        assert_eq!(counts(4), (0, 0));
    }

    #[test]
    fn test_failed_release_does_not_panic() {
        let h = unsafe { Handle::<FakeKind>::from_raw(BROKEN) };
        drop(dbg!(h));
    }

    #[test]
    fn test_kind_contexts() {
        assert_eq!(DeviceKind::RELEASE_CONTEXT, "clReleaseDevice");
        assert_eq!(QueueKind::RETAIN_CONTEXT, "clRetainCommandQueue");
    }
}
