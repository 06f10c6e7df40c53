//! Samplers
//!
//! A sampler describes how a kernel reads an image: coordinate normalization,
//! behaviour at the edges and interpolation.

use crate::context::Context;
use crate::raw::*;
use crate::util::{api, properties_list, Handle, OclInfoInternal, SamplerKind};
use crate::Result;
use libc::size_t;
use std::ffi::c_void;

/// An OpenCL sampler
#[derive(PartialEq, Eq, Hash)]
pub struct Sampler(pub(crate) Handle<SamplerKind>);

unsafe impl Sync for Sampler {}

info_debug!(Sampler);

impl OclInfoInternal for Sampler {
    type Param = cl_sampler_info;
    const DEBUG_CONTEXT: &'static str = "clGetSamplerInfo";

    fn info_table() -> &'static InfoTable<cl_sampler_info> {
        &SAMPLER_INFO
    }

    unsafe fn raw_info_internal(
        &self,
        param_name: Self::Param,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> Result<cl_int> {
        Ok(api()?.CL10.clGetSamplerInfo(
            self.raw(),
            param_name,
            param_value_size,
            param_value,
            param_value_size_ret,
        ))
    }
}

impl Sampler {
    pub fn raw(&self) -> cl_sampler {
        self.0.raw()
    }

    /// Wrap the given raw sampler handle, taking ownership of one reference
    ///
    /// # Safety
    ///
    /// The handle must be a valid OpenCL sampler whose reference is owned by
    /// the caller.
    pub unsafe fn from_raw(handle: cl_sampler) -> Self {
        Sampler(Handle::from_raw(handle))
    }

    pub fn try_clone(&self) -> Result<Self> {
        self.0.try_clone().map(Sampler)
    }

    info_funcs! {
        pub fn reference_count(&self) -> cl_uint = CL_SAMPLER_REFERENCE_COUNT;
        pub fn context_raw(&self) -> cl_context = CL_SAMPLER_CONTEXT;
        pub fn normalized_coords(&self) -> bool = CL_SAMPLER_NORMALIZED_COORDS;
        pub fn addressing_mode(&self) -> AddressingMode = CL_SAMPLER_ADDRESSING_MODE;
        pub fn filter_mode(&self) -> FilterMode = CL_SAMPLER_FILTER_MODE;
    }

    /// Get the context this sampler was created in
    pub fn context(&self) -> Result<Context> {
        unsafe { Handle::retain_raw(self.context_raw()?).map(Context) }
    }
}

flag_enum! {
    /// How out-of-range image coordinates are handled
    pub enum AddressingMode(cl_addressing_mode) {
        None = CL_ADDRESS_NONE,
        ClampToEdge = CL_ADDRESS_CLAMP_TO_EDGE,
        Clamp = CL_ADDRESS_CLAMP,
        Repeat = CL_ADDRESS_REPEAT,
        MirroredRepeat = CL_ADDRESS_MIRRORED_REPEAT,
    }
}

flag_enum! {
    /// How image reads between pixels are filtered
    pub enum FilterMode(cl_filter_mode) {
        Nearest = CL_FILTER_NEAREST,
        Linear = CL_FILTER_LINEAR,
    }
}

/// A sampler which hasn't been created yet
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct SamplerBuilder<'c> {
    context: &'c Context,
    normalized_coords: bool,
    addressing_mode: AddressingMode,
    filter_mode: FilterMode,
}

impl<'c> SamplerBuilder<'c> {
    /// Start building a sampler with normalized coordinates, clamped
    /// addressing and nearest filtering, matching OpenCL's own defaults.
    pub fn new(context: &'c Context) -> Self {
        Self {
            context,
            normalized_coords: true,
            addressing_mode: AddressingMode::Clamp,
            filter_mode: FilterMode::Nearest,
        }
    }

    pub fn normalized_coords(mut self, normalized_coords: bool) -> Self {
        self.normalized_coords = normalized_coords;
        self
    }

    pub fn addressing_mode(mut self, addressing_mode: AddressingMode) -> Self {
        self.addressing_mode = addressing_mode;
        self
    }

    pub fn filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    fn properties(&self) -> Vec<cl_sampler_properties> {
        properties_list(&[
            (
                CL_SAMPLER_PROPERTY_NORMALIZED_COORDS,
                self.normalized_coords as cl_sampler_properties,
            ),
            (
                CL_SAMPLER_PROPERTY_ADDRESSING_MODE,
                self.addressing_mode.raw() as cl_sampler_properties,
            ),
            (
                CL_SAMPLER_PROPERTY_FILTER_MODE,
                self.filter_mode.raw() as cl_sampler_properties,
            ),
        ])
    }

    /// Create the sampler, using `clCreateSamplerWithProperties` when the
    /// loaded library supports OpenCL 2.0
    pub fn build(self) -> Result<Sampler> {
        let api = api()?;

        unsafe {
            let mut err = CL_SUCCESS;

            let (raw, context) = match &api.CL20 {
                Some(cl20) => {
                    let props = self.properties();
                    let raw = cl20.clCreateSamplerWithProperties(
                        self.context.raw(),
                        props.as_ptr(),
                        &mut err,
                    );
                    (raw, "clCreateSamplerWithProperties")
                }
                None => {
                    let raw = api.CL10.clCreateSampler(
                        self.context.raw(),
                        if self.normalized_coords {
                            CL_TRUE
                        } else {
                            CL_FALSE
                        },
                        self.addressing_mode.raw(),
                        self.filter_mode.raw(),
                        &mut err,
                    );
                    (raw, "clCreateSampler")
                }
            };

            wrap_result!(context => err)?;
            Ok(Sampler::from_raw(raw))
        }
    }
}

impl Context {
    /// Start building a sampler for this context
    pub fn sampler_builder(&self) -> SamplerBuilder {
        SamplerBuilder::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;
    use std::ptr::null_mut;

    #[test]
    fn test_sampler_properties() {
        let context = unsafe { Context::from_raw(null_mut()) };

        let props = context
            .sampler_builder()
            .normalized_coords(false)
            .addressing_mode(AddressingMode::Repeat)
            .filter_mode(FilterMode::Linear)
            .properties();

        assert_eq!(
            dbg!(props),
            vec![
                CL_SAMPLER_PROPERTY_NORMALIZED_COORDS,
                0,
                CL_SAMPLER_PROPERTY_ADDRESSING_MODE,
                CL_ADDRESS_REPEAT as cl_sampler_properties,
                CL_SAMPLER_PROPERTY_FILTER_MODE,
                CL_FILTER_LINEAR as cl_sampler_properties,
                0,
            ]
        );

        let defaults = context.sampler_builder().properties();
        assert_eq!(defaults[1], 1);
        assert_eq!(defaults[3], CL_ADDRESS_CLAMP as cl_sampler_properties);

        std::mem::forget(context);
    }

    #[test]
    fn test_modes() {
        assert_eq!(
            AddressingMode::try_from(CL_ADDRESS_MIRRORED_REPEAT).unwrap(),
            AddressingMode::MirroredRepeat
        );
        assert_eq!(FilterMode::Linear.raw(), CL_FILTER_LINEAR);
        assert!(FilterMode::try_from(0).is_err());
    }
}
