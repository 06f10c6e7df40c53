use crate::raw::{cl_bitfield, cl_int, cl_uint, OpenCLVersion};

/// A named group of related constants, such as the members of an enumeration
/// or the bits of a flag set.
#[derive(Debug)]
pub struct ConstTable<T: 'static> {
    pub name: &'static str,
    pub entries: &'static [(&'static str, T)],
}

impl<T: Copy + PartialEq> ConstTable<T> {
    /// Get the name of the first entry with the given value
    pub fn name_of(&self, value: T) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| *name)
    }

    /// Get the value of the entry with the given name
    pub fn value_of(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Iterate over the entries of this table, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &'static (&'static str, T)> {
        self.entries.iter()
    }
}

impl ConstTable<cl_bitfield> {
    /// Get the names of every non-zero flag fully contained in `bits`.
    pub fn flag_names(&self, bits: cl_bitfield) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v != 0 && bits & *v == *v)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// The type of value returned by OpenCL for a given information query.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    /// Arbitrary binary data
    Bytes,
    /// A null-terminated string
    Str,
    /// A `cl_bool`
    Bool,
    /// A `cl_uint`
    UInt,
    /// A `cl_ulong`
    ULong,
    /// A `size_t`
    Size,
    /// A single handle or host pointer
    Ptr,
    /// An array of handles
    PtrArray,
    /// An array of `size_t`
    SizeArray,
    /// A zero-terminated property list of `intptr_t`
    Properties,
    /// A `cl_uint` enumeration value
    Enum(&'static ConstTable<cl_uint>),
    /// A `cl_int` status value
    Status(&'static ConstTable<cl_int>),
    /// A `cl_bitfield` flag set
    Bitfield(&'static ConstTable<cl_bitfield>),
}

/// A single information query code.
#[derive(Debug)]
pub struct InfoParam<P: 'static> {
    /// Symbolic name, e.g. `CL_DEVICE_NAME`
    pub name: &'static str,
    /// Numeric code passed to the `clGet*Info` function
    pub code: P,
    /// Type of the returned value
    pub kind: ValueKind,
    /// Earliest OpenCL version defining this code
    pub since: OpenCLVersion,
}

/// All information query codes for one category of OpenCL object.
#[derive(Debug)]
pub struct InfoTable<P: 'static> {
    pub name: &'static str,
    /// The `clGet*Info` entry point that accepts these codes
    pub entrypoint: &'static str,
    pub params: &'static [InfoParam<P>],
}

impl<P: Copy + PartialEq> InfoTable<P> {
    pub fn by_code(&self, code: P) -> Option<&'static InfoParam<P>> {
        self.params.iter().find(|p| p.code == code)
    }

    pub fn by_name(&self, name: &str) -> Option<&'static InfoParam<P>> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static InfoParam<P>> {
        self.params.iter()
    }

    /// Iterate over the codes available in the given OpenCL version.
    pub fn supported(
        &self,
        version: OpenCLVersion,
    ) -> impl Iterator<Item = &'static InfoParam<P>> {
        self.params.iter().filter(move |p| p.since <= version)
    }
}

#[cfg(test)]
mod tests {
    use crate::raw::*;
    use std::collections::HashSet;

    fn all_tables() -> Vec<(&'static str, Vec<(&'static str, cl_uint)>)> {
        fn collect(t: &'static InfoTable<cl_uint>) -> (&'static str, Vec<(&'static str, cl_uint)>) {
            (t.name, t.iter().map(|p| (p.name, p.code)).collect())
        }

        vec![
            collect(&PLATFORM_INFO),
            collect(&DEVICE_INFO),
            collect(&CONTEXT_INFO),
            collect(&COMMAND_QUEUE_INFO),
            collect(&MEM_INFO),
            collect(&SAMPLER_INFO),
            collect(&PROGRAM_INFO),
            collect(&PROGRAM_BUILD_INFO),
            collect(&KERNEL_INFO),
            collect(&KERNEL_ARG_INFO),
            collect(&KERNEL_WORK_GROUP_INFO),
            collect(&EVENT_INFO),
            collect(&PROFILING_INFO),
        ]
    }

    #[test]
    fn test_info_codes_unique_within_table() {
        for (name, params) in all_tables() {
            let codes: HashSet<_> = params.iter().map(|(_, c)| *c).collect();
            assert_eq!(codes.len(), params.len(), "duplicate code in {}", name);
        }
    }

    #[test]
    fn test_info_names_unique() {
        let mut seen = HashSet::new();
        for (_, params) in all_tables() {
            for (name, _) in params {
                assert!(seen.insert(name), "duplicate name {}", name);
            }
        }
    }

    #[test]
    fn test_lookup_by_code_and_name() {
        let p = DEVICE_INFO.by_code(0x102B).unwrap();
        assert_eq!(p.name, "CL_DEVICE_NAME");
        assert_eq!(DEVICE_INFO.by_name("CL_DEVICE_NAME").unwrap().code, CL_DEVICE_NAME);
        assert!(PLATFORM_INFO.by_code(0x1000).is_none());
        assert_eq!(PLATFORM_INFO.entrypoint, "clGetPlatformInfo");
    }

    #[test]
    fn test_well_known_codes() {
        assert_eq!(CL_PLATFORM_PROFILE, 0x0900);
        assert_eq!(CL_DEVICE_TYPE, 0x1000);
        assert_eq!(CL_CONTEXT_REFERENCE_COUNT, 0x1080);
        assert_eq!(CL_QUEUE_CONTEXT, 0x1090);
        assert_eq!(CL_MEM_TYPE, 0x1100);
        assert_eq!(CL_SAMPLER_REFERENCE_COUNT, 0x1150);
        assert_eq!(CL_PROGRAM_REFERENCE_COUNT, 0x1160);
        assert_eq!(CL_KERNEL_FUNCTION_NAME, 0x1190);
        assert_eq!(CL_EVENT_COMMAND_QUEUE, 0x11D0);
        assert_eq!(CL_PROFILING_COMMAND_QUEUED, 0x1280);
    }

    #[test]
    fn test_supported_filters_by_version() {
        let cl10: Vec<_> = PLATFORM_INFO.supported(OpenCLVersion::CL10).collect();
        assert!(cl10.iter().all(|p| p.name != "CL_PLATFORM_HOST_TIMER_RESOLUTION"));
        assert_eq!(
            PLATFORM_INFO.supported(OpenCLVersion::CL21).count(),
            PLATFORM_INFO.params.len()
        );
    }

    #[test]
    fn test_const_table_lookup() {
        assert_eq!(MEM_CACHE_TYPES.name_of(CL_READ_ONLY_CACHE), Some("CL_READ_ONLY_CACHE"));
        assert_eq!(MEM_CACHE_TYPES.value_of("CL_READ_WRITE_CACHE"), Some(CL_READ_WRITE_CACHE));
        assert_eq!(MEM_CACHE_TYPES.name_of(0xdead), None);
        assert_eq!(BUILD_STATUSES.name_of(-2), Some("CL_BUILD_ERROR"));
    }

    #[test]
    fn test_flag_names() {
        let names = DEVICE_TYPES.flag_names(CL_DEVICE_TYPE_CPU | CL_DEVICE_TYPE_GPU);
        assert_eq!(names, vec!["CL_DEVICE_TYPE_CPU", "CL_DEVICE_TYPE_GPU"]);
        assert!(DEVICE_TYPES.flag_names(0).is_empty());
        assert!(DEVICE_TYPES
            .flag_names(CL_DEVICE_TYPE_ALL)
            .contains(&"CL_DEVICE_TYPE_ACCELERATOR"));
    }

    #[test]
    fn test_error_names() {
        assert_eq!(error_name(CL_SUCCESS), Some("CL_SUCCESS"));
        assert_eq!(error_name(-30), Some("CL_INVALID_VALUE"));
        assert_eq!(error_name(-1000), None);
        assert_eq!(ERROR_CODES.value_of("CL_INVALID_KERNEL_ARGS"), Some(-52));
    }
}
