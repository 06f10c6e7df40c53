use crate::raw::{
    cl_bitfield, cl_bool, cl_int, cl_uint, cl_ulong, error_name, functions, InfoParam,
    OpenCLVersion, ValueKind, CL_FALSE,
};
use crate::{Error, Result};
use generic_array::typenum::{U4, U8};
use generic_array::{ArrayLength, GenericArray};
use libc::size_t;
use sealed::OclInfoInternal;
use std::convert::TryInto;
use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::mem::size_of;
use std::ptr::null_mut;

pub(crate) mod sealed {
    use crate::raw::{cl_int, InfoTable};
    use crate::Result;
    use libc::size_t;
    use std::ffi::c_void;
    use std::fmt::Debug;

    pub trait OclInfoInternal {
        type Param: Copy + PartialEq + Debug + 'static;

        const DEBUG_CONTEXT: &'static str;

        /// The table describing every query code accepted for this object
        fn info_table() -> &'static InfoTable<Self::Param>;

        unsafe fn raw_info_internal(
            &self,
            param_name: Self::Param,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> Result<cl_int>;
    }
}

/// A trait implemented by OpenCL wrapper types to provide access to OpenCL
/// information functions
pub trait OclInfo: sealed::OclInfoInternal {
    /// Get raw binary info from OpenCL about this object.
    ///
    /// This function performs two calls to the underlying `clGet___Info`
    /// function - one to determine the size of the information, and one to read
    /// the data once an appropriately-sized vector has been allocated to store
    /// it. If the reported size of the data changes between the two calls,
    /// `Error::InvalidDataLength` will be returned.
    ///
    /// If the size of the data is known at compile time, `get_info_raw_sized`
    /// should be preferred, as it only requires one call to `clGet___Info` and
    /// does not perform any heap allocations.
    fn get_info_raw(&self, param_name: Self::Param) -> Result<Vec<u8>> {
        unsafe {
            let mut size = 0;

            wrap_result!(Self::DEBUG_CONTEXT => self.raw_info_internal(
                param_name,
                0,
                null_mut(),
                &mut size as _
            )?)?;

            if size == 0 {
                return Ok(Vec::new());
            }

            let mut data = vec![0u8; size as usize];

            wrap_result!(Self::DEBUG_CONTEXT => self.raw_info_internal(
                param_name,
                size,
                data.as_mut_ptr() as *mut _,
                &mut size as _
            )?)?;

            if data.len() != size {
                return Err(Error::InvalidDataLength {
                    expected: data.len(),
                    actual: size,
                });
            }

            Ok(data)
        }
    }

    /// Get raw binary info from OpenCL about this object, with a constant size.
    ///
    /// If the size of the data as reported by OpenCL doesn't match the expected
    /// size as specified by the generic parameter, `Error::InvalidDataLength`
    /// will be returned.
    ///
    /// If the size of the data isn't known at compile time, `get_info_raw` can
    /// be used instead.
    fn get_info_raw_sized<L: ArrayLength<u8>>(
        &self,
        param_name: Self::Param,
    ) -> Result<GenericArray<u8, L>> {
        unsafe {
            let mut array = GenericArray::default();
            let mut size_ret = 0;

            wrap_result!(Self::DEBUG_CONTEXT => self.raw_info_internal(
                param_name,
                L::USIZE,
                array.as_mut_ptr() as _,
                &mut size_ret as _
            )?)?;

            if L::USIZE != size_ret {
                return Err(Error::InvalidDataLength {
                    expected: L::USIZE,
                    actual: size_ret,
                });
            }

            Ok(array)
        }
    }

    /// Get information about this object from OpenCL.
    ///
    /// This function will automatically convert the data to the type specified
    /// by the type parameter, but it's up to the programmer to ensure that this
    /// is the appropriate type for the given parameter.
    fn get_info<T: FromOclInfo>(&self, param_name: Self::Param) -> Result<T>
    where
        Self: Sized,
    {
        T::read(self, param_name)
    }

    /// Get information about this object, decoded according to the type
    /// recorded for the parameter in this object's information table.
    ///
    /// Parameters missing from the table are returned as raw bytes.
    fn get_info_value(&self, param_name: Self::Param) -> Result<InfoValue>
    where
        Self: Sized,
    {
        let kind = Self::info_table()
            .by_code(param_name)
            .map_or(ValueKind::Bytes, |p| p.kind);

        InfoValue::read(self, param_name, kind)
    }

    /// Query every parameter supported by the loaded OpenCL version.
    fn query_all(&self) -> Vec<(&'static InfoParam<Self::Param>, Result<InfoValue>)>
    where
        Self: Sized,
    {
        self.query_all_for(functions::system_version())
    }

    /// Query every parameter defined in the given OpenCL version, or every
    /// known parameter if no version is given.
    fn query_all_for(
        &self,
        version: Option<OpenCLVersion>,
    ) -> Vec<(&'static InfoParam<Self::Param>, Result<InfoValue>)>
    where
        Self: Sized,
    {
        Self::info_table()
            .iter()
            .filter(|p| version.map_or(true, |v| p.since <= v))
            .map(|p| (p, self.get_info_value(p.code)))
            .collect()
    }

    /// Format every supported parameter of this object as a debug struct.
    ///
    /// Queries which fail are shown as their error rather than aborting the
    /// whole output.
    fn info_fmt(&self, f: &mut Formatter) -> fmt::Result
    where
        Self: Sized,
    {
        let name = tynm::type_name::<Self>();
        let mut out = f.debug_struct(&name);

        for (param, value) in self.query_all() {
            match value {
                Ok(v) => out.field(param.name, &v),
                Err(e) => out.field(param.name, &e),
            };
        }

        out.finish()
    }
}

impl<T: sealed::OclInfoInternal> OclInfo for T {}

/// A trait to get OpenCL information and automatically convert it to a more
/// useful type.
pub trait FromOclInfo: Sized {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self>;
}

impl FromOclInfo for Vec<u8> {
    fn read<T: OclInfo>(from: &T, param_name: <T as OclInfoInternal>::Param) -> Result<Self> {
        from.get_info_raw(param_name)
    }
}

impl FromOclInfo for CString {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        let mut data = from.get_info_raw(param_name)?;

        if let Some(i) = data.iter().copied().position(|b| b == b'\0') {
            data.truncate(i);
        }

        Ok(CString::new(data)?)
    }
}

macro_rules! from_ne_bytes {
    ( $( $( #[ $attr:meta ] )* $ty:ty => $len:ty ),* $(,)? ) => {
        $(
            $( #[ $attr ] )*
            impl FromOclInfo for $ty {
                fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
                    let data = from.get_info_raw_sized::<$len>(param_name)?;
                    let mut bytes = [0u8; size_of::<$ty>()];
                    bytes.copy_from_slice(&data);
                    Ok(<$ty>::from_ne_bytes(bytes))
                }
            }
        )*
    };
}

from_ne_bytes! {
    cl_uint => U4,
    cl_int => U4,
    cl_ulong => U8,
    #[cfg(target_pointer_width = "64")]
    size_t => U8,
    #[cfg(target_pointer_width = "64")]
    isize => U8,
    #[cfg(target_pointer_width = "32")]
    size_t => U4,
    #[cfg(target_pointer_width = "32")]
    isize => U4,
}

impl FromOclInfo for bool {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        cl_bool::read(from, param_name).map(|b| b != CL_FALSE)
    }
}

fn read_array<T: OclInfo, E: Copy, const N: usize>(
    from: &T,
    param_name: T::Param,
    convert: fn([u8; N]) -> E,
) -> Result<Vec<E>> {
    let raw = from.get_info_raw(param_name)?;
    raw.chunks(N)
        .map(|c| {
            c.try_into()
                .map(convert)
                .map_err(|_| Error::InvalidDataLength {
                    expected: N,
                    actual: c.len(),
                })
        })
        .collect()
}

impl FromOclInfo for Vec<size_t> {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        read_array::<T, size_t, { size_of::<size_t>() }>(from, param_name, size_t::from_ne_bytes)
    }
}

/// Property lists are returned with their terminating zero key removed.
impl FromOclInfo for Vec<isize> {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        let mut list =
            read_array::<T, isize, { size_of::<isize>() }>(from, param_name, isize::from_ne_bytes)?;

        if let Some(end) = (0..list.len()).step_by(2).find(|&i| list[i] == 0) {
            list.truncate(end);
        }

        Ok(list)
    }
}

impl<P> FromOclInfo for *mut P {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        size_t::read(from, param_name).map(|p| p as _)
    }
}

impl<P> FromOclInfo for Vec<*mut P> {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        Ok(Vec::<size_t>::read(from, param_name)?
            .into_iter()
            .map(|p| p as _)
            .collect())
    }
}

/// A dynamically typed information value, decoded according to an
/// information table.
#[derive(Clone, PartialEq)]
pub enum InfoValue {
    Bytes(Vec<u8>),
    Str(CString),
    Bool(bool),
    UInt(cl_uint),
    ULong(cl_ulong),
    Size(size_t),
    Ptr(usize),
    PtrArray(Vec<usize>),
    SizeArray(Vec<size_t>),
    Properties(Vec<isize>),
    Enum {
        value: cl_uint,
        name: Option<&'static str>,
    },
    Status {
        value: cl_int,
        name: Option<&'static str>,
    },
    Bitfield {
        value: cl_bitfield,
        flags: Vec<&'static str>,
    },
}

impl InfoValue {
    fn read<T: OclInfo>(from: &T, param_name: T::Param, kind: ValueKind) -> Result<Self> {
        Ok(match kind {
            ValueKind::Bytes => InfoValue::Bytes(from.get_info(param_name)?),
            ValueKind::Str => InfoValue::Str(from.get_info(param_name)?),
            ValueKind::Bool => InfoValue::Bool(from.get_info(param_name)?),
            ValueKind::UInt => InfoValue::UInt(from.get_info(param_name)?),
            ValueKind::ULong => InfoValue::ULong(from.get_info(param_name)?),
            ValueKind::Size => InfoValue::Size(from.get_info(param_name)?),
            ValueKind::Ptr => InfoValue::Ptr(from.get_info(param_name)?),
            ValueKind::PtrArray => InfoValue::PtrArray(from.get_info(param_name)?),
            ValueKind::SizeArray => InfoValue::SizeArray(from.get_info(param_name)?),
            ValueKind::Properties => InfoValue::Properties(from.get_info(param_name)?),
            ValueKind::Enum(table) => {
                let value = from.get_info(param_name)?;
                InfoValue::Enum {
                    value,
                    name: table.name_of(value),
                }
            }
            ValueKind::Status(table) => {
                let value = from.get_info(param_name)?;
                InfoValue::Status {
                    value,
                    name: table.name_of(value).or_else(|| error_name(value)),
                }
            }
            ValueKind::Bitfield(table) => {
                let value = from.get_info(param_name)?;
                InfoValue::Bitfield {
                    value,
                    flags: table.flag_names(value),
                }
            }
        })
    }
}

impl Debug for InfoValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            InfoValue::Bytes(b) if b.len() > 32 => write!(f, "[{} bytes]", b.len()),
            InfoValue::Bytes(b) => write!(f, "{:?}", b),
            InfoValue::Str(s) => write!(f, "{:?}", s.to_string_lossy()),
            InfoValue::Bool(b) => write!(f, "{}", b),
            InfoValue::UInt(v) => write!(f, "{}", v),
            InfoValue::ULong(v) => write!(f, "{}", v),
            InfoValue::Size(v) => write!(f, "{}", v),
            InfoValue::Ptr(p) => write!(f, "{:#x}", p),
            InfoValue::PtrArray(ps) => f
                .debug_list()
                .entries(ps.iter().map(|p| format!("{:#x}", p)))
                .finish(),
            InfoValue::SizeArray(v) => write!(f, "{:?}", v),
            InfoValue::Properties(v) => write!(f, "{:?}", v),
            InfoValue::Enum {
                name: Some(name), ..
            } => f.write_str(name),
            InfoValue::Enum { value, name: None } => write!(f, "{:#x}", value),
            InfoValue::Status {
                name: Some(name), ..
            } => f.write_str(name),
            InfoValue::Status { value, name: None } => write!(f, "{}", value),
            InfoValue::Bitfield { value, flags } if flags.is_empty() => write!(f, "{:#x}", value),
            InfoValue::Bitfield { flags, .. } => f.write_str(&flags.join(" | ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::ffi::c_void;
    use std::ptr::copy_nonoverlapping;

    info_table! {
        pub static FAKE_INFO: InfoTable<cl_uint> = "clGetFakeInfo" {
            FAKE_NAME = 1 => Str,
            FAKE_COUNT = 2 => UInt,
            FAKE_TYPE = 3 => Bitfield(&DEVICE_TYPES),
            FAKE_STATUS = 4 => Status(&EXECUTION_STATUSES),
            FAKE_CACHE = 5 => Enum(&MEM_CACHE_TYPES),
            FAKE_PROPERTIES = 6 => Properties,
            #[since(CL21)]
            FAKE_TIMER = 7 => ULong,
        }
    }

    const FAKE_MISSING: cl_uint = 99;

    #[derive(Default)]
    struct FakeObject {
        values: HashMap<cl_uint, Vec<u8>>,
        calls: Cell<usize>,
        unstable_size: bool,
    }

    impl FakeObject {
        fn with(mut self, param: cl_uint, data: &[u8]) -> Self {
            self.values.insert(param, data.to_vec());
            self
        }
    }

    impl OclInfoInternal for FakeObject {
        type Param = cl_uint;

        const DEBUG_CONTEXT: &'static str = "clGetFakeInfo";

        fn info_table() -> &'static InfoTable<cl_uint> {
            &FAKE_INFO
        }

        unsafe fn raw_info_internal(
            &self,
            param_name: cl_uint,
            param_value_size: size_t,
            param_value: *mut c_void,
            param_value_size_ret: *mut size_t,
        ) -> Result<cl_int> {
            self.calls.set(self.calls.get() + 1);

            let data = match self.values.get(&param_name) {
                Some(d) => d,
                None => return Ok(CL_INVALID_VALUE),
            };

            let mut reported = data.len();

            if !param_value.is_null() {
                if param_value_size < data.len() {
                    return Ok(CL_INVALID_VALUE);
                }
                copy_nonoverlapping(data.as_ptr(), param_value as *mut u8, data.len());
                if self.unstable_size {
                    reported += 1;
                }
            }

            if !param_value_size_ret.is_null() {
                *param_value_size_ret = reported;
            }

            Ok(CL_SUCCESS)
        }
    }

    #[test]
    fn test_get_info_raw() {
        let obj = FakeObject::default().with(FAKE_NAME, b"fake\0");
        assert_eq!(obj.get_info_raw(FAKE_NAME).unwrap(), b"fake\0".to_vec());
        assert_eq!(obj.calls.get(), 2);
    }

    #[test]
    fn test_get_info_raw_empty() {
        let obj = FakeObject::default().with(FAKE_PROPERTIES, &[]);
        assert!(obj.get_info_raw(FAKE_PROPERTIES).unwrap().is_empty());
        assert_eq!(obj.calls.get(), 1);

        let props: Vec<isize> = obj.get_info(FAKE_PROPERTIES).unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_get_info_raw_size_changed() {
        let mut obj = FakeObject::default().with(FAKE_NAME, b"fake\0");
        obj.unstable_size = true;

        match obj.get_info_raw(FAKE_NAME) {
            Err(Error::InvalidDataLength { expected, actual }) => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 6);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_api_error_context() {
        let obj = FakeObject::default();
        let err = obj.get_info_raw(FAKE_MISSING).unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.code(), CL_INVALID_VALUE);
        assert_eq!(api.context(), "clGetFakeInfo");
    }

    #[test]
    fn test_sized_length_mismatch() {
        let obj = FakeObject::default().with(FAKE_COUNT, &7u32.to_ne_bytes());
        assert_eq!(obj.get_info::<cl_uint>(FAKE_COUNT).unwrap(), 7);

        match obj.get_info::<cl_ulong>(FAKE_COUNT) {
            Err(Error::InvalidDataLength { expected, actual }) => {
                assert_eq!(expected, 8);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_string_truncated_at_nul() {
        let obj = FakeObject::default().with(FAKE_NAME, b"abc\0garbage\0");
        let s: CString = obj.get_info(FAKE_NAME).unwrap();
        assert_eq!(s.to_str().unwrap(), "abc");
    }

    #[test]
    fn test_bool_and_arrays() {
        let mut sizes = Vec::new();
        for v in &[1usize, 2, 3] {
            sizes.extend_from_slice(&v.to_ne_bytes());
        }

        let obj = FakeObject::default()
            .with(FAKE_COUNT, &CL_TRUE.to_ne_bytes())
            .with(FAKE_NAME, &sizes)
            .with(FAKE_CACHE, &[1, 2, 3]);

        assert!(obj.get_info::<bool>(FAKE_COUNT).unwrap());
        assert_eq!(obj.get_info::<Vec<size_t>>(FAKE_NAME).unwrap(), vec![1, 2, 3]);
        assert!(obj.get_info::<Vec<size_t>>(FAKE_CACHE).is_err());
    }

    #[test]
    fn test_properties_terminated() {
        let mut raw = Vec::new();
        for v in &[0x1084isize, 0, 0x1088, 4, 0, 0x7777] {
            raw.extend_from_slice(&v.to_ne_bytes());
        }

        let obj = FakeObject::default().with(FAKE_PROPERTIES, &raw);
        let props: Vec<isize> = obj.get_info(FAKE_PROPERTIES).unwrap();
        assert_eq!(props, vec![0x1084, 0, 0x1088, 4]);
    }

    #[test]
    fn test_table_driven_values() {
        let obj = FakeObject::default()
            .with(FAKE_TYPE, &(CL_DEVICE_TYPE_CPU | CL_DEVICE_TYPE_GPU).to_ne_bytes())
            .with(FAKE_STATUS, &CL_RUNNING.to_ne_bytes())
            .with(FAKE_CACHE, &CL_READ_WRITE_CACHE.to_ne_bytes())
            .with(FAKE_MISSING, &[9, 8]);

        match obj.get_info_value(FAKE_TYPE).unwrap() {
            InfoValue::Bitfield { flags, .. } => {
                assert_eq!(flags, vec!["CL_DEVICE_TYPE_CPU", "CL_DEVICE_TYPE_GPU"])
            }
            other => panic!("unexpected value {:?}", other),
        }

        let status = obj.get_info_value(FAKE_STATUS).unwrap();
        assert_eq!(format!("{:?}", status), "CL_RUNNING");

        let cache = obj.get_info_value(FAKE_CACHE).unwrap();
        assert_eq!(format!("{:?}", cache), "CL_READ_WRITE_CACHE");

        assert_eq!(
            obj.get_info_value(FAKE_MISSING).unwrap(),
            InfoValue::Bytes(vec![9, 8])
        );
    }

    #[test]
    fn test_status_falls_back_to_error_name() {
        let obj = FakeObject::default().with(FAKE_STATUS, &CL_OUT_OF_RESOURCES.to_ne_bytes());
        let status = obj.get_info_value(FAKE_STATUS).unwrap();
        assert_eq!(format!("{:?}", status), "CL_OUT_OF_RESOURCES");
    }

    #[test]
    fn test_query_all_filters_by_version() {
        let obj = FakeObject::default()
            .with(FAKE_NAME, b"fake\0")
            .with(FAKE_COUNT, &3u32.to_ne_bytes());

        let cl12 = obj.query_all_for(Some(OpenCLVersion::CL12));
        assert_eq!(cl12.len(), FAKE_INFO.params.len() - 1);
        assert!(cl12.iter().all(|(p, _)| p.name != "FAKE_TIMER"));

        let all = obj.query_all_for(None);
        assert_eq!(all.len(), FAKE_INFO.params.len());

        let (_, name) = &all[0];
        assert_eq!(
            name.as_ref().unwrap(),
            &InfoValue::Str(CString::new("fake").unwrap())
        );
        assert!(all[2].1.is_err());
    }

    #[test]
    fn test_info_fmt_includes_errors() {
        struct Shown(FakeObject);

        impl Debug for Shown {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                self.0.info_fmt(f)
            }
        }

        let obj = FakeObject::default()
            .with(FAKE_NAME, b"fake\0")
            .with(FAKE_COUNT, &3u32.to_ne_bytes());

        let s = format!("{:?}", dbg!(Shown(obj)));
        assert!(s.starts_with("FakeObject"));
        assert!(s.contains("FAKE_NAME: \"fake\""));
        assert!(s.contains("FAKE_COUNT: 3"));
        assert!(s.contains("CL_INVALID_VALUE"));
    }
}
