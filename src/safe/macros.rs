/// Convert an OpenCL status code into a `Result`, tagging errors with the name
/// of the API call that produced them
macro_rules! wrap_result {
    ( $ctx:expr => $e:expr ) => {{
        let result: crate::Result<()> = match $e {
            crate::raw::CL_SUCCESS => Ok(()),
            e => Err(crate::ApiError::new(e, $ctx).into()),
        };
        result
    }};
}

/// Get the entry points introduced in the given OpenCL version, or an
/// `UnsupportedVersion` error if the loaded library doesn't provide them
macro_rules! api_since {
    ( $ctx:expr => CL10 ) => {
        crate::util::api().map(|api| &api.CL10)
    };
    ( $ctx:expr => $ver:ident ) => {
        crate::util::api().and_then(|api| {
            api.$ver
                .as_ref()
                .ok_or(crate::Error::UnsupportedVersion {
                    expected: crate::raw::OpenCLVersion::$ver,
                    actual: api.version(),
                    context: $ctx,
                })
        })
    };
}

/// Define a bitfield type wrapping an OpenCL flag set
macro_rules! bitfield {
    (
        $( #[ $outer:meta ] )*
        pub struct $name:ident($raw:ty) {
            $(
                $( #[ $inner:meta ] )*
                pub const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $( #[ $outer ] )*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(transparent)]
        pub struct $name($raw);

        impl $name {
            $(
                $( #[ $inner ] )*
                pub const $flag: $name = $name($value);
            )*

            /// Get the raw value of this bitfield
            pub const fn raw(self) -> $raw {
                self.0
            }

            /// Wrap a raw value. Bits without a named constant are preserved.
            pub const fn from_raw(raw: $raw) -> Self {
                Self(raw)
            }

            /// Check whether every bit set in `other` is also set in `self`
            pub fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl std::fmt::Debug for $name {
            #[allow(unused_assignments)]
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let mut first = true;
                f.write_str(concat!(stringify!($name), "("))?;
                $(
                    if $value != 0 && self.0 & $value == $value {
                        if !first {
                            f.write_str(" | ")?;
                        }
                        first = false;
                        f.write_str(stringify!($flag))?;
                    }
                )*
                f.write_str(")")
            }
        }

        impl crate::util::FromOclInfo for $name {
            fn read<T: crate::util::OclInfo>(from: &T, param_name: T::Param) -> crate::Result<Self> {
                <$raw as crate::util::FromOclInfo>::read(from, param_name).map(Self)
            }
        }
    };
}

/// Define an enum wrapping a set of mutually exclusive OpenCL values
macro_rules! flag_enum {
    (
        $( #[ $outer:meta ] )*
        pub enum $name:ident($raw:ty) {
            $(
                $( #[ $inner:meta ] )*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $( #[ $outer ] )*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $( #[ $inner ] )*
                $variant,
            )*
        }

        impl $name {
            /// Get the raw OpenCL value of this variant
            pub fn raw(self) -> $raw {
                match self {
                    $( $name::$variant => $value, )*
                }
            }
        }

        impl std::convert::TryFrom<$raw> for $name {
            type Error = crate::Error;

            fn try_from(value: $raw) -> crate::Result<Self> {
                $(
                    if value == $value {
                        return Ok($name::$variant);
                    }
                )*

                Err(crate::Error::InvalidFlag {
                    value: value as crate::raw::cl_uint,
                    context: stringify!($name),
                })
            }
        }

        impl crate::util::FromOclInfo for $name {
            fn read<T: crate::util::OclInfo>(from: &T, param_name: T::Param) -> crate::Result<Self> {
                use std::convert::TryFrom;
                <$raw as crate::util::FromOclInfo>::read(from, param_name).and_then(Self::try_from)
            }
        }
    };
}

/// Generate typed accessor functions for OpenCL information queries
macro_rules! info_funcs {
    (
        $(
            $( #[ $outer:meta ] )*
            pub fn $name:ident(&self) -> $ret:ty = $param:ident;
        )*
    ) => {
        $(
            $( #[ $outer ] )*
            pub fn $name(&self) -> crate::Result<$ret> {
                crate::util::OclInfo::get_info(self, crate::raw::$param)
            }
        )*
    };
}

/// Implement `Debug` using the information table of an OpenCL object
macro_rules! info_debug {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl std::fmt::Debug for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    crate::util::OclInfo::info_fmt(self, f)
                }
            }
        )*
    };
}
