/// Create a new opaque type
macro_rules! opaque_type {
    ( $name:ident ) => {
        #[doc(hidden)]
        #[allow(non_camel_case_types)]
        pub struct $name {
            _opaque: (),
        }
    };

    ( $( $name:ident),* $(,)? ) => {
        $( opaque_type!{$name} )*
    };
}

/// Define OpenCL error code constants and a function to get the name of an
/// error code
macro_rules! error_codes {
    ( $($name:ident = $value:expr),* $(,)? ) => {
        $( pub const $name: crate::raw::cl_int = $value; )*

        /// Get the name of an OpenCL error code, returning `None` if the error
        /// code is unknown
        pub fn error_name(code: crate::raw::cl_int) -> Option<&'static str> {
            match code {
                $($name => Some(stringify!($name)),)*
                _ => None,
            }
        }

        /// Every error code known to this crate, by name
        pub static ERROR_CODES: crate::raw::ConstTable<crate::raw::cl_int> = crate::raw::ConstTable {
            name: "ERROR_CODES",
            entries: &[ $( (stringify!($name), $name) ),* ],
        };
    };
}

/// Group previously defined constants into a named lookup table
macro_rules! const_table {
    (
        $(
            $( #[ $outer:meta ] )*
            pub static $table:ident : ConstTable<$ty:ty> = [ $( $name:ident ),* $(,)? ];
        )*
    ) => {
        $(
            $( #[ $outer ] )*
            pub static $table: crate::raw::ConstTable<$ty> = crate::raw::ConstTable {
                name: stringify!($table),
                entries: &[ $( (stringify!($name), $name) ),* ],
            };
        )*
    };
}

macro_rules! info_since {
    () => {
        crate::raw::OpenCLVersion::CL10
    };
    ( $ver:ident ) => {
        crate::raw::OpenCLVersion::$ver
    };
}

/// Define the query codes of one information category, along with a table
/// describing the value type returned for each code
macro_rules! info_table {
    (
        $( #[ $outer:meta ] )*
        pub static $table:ident : InfoTable<$pty:ty> = $entry:literal {
            $(
                $( #[since($ver:ident)] )?
                $name:ident = $value:expr => $kind:expr
            ),* $(,)?
        }
    ) => {
        $( pub const $name: $pty = $value; )*

        $( #[ $outer ] )*
        pub static $table: crate::raw::InfoTable<$pty> = crate::raw::InfoTable {
            name: stringify!($table),
            entrypoint: $entry,
            params: &[
                $(
                    crate::raw::InfoParam {
                        name: stringify!($name),
                        code: $name,
                        kind: {
                            #[allow(unused_imports)]
                            use crate::raw::ValueKind::*;
                            $kind
                        },
                        since: info_since!($( $ver )?),
                    },
                )*
            ],
        };
    };
}

/// Define raw OpenCL function bindings
macro_rules! raw_functions {
    (
        $(
             $apiname:ident : $apity:ty {
                $(
                    fn $fname:ident ( $( $pname:ident : $pty:ty ),* $(,)? ) $( -> $rty:ty )? ;
                )*
            }
        )*
    ) => {
        use dlopen_derive::{WrapperApi, WrapperMultiApi};
        use dlopen::wrapper::{WrapperApi, WrapperMultiApi};

        $(
            #[derive(WrapperApi)]
            pub struct $apiname {
                $(
                    $fname: unsafe extern "C" fn ( $( $pname : $pty ),* ) $( -> $rty )*
                ),*
            }

            impl std::fmt::Debug for $apiname {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    f.debug_struct(stringify!($apiname))
                        $( .field(stringify!($fname), &(self.$fname as *const ())) )*
                        .finish()
                }
            }
        )*

        #[derive(Debug, WrapperMultiApi)]
        pub struct RawOpenCL {
            $( pub $apiname: $apity, )*
        }
    }
}

#[cfg(test)]
mod tests {
    use dlopen::wrapper::Container;
    use libc::{c_char, c_int, size_t};

    #[allow(non_snake_case)]
    mod libc_api {
        use super::*;

        raw_functions! {
            Required: Required {
                fn strlen(s: *const c_char) -> size_t;
                fn abs(i: c_int) -> c_int;
            }
            Missing: Option<Missing> {
                fn ocl_query_missing_entry_point() -> c_int;
            }
        }
    }

    #[test]
    fn test_raw_functions_call_loaded_entry_points() {
        let api = unsafe { Container::<libc_api::RawOpenCL>::load_self() }.unwrap();
        let text = b"hello\0";

        unsafe {
            assert_eq!(api.Required.strlen(text.as_ptr() as *const c_char), 5);
            assert_eq!(api.Required.abs(-3), 3);
        }

        assert!(api.Missing.is_none());
        assert!(dbg!(format!("{:?}", api.Required)).contains("strlen"));
    }
}
