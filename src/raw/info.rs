//! Information query codes, one table per `clGet*Info` entry point.

use crate::raw::constants::*;
use crate::raw::types::*;

info_table! {
    /// Codes accepted by `clGetPlatformInfo`
    pub static PLATFORM_INFO: InfoTable<cl_platform_info> = "clGetPlatformInfo" {
        CL_PLATFORM_PROFILE = 0x0900 => Str,
        CL_PLATFORM_VERSION = 0x0901 => Str,
        CL_PLATFORM_NAME = 0x0902 => Str,
        CL_PLATFORM_VENDOR = 0x0903 => Str,
        CL_PLATFORM_EXTENSIONS = 0x0904 => Str,
        #[since(CL21)]
        CL_PLATFORM_HOST_TIMER_RESOLUTION = 0x0905 => ULong,
    }
}

info_table! {
    /// Codes accepted by `clGetDeviceInfo`
    pub static DEVICE_INFO: InfoTable<cl_device_info> = "clGetDeviceInfo" {
        CL_DEVICE_TYPE = 0x1000 => Bitfield(&DEVICE_TYPES),
        CL_DEVICE_VENDOR_ID = 0x1001 => UInt,
        CL_DEVICE_MAX_COMPUTE_UNITS = 0x1002 => UInt,
        CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS = 0x1003 => UInt,
        CL_DEVICE_MAX_WORK_GROUP_SIZE = 0x1004 => Size,
        CL_DEVICE_MAX_WORK_ITEM_SIZES = 0x1005 => SizeArray,
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_CHAR = 0x1006 => UInt,
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_SHORT = 0x1007 => UInt,
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_INT = 0x1008 => UInt,
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_LONG = 0x1009 => UInt,
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT = 0x100A => UInt,
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE = 0x100B => UInt,
        CL_DEVICE_MAX_CLOCK_FREQUENCY = 0x100C => UInt,
        CL_DEVICE_ADDRESS_BITS = 0x100D => UInt,
        CL_DEVICE_MAX_READ_IMAGE_ARGS = 0x100E => UInt,
        CL_DEVICE_MAX_WRITE_IMAGE_ARGS = 0x100F => UInt,
        CL_DEVICE_MAX_MEM_ALLOC_SIZE = 0x1010 => ULong,
        CL_DEVICE_IMAGE2D_MAX_WIDTH = 0x1011 => Size,
        CL_DEVICE_IMAGE2D_MAX_HEIGHT = 0x1012 => Size,
        CL_DEVICE_IMAGE3D_MAX_WIDTH = 0x1013 => Size,
        CL_DEVICE_IMAGE3D_MAX_HEIGHT = 0x1014 => Size,
        CL_DEVICE_IMAGE3D_MAX_DEPTH = 0x1015 => Size,
        CL_DEVICE_IMAGE_SUPPORT = 0x1016 => Bool,
        CL_DEVICE_MAX_PARAMETER_SIZE = 0x1017 => Size,
        CL_DEVICE_MAX_SAMPLERS = 0x1018 => UInt,
        CL_DEVICE_MEM_BASE_ADDR_ALIGN = 0x1019 => UInt,
        CL_DEVICE_MIN_DATA_TYPE_ALIGN_SIZE = 0x101A => UInt,
        CL_DEVICE_SINGLE_FP_CONFIG = 0x101B => Bitfield(&FP_CONFIG_FLAGS),
        CL_DEVICE_GLOBAL_MEM_CACHE_TYPE = 0x101C => Enum(&MEM_CACHE_TYPES),
        CL_DEVICE_GLOBAL_MEM_CACHELINE_SIZE = 0x101D => UInt,
        CL_DEVICE_GLOBAL_MEM_CACHE_SIZE = 0x101E => ULong,
        CL_DEVICE_GLOBAL_MEM_SIZE = 0x101F => ULong,
        CL_DEVICE_MAX_CONSTANT_BUFFER_SIZE = 0x1020 => ULong,
        CL_DEVICE_MAX_CONSTANT_ARGS = 0x1021 => UInt,
        CL_DEVICE_LOCAL_MEM_TYPE = 0x1022 => Enum(&LOCAL_MEM_TYPES),
        CL_DEVICE_LOCAL_MEM_SIZE = 0x1023 => ULong,
        CL_DEVICE_ERROR_CORRECTION_SUPPORT = 0x1024 => Bool,
        CL_DEVICE_PROFILING_TIMER_RESOLUTION = 0x1025 => Size,
        CL_DEVICE_ENDIAN_LITTLE = 0x1026 => Bool,
        CL_DEVICE_AVAILABLE = 0x1027 => Bool,
        CL_DEVICE_COMPILER_AVAILABLE = 0x1028 => Bool,
        CL_DEVICE_EXECUTION_CAPABILITIES = 0x1029 => Bitfield(&EXEC_CAPABILITY_FLAGS),
        CL_DEVICE_QUEUE_ON_HOST_PROPERTIES = 0x102A => Bitfield(&QUEUE_PROPERTY_FLAGS),
        CL_DEVICE_NAME = 0x102B => Str,
        CL_DEVICE_VENDOR = 0x102C => Str,
        CL_DRIVER_VERSION = 0x102D => Str,
        CL_DEVICE_PROFILE = 0x102E => Str,
        CL_DEVICE_VERSION = 0x102F => Str,
        CL_DEVICE_EXTENSIONS = 0x1030 => Str,
        CL_DEVICE_PLATFORM = 0x1031 => Ptr,
        CL_DEVICE_DOUBLE_FP_CONFIG = 0x1032 => Bitfield(&FP_CONFIG_FLAGS),
        #[since(CL11)]
        CL_DEVICE_PREFERRED_VECTOR_WIDTH_HALF = 0x1034 => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_CHAR = 0x1036 => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_SHORT = 0x1037 => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_INT = 0x1038 => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_LONG = 0x1039 => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_FLOAT = 0x103A => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_DOUBLE = 0x103B => UInt,
        #[since(CL11)]
        CL_DEVICE_NATIVE_VECTOR_WIDTH_HALF = 0x103C => UInt,
        #[since(CL11)]
        CL_DEVICE_OPENCL_C_VERSION = 0x103D => Str,
        #[since(CL12)]
        CL_DEVICE_LINKER_AVAILABLE = 0x103E => Bool,
        #[since(CL12)]
        CL_DEVICE_BUILT_IN_KERNELS = 0x103F => Str,
        #[since(CL12)]
        CL_DEVICE_IMAGE_MAX_BUFFER_SIZE = 0x1040 => Size,
        #[since(CL12)]
        CL_DEVICE_IMAGE_MAX_ARRAY_SIZE = 0x1041 => Size,
        #[since(CL12)]
        CL_DEVICE_PARENT_DEVICE = 0x1042 => Ptr,
        #[since(CL12)]
        CL_DEVICE_PARTITION_MAX_SUB_DEVICES = 0x1043 => UInt,
        #[since(CL12)]
        CL_DEVICE_PARTITION_PROPERTIES = 0x1044 => Properties,
        #[since(CL12)]
        CL_DEVICE_PARTITION_AFFINITY_DOMAIN = 0x1045 => Bitfield(&AFFINITY_DOMAIN_FLAGS),
        #[since(CL12)]
        CL_DEVICE_PARTITION_TYPE = 0x1046 => Properties,
        #[since(CL12)]
        CL_DEVICE_REFERENCE_COUNT = 0x1047 => UInt,
        #[since(CL12)]
        CL_DEVICE_PREFERRED_INTEROP_USER_SYNC = 0x1048 => Bool,
        #[since(CL12)]
        CL_DEVICE_PRINTF_BUFFER_SIZE = 0x1049 => Size,
        #[since(CL20)]
        CL_DEVICE_IMAGE_PITCH_ALIGNMENT = 0x104A => UInt,
        #[since(CL20)]
        CL_DEVICE_IMAGE_BASE_ADDRESS_ALIGNMENT = 0x104B => UInt,
        #[since(CL20)]
        CL_DEVICE_MAX_READ_WRITE_IMAGE_ARGS = 0x104C => UInt,
        #[since(CL20)]
        CL_DEVICE_MAX_GLOBAL_VARIABLE_SIZE = 0x104D => Size,
        #[since(CL20)]
        CL_DEVICE_QUEUE_ON_DEVICE_PROPERTIES = 0x104E => Bitfield(&QUEUE_PROPERTY_FLAGS),
        #[since(CL20)]
        CL_DEVICE_QUEUE_ON_DEVICE_PREFERRED_SIZE = 0x104F => UInt,
        #[since(CL20)]
        CL_DEVICE_QUEUE_ON_DEVICE_MAX_SIZE = 0x1050 => UInt,
        #[since(CL20)]
        CL_DEVICE_MAX_ON_DEVICE_QUEUES = 0x1051 => UInt,
        #[since(CL20)]
        CL_DEVICE_MAX_ON_DEVICE_EVENTS = 0x1052 => UInt,
        #[since(CL20)]
        CL_DEVICE_SVM_CAPABILITIES = 0x1053 => Bitfield(&SVM_CAPABILITY_FLAGS),
        #[since(CL20)]
        CL_DEVICE_GLOBAL_VARIABLE_PREFERRED_TOTAL_SIZE = 0x1054 => Size,
        #[since(CL20)]
        CL_DEVICE_MAX_PIPE_ARGS = 0x1055 => UInt,
        #[since(CL20)]
        CL_DEVICE_PIPE_MAX_ACTIVE_RESERVATIONS = 0x1056 => UInt,
        #[since(CL20)]
        CL_DEVICE_PIPE_MAX_PACKET_SIZE = 0x1057 => UInt,
        #[since(CL20)]
        CL_DEVICE_PREFERRED_PLATFORM_ATOMIC_ALIGNMENT = 0x1058 => UInt,
        #[since(CL20)]
        CL_DEVICE_PREFERRED_GLOBAL_ATOMIC_ALIGNMENT = 0x1059 => UInt,
        #[since(CL20)]
        CL_DEVICE_PREFERRED_LOCAL_ATOMIC_ALIGNMENT = 0x105A => UInt,
        #[since(CL21)]
        CL_DEVICE_IL_VERSION = 0x105B => Str,
        #[since(CL21)]
        CL_DEVICE_MAX_NUM_SUB_GROUPS = 0x105C => UInt,
        #[since(CL21)]
        CL_DEVICE_SUB_GROUP_INDEPENDENT_FORWARD_PROGRESS = 0x105D => Bool,
    }
}

info_table! {
    /// Codes accepted by `clGetContextInfo`
    pub static CONTEXT_INFO: InfoTable<cl_context_info> = "clGetContextInfo" {
        CL_CONTEXT_REFERENCE_COUNT = 0x1080 => UInt,
        CL_CONTEXT_DEVICES = 0x1081 => PtrArray,
        CL_CONTEXT_PROPERTIES = 0x1082 => Properties,
        #[since(CL11)]
        CL_CONTEXT_NUM_DEVICES = 0x1083 => UInt,
    }
}

info_table! {
    /// Codes accepted by `clGetCommandQueueInfo`
    pub static COMMAND_QUEUE_INFO: InfoTable<cl_command_queue_info> = "clGetCommandQueueInfo" {
        CL_QUEUE_CONTEXT = 0x1090 => Ptr,
        CL_QUEUE_DEVICE = 0x1091 => Ptr,
        CL_QUEUE_REFERENCE_COUNT = 0x1092 => UInt,
        CL_QUEUE_PROPERTIES = 0x1093 => Bitfield(&QUEUE_PROPERTY_FLAGS),
        #[since(CL20)]
        CL_QUEUE_SIZE = 0x1094 => UInt,
        #[since(CL21)]
        CL_QUEUE_DEVICE_DEFAULT = 0x1095 => Ptr,
    }
}

info_table! {
    /// Codes accepted by `clGetMemObjectInfo`
    pub static MEM_INFO: InfoTable<cl_mem_info> = "clGetMemObjectInfo" {
        CL_MEM_TYPE = 0x1100 => Enum(&MEM_OBJECT_TYPES),
        CL_MEM_FLAGS = 0x1101 => Bitfield(&MEM_FLAGS),
        CL_MEM_SIZE = 0x1102 => Size,
        CL_MEM_HOST_PTR = 0x1103 => Ptr,
        CL_MEM_MAP_COUNT = 0x1104 => UInt,
        CL_MEM_REFERENCE_COUNT = 0x1105 => UInt,
        CL_MEM_CONTEXT = 0x1106 => Ptr,
        #[since(CL11)]
        CL_MEM_ASSOCIATED_MEMOBJECT = 0x1107 => Ptr,
        #[since(CL11)]
        CL_MEM_OFFSET = 0x1108 => Size,
        #[since(CL20)]
        CL_MEM_USES_SVM_POINTER = 0x1109 => Bool,
    }
}

info_table! {
    /// Codes accepted by `clGetSamplerInfo`
    pub static SAMPLER_INFO: InfoTable<cl_sampler_info> = "clGetSamplerInfo" {
        CL_SAMPLER_REFERENCE_COUNT = 0x1150 => UInt,
        CL_SAMPLER_CONTEXT = 0x1151 => Ptr,
        CL_SAMPLER_NORMALIZED_COORDS = 0x1152 => Bool,
        CL_SAMPLER_ADDRESSING_MODE = 0x1153 => Enum(&ADDRESSING_MODES),
        CL_SAMPLER_FILTER_MODE = 0x1154 => Enum(&FILTER_MODES),
    }
}

/// Requires caller-allocated output buffers, so it is not part of the
/// `PROGRAM_INFO` table.
pub const CL_PROGRAM_BINARIES: cl_program_info = 0x1166;

info_table! {
    /// Codes accepted by `clGetProgramInfo`
    pub static PROGRAM_INFO: InfoTable<cl_program_info> = "clGetProgramInfo" {
        CL_PROGRAM_REFERENCE_COUNT = 0x1160 => UInt,
        CL_PROGRAM_CONTEXT = 0x1161 => Ptr,
        CL_PROGRAM_NUM_DEVICES = 0x1162 => UInt,
        CL_PROGRAM_DEVICES = 0x1163 => PtrArray,
        CL_PROGRAM_SOURCE = 0x1164 => Str,
        CL_PROGRAM_BINARY_SIZES = 0x1165 => SizeArray,
        #[since(CL12)]
        CL_PROGRAM_NUM_KERNELS = 0x1167 => Size,
        #[since(CL12)]
        CL_PROGRAM_KERNEL_NAMES = 0x1168 => Str,
        #[since(CL21)]
        CL_PROGRAM_IL = 0x1169 => Bytes,
    }
}

info_table! {
    /// Codes accepted by `clGetProgramBuildInfo`
    pub static PROGRAM_BUILD_INFO: InfoTable<cl_program_build_info> = "clGetProgramBuildInfo" {
        CL_PROGRAM_BUILD_STATUS = 0x1181 => Status(&BUILD_STATUSES),
        CL_PROGRAM_BUILD_OPTIONS = 0x1182 => Str,
        CL_PROGRAM_BUILD_LOG = 0x1183 => Str,
        #[since(CL12)]
        CL_PROGRAM_BINARY_TYPE = 0x1184 => Enum(&PROGRAM_BINARY_TYPES),
        #[since(CL20)]
        CL_PROGRAM_BUILD_GLOBAL_VARIABLE_TOTAL_SIZE = 0x1185 => Size,
    }
}

info_table! {
    /// Codes accepted by `clGetKernelInfo`
    pub static KERNEL_INFO: InfoTable<cl_kernel_info> = "clGetKernelInfo" {
        CL_KERNEL_FUNCTION_NAME = 0x1190 => Str,
        CL_KERNEL_NUM_ARGS = 0x1191 => UInt,
        CL_KERNEL_REFERENCE_COUNT = 0x1192 => UInt,
        CL_KERNEL_CONTEXT = 0x1193 => Ptr,
        CL_KERNEL_PROGRAM = 0x1194 => Ptr,
        #[since(CL12)]
        CL_KERNEL_ATTRIBUTES = 0x1195 => Str,
    }
}

info_table! {
    /// Codes accepted by `clGetKernelArgInfo`
    pub static KERNEL_ARG_INFO: InfoTable<cl_kernel_arg_info> = "clGetKernelArgInfo" {
        #[since(CL12)]
        CL_KERNEL_ARG_ADDRESS_QUALIFIER = 0x1196 => Enum(&ARG_ADDRESS_QUALIFIERS),
        #[since(CL12)]
        CL_KERNEL_ARG_ACCESS_QUALIFIER = 0x1197 => Enum(&ARG_ACCESS_QUALIFIERS),
        #[since(CL12)]
        CL_KERNEL_ARG_TYPE_NAME = 0x1198 => Str,
        #[since(CL12)]
        CL_KERNEL_ARG_TYPE_QUALIFIER = 0x1199 => Bitfield(&ARG_TYPE_QUALIFIER_FLAGS),
        #[since(CL12)]
        CL_KERNEL_ARG_NAME = 0x119A => Str,
    }
}

info_table! {
    /// Codes accepted by `clGetKernelWorkGroupInfo`
    pub static KERNEL_WORK_GROUP_INFO: InfoTable<cl_kernel_work_group_info> = "clGetKernelWorkGroupInfo" {
        CL_KERNEL_WORK_GROUP_SIZE = 0x11B0 => Size,
        CL_KERNEL_COMPILE_WORK_GROUP_SIZE = 0x11B1 => SizeArray,
        CL_KERNEL_LOCAL_MEM_SIZE = 0x11B2 => ULong,
        #[since(CL11)]
        CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE = 0x11B3 => Size,
        #[since(CL11)]
        CL_KERNEL_PRIVATE_MEM_SIZE = 0x11B4 => ULong,
    }
}

info_table! {
    /// Codes accepted by `clGetEventInfo`
    pub static EVENT_INFO: InfoTable<cl_event_info> = "clGetEventInfo" {
        CL_EVENT_COMMAND_QUEUE = 0x11D0 => Ptr,
        CL_EVENT_COMMAND_TYPE = 0x11D1 => Enum(&COMMAND_TYPES),
        CL_EVENT_REFERENCE_COUNT = 0x11D2 => UInt,
        CL_EVENT_COMMAND_EXECUTION_STATUS = 0x11D3 => Status(&EXECUTION_STATUSES),
        #[since(CL11)]
        CL_EVENT_CONTEXT = 0x11D4 => Ptr,
    }
}

info_table! {
    /// Codes accepted by `clGetEventProfilingInfo`
    pub static PROFILING_INFO: InfoTable<cl_profiling_info> = "clGetEventProfilingInfo" {
        CL_PROFILING_COMMAND_QUEUED = 0x1280 => ULong,
        CL_PROFILING_COMMAND_SUBMIT = 0x1281 => ULong,
        CL_PROFILING_COMMAND_START = 0x1282 => ULong,
        CL_PROFILING_COMMAND_END = 0x1283 => ULong,
        #[since(CL20)]
        CL_PROFILING_COMMAND_COMPLETE = 0x1284 => ULong,
    }
}
