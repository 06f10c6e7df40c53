use crate::raw::*;
use crate::{Error, Result};
use std::convert::TryFrom;

bitfield! {
    /// A bitfield representing OpenCL device types
    pub struct DeviceType(cl_device_type) {
        pub const DEFAULT = CL_DEVICE_TYPE_DEFAULT;
        pub const CPU = CL_DEVICE_TYPE_CPU;
        pub const GPU = CL_DEVICE_TYPE_GPU;
        pub const ACCELERATOR = CL_DEVICE_TYPE_ACCELERATOR;
        pub const CUSTOM = CL_DEVICE_TYPE_CUSTOM;
    }
}

impl DeviceType {
    /// A device type bitfield with no fields set
    pub const EMPTY: DeviceType = DeviceType(0);

    /// Every device type, for use when listing devices
    pub const ALL: DeviceType = DeviceType(CL_DEVICE_TYPE_ALL);
}

bitfield! {
    /// A bitfield representing floating point mode support
    pub struct FPConfig(cl_device_fp_config) {
        pub const DENORM = CL_FP_DENORM;
        pub const INF_NAN = CL_FP_INF_NAN;
        pub const ROUND_TO_NEAREST = CL_FP_ROUND_TO_NEAREST;
        pub const ROUND_TO_ZERO = CL_FP_ROUND_TO_ZERO;
        pub const ROUND_TO_INF = CL_FP_ROUND_TO_INF;
        pub const FMA = CL_FP_FMA;
        pub const CORRECTLY_ROUNDED_DIVIDE_SQRT = CL_FP_CORRECTLY_ROUNDED_DIVIDE_SQRT;
        pub const SOFT_FLOAT = CL_FP_SOFT_FLOAT;
    }
}

flag_enum! {
    /// Type of cache memory supported by a device
    pub enum MemCacheType(cl_device_mem_cache_type) {
        None = CL_NONE,
        ReadOnly = CL_READ_ONLY_CACHE,
        ReadWrite = CL_READ_WRITE_CACHE,
    }
}

flag_enum! {
    /// Type of local memory for a device
    pub enum LocalMemType(cl_device_local_mem_type) {
        /// No local memory - may only be returned by devices of type CUSTOM
        None = CL_NONE,
        Local = CL_LOCAL,
        Global = CL_GLOBAL,
    }
}

bitfield! {
    pub struct ExecutionCapabilities(cl_device_exec_capabilities) {
        pub const KERNEL = CL_EXEC_KERNEL;
        pub const NATIVE_KERNEL = CL_EXEC_NATIVE_KERNEL;
    }
}

bitfield! {
    pub struct AffinityDomain(cl_device_affinity_domain) {
        pub const NUMA = CL_DEVICE_AFFINITY_DOMAIN_NUMA;
        pub const L4_CACHE = CL_DEVICE_AFFINITY_DOMAIN_L4_CACHE;
        pub const L3_CACHE = CL_DEVICE_AFFINITY_DOMAIN_L3_CACHE;
        pub const L2_CACHE = CL_DEVICE_AFFINITY_DOMAIN_L2_CACHE;
        pub const L1_CACHE = CL_DEVICE_AFFINITY_DOMAIN_L1_CACHE;
        pub const NEXT_PARTITIONABLE = CL_DEVICE_AFFINITY_DOMAIN_NEXT_PARTITIONABLE;
    }
}

bitfield! {
    pub struct SVMCapabilities(cl_device_svm_capabilities) {
        pub const COARSE_GRAIN_BUFFER = CL_DEVICE_SVM_COARSE_GRAIN_BUFFER;
        pub const FINE_GRAIN_BUFFER = CL_DEVICE_SVM_FINE_GRAIN_BUFFER;
        pub const FINE_GRAIN_SYSTEM = CL_DEVICE_SVM_FINE_GRAIN_SYSTEM;
        pub const ATOMICS = CL_DEVICE_SVM_ATOMICS;
    }
}

flag_enum! {
    /// A way of partitioning a device, without its parameters
    pub enum PartitionKind(cl_device_partition_property) {
        Equally = CL_DEVICE_PARTITION_EQUALLY,
        ByCounts = CL_DEVICE_PARTITION_BY_COUNTS,
        ByAffinityDomain = CL_DEVICE_PARTITION_BY_AFFINITY_DOMAIN,
    }
}

/// How to split a device into sub-devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevicePartition {
    /// As many sub-devices as possible, each with the given number of compute
    /// units
    Equally(u32),
    /// One sub-device per entry, each with the given number of compute units
    ByCounts(Vec<u32>),
    /// Split along the given cache or NUMA boundary
    ByAffinityDomain(AffinityDomain),
}

impl DevicePartition {
    pub fn kind(&self) -> PartitionKind {
        match self {
            DevicePartition::Equally(_) => PartitionKind::Equally,
            DevicePartition::ByCounts(_) => PartitionKind::ByCounts,
            DevicePartition::ByAffinityDomain(_) => PartitionKind::ByAffinityDomain,
        }
    }

    /// Encode this partition as a zero-terminated property list for
    /// `clCreateSubDevices`
    pub(crate) fn to_properties(&self) -> Vec<cl_device_partition_property> {
        let mut props = vec![self.kind().raw()];

        match self {
            DevicePartition::Equally(n) => props.push(*n as _),
            DevicePartition::ByCounts(counts) => {
                props.extend(counts.iter().map(|&c| c as cl_device_partition_property));
                props.push(CL_DEVICE_PARTITION_BY_COUNTS_LIST_END);
            }
            DevicePartition::ByAffinityDomain(domain) => props.push(domain.raw() as _),
        }

        props.push(0);
        props
    }

    /// Decode the partition type reported for a sub-device. Root devices
    /// report an empty list.
    pub(crate) fn from_properties(props: &[cl_device_partition_property]) -> Result<Option<Self>> {
        let (&first, rest) = match props.split_first() {
            Some(split) if *split.0 != 0 => split,
            _ => return Ok(None),
        };

        let param = rest.first().copied().ok_or(Error::InvalidDataLength {
            expected: 2,
            actual: props.len(),
        });

        Ok(Some(match PartitionKind::try_from(first)? {
            PartitionKind::Equally => DevicePartition::Equally(param? as u32),
            PartitionKind::ByCounts => DevicePartition::ByCounts(
                rest.iter()
                    .take_while(|&&c| c != CL_DEVICE_PARTITION_BY_COUNTS_LIST_END)
                    .map(|&c| c as u32)
                    .collect(),
            ),
            PartitionKind::ByAffinityDomain => {
                DevicePartition::ByAffinityDomain(AffinityDomain::from_raw(param? as _))
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_debug_fmt() {
        assert!(!dbg!(format!("{:?}", DeviceType::EMPTY)).contains("CPU"));
        assert!(dbg!(format!("{:?}", DeviceType::ALL)).contains("CPU"));
        assert!(dbg!(format!("{:?}", DeviceType::CPU | DeviceType::GPU)).contains("GPU"));
    }

    #[test]
    fn test_bitfield_ops() {
        let both = FPConfig::FMA | FPConfig::DENORM;
        assert!(both.contains(FPConfig::FMA));
        assert!(!both.contains(FPConfig::INF_NAN));
        assert_eq!((both & FPConfig::FMA).raw(), CL_FP_FMA);
        assert!(FPConfig::default().is_empty());
        assert_eq!(FPConfig::from_raw(both.raw()), both);
    }

    #[test]
    fn test_flag_enum_conversion() {
        assert_eq!(MemCacheType::try_from(CL_READ_ONLY_CACHE).unwrap(), MemCacheType::ReadOnly);
        assert_eq!(LocalMemType::Global.raw(), CL_GLOBAL);

        match LocalMemType::try_from(0x7777) {
            Err(Error::InvalidFlag { value, context }) => {
                assert_eq!(value, 0x7777);
                assert_eq!(context, "LocalMemType");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_partition_properties() {
        assert_eq!(
            DevicePartition::Equally(4).to_properties(),
            vec![CL_DEVICE_PARTITION_EQUALLY, 4, 0]
        );
        assert_eq!(
            DevicePartition::ByCounts(vec![2, 3]).to_properties(),
            vec![
                CL_DEVICE_PARTITION_BY_COUNTS,
                2,
                3,
                CL_DEVICE_PARTITION_BY_COUNTS_LIST_END,
                0
            ]
        );
        assert_eq!(
            DevicePartition::ByAffinityDomain(AffinityDomain::NUMA).to_properties(),
            vec![
                CL_DEVICE_PARTITION_BY_AFFINITY_DOMAIN,
                CL_DEVICE_AFFINITY_DOMAIN_NUMA as _,
                0
            ]
        );
    }

    #[test]
    fn test_partition_decode() {
        for partition in vec![
            DevicePartition::Equally(2),
            DevicePartition::ByCounts(vec![1, 5, 2]),
            DevicePartition::ByAffinityDomain(AffinityDomain::L2_CACHE),
        ] {
            let props = partition.to_properties();
            assert_eq!(
                DevicePartition::from_properties(&props).unwrap(),
                Some(partition)
            );
        }

        assert_eq!(DevicePartition::from_properties(&[]).unwrap(), None);
        assert_eq!(DevicePartition::from_properties(&[0]).unwrap(), None);
        assert!(DevicePartition::from_properties(&[0x4242, 1]).is_err());
        assert!(DevicePartition::from_properties(&[CL_DEVICE_PARTITION_EQUALLY]).is_err());
    }
}
