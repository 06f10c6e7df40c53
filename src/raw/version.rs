use std::fmt::{self, Display, Formatter};

/// An OpenCL API version.
///
/// Versions are ordered, so a feature introduced in a given version can be
/// gated with a simple comparison against the version of the loaded library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpenCLVersion {
    CL10,
    CL11,
    CL12,
    CL20,
    CL21,
}

impl OpenCLVersion {
    /// All known versions, oldest first
    pub const ALL: [OpenCLVersion; 5] = [
        OpenCLVersion::CL10,
        OpenCLVersion::CL11,
        OpenCLVersion::CL12,
        OpenCLVersion::CL20,
        OpenCLVersion::CL21,
    ];

    /// The major and minor version numbers
    pub fn numbers(self) -> (u8, u8) {
        match self {
            OpenCLVersion::CL10 => (1, 0),
            OpenCLVersion::CL11 => (1, 1),
            OpenCLVersion::CL12 => (1, 2),
            OpenCLVersion::CL20 => (2, 0),
            OpenCLVersion::CL21 => (2, 1),
        }
    }
}

impl Display for OpenCLVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (major, minor) = self.numbers();
        write!(f, "OpenCL {}.{}", major, minor)
    }
}

#[cfg(test)]
mod tests {
    use super::OpenCLVersion;

    #[test]
    fn test_version_ordering() {
        assert!(OpenCLVersion::CL10 < OpenCLVersion::CL11);
        assert!(OpenCLVersion::CL12 < OpenCLVersion::CL20);
        assert!(OpenCLVersion::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(OpenCLVersion::CL12.to_string(), "OpenCL 1.2");
        assert_eq!(OpenCLVersion::CL21.to_string(), "OpenCL 2.1");
    }
}
