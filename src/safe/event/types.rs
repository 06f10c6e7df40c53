use crate::raw::*;
use crate::util::FromOclInfo;
use crate::util::OclInfo;
use crate::{Error, Result};
use std::convert::TryFrom;
use std::time::Duration;

flag_enum! {
    /// The kind of command an event was created for
    pub enum CommandType(cl_command_type) {
        NDRangeKernel = CL_COMMAND_NDRANGE_KERNEL,
        Task = CL_COMMAND_TASK,
        NativeKernel = CL_COMMAND_NATIVE_KERNEL,
        ReadBuffer = CL_COMMAND_READ_BUFFER,
        WriteBuffer = CL_COMMAND_WRITE_BUFFER,
        CopyBuffer = CL_COMMAND_COPY_BUFFER,
        ReadImage = CL_COMMAND_READ_IMAGE,
        WriteImage = CL_COMMAND_WRITE_IMAGE,
        CopyImage = CL_COMMAND_COPY_IMAGE,
        CopyImageToBuffer = CL_COMMAND_COPY_IMAGE_TO_BUFFER,
        CopyBufferToImage = CL_COMMAND_COPY_BUFFER_TO_IMAGE,
        MapBuffer = CL_COMMAND_MAP_BUFFER,
        MapImage = CL_COMMAND_MAP_IMAGE,
        UnmapMemObject = CL_COMMAND_UNMAP_MEM_OBJECT,
        Marker = CL_COMMAND_MARKER,
        AcquireGLObjects = CL_COMMAND_ACQUIRE_GL_OBJECTS,
        ReleaseGLObjects = CL_COMMAND_RELEASE_GL_OBJECTS,
        ReadBufferRect = CL_COMMAND_READ_BUFFER_RECT,
        WriteBufferRect = CL_COMMAND_WRITE_BUFFER_RECT,
        CopyBufferRect = CL_COMMAND_COPY_BUFFER_RECT,
        User = CL_COMMAND_USER,
        Barrier = CL_COMMAND_BARRIER,
        MigrateMemObjects = CL_COMMAND_MIGRATE_MEM_OBJECTS,
        FillBuffer = CL_COMMAND_FILL_BUFFER,
        FillImage = CL_COMMAND_FILL_IMAGE,
        SVMFree = CL_COMMAND_SVM_FREE,
        SVMMemcpy = CL_COMMAND_SVM_MEMCPY,
        SVMMemfill = CL_COMMAND_SVM_MEMFILL,
        SVMMap = CL_COMMAND_SVM_MAP,
        SVMUnmap = CL_COMMAND_SVM_UNMAP,
    }
}

/// The execution status of the command associated with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    Complete,
    Running,
    Submitted,
    Queued,
    /// The command was abnormally terminated with the given error code
    Error(cl_int),
}

impl ExecutionStatus {
    pub fn raw(self) -> cl_int {
        match self {
            ExecutionStatus::Complete => CL_COMPLETE,
            ExecutionStatus::Running => CL_RUNNING,
            ExecutionStatus::Submitted => CL_SUBMITTED,
            ExecutionStatus::Queued => CL_QUEUED,
            ExecutionStatus::Error(code) => code,
        }
    }

    /// Whether the command has finished, successfully or not
    pub fn is_finished(self) -> bool {
        match self {
            ExecutionStatus::Complete | ExecutionStatus::Error(_) => true,
            _ => false,
        }
    }
}

impl TryFrom<cl_int> for ExecutionStatus {
    type Error = Error;

    fn try_from(value: cl_int) -> Result<Self> {
        Ok(match value {
            CL_COMPLETE => ExecutionStatus::Complete,
            CL_RUNNING => ExecutionStatus::Running,
            CL_SUBMITTED => ExecutionStatus::Submitted,
            CL_QUEUED => ExecutionStatus::Queued,
            code if code < 0 => ExecutionStatus::Error(code),
            code => {
                return Err(Error::InvalidFlag {
                    value: code as cl_uint,
                    context: "ExecutionStatus",
                })
            }
        })
    }
}

impl FromOclInfo for ExecutionStatus {
    fn read<T: OclInfo>(from: &T, param_name: T::Param) -> Result<Self> {
        cl_int::read(from, param_name).and_then(Self::try_from)
    }
}

/// Device timestamps recorded for a command, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilingInfo {
    pub queued: cl_ulong,
    pub submit: cl_ulong,
    pub start: cl_ulong,
    pub end: cl_ulong,
    /// When the command and any child commands finished. Only reported by
    /// OpenCL 2.0 and later.
    pub complete: Option<cl_ulong>,
}

impl ProfilingInfo {
    /// Time spent executing the command
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.end.saturating_sub(self.start))
    }

    /// Time between the command being queued and it finishing execution
    pub fn latency(&self) -> Duration {
        Duration::from_nanos(self.end.saturating_sub(self.queued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_status() {
        assert_eq!(ExecutionStatus::try_from(CL_COMPLETE).unwrap(), ExecutionStatus::Complete);
        assert_eq!(ExecutionStatus::try_from(CL_QUEUED).unwrap(), ExecutionStatus::Queued);
        assert_eq!(
            ExecutionStatus::try_from(CL_OUT_OF_RESOURCES).unwrap(),
            ExecutionStatus::Error(CL_OUT_OF_RESOURCES)
        );
        assert!(ExecutionStatus::try_from(17).is_err());

        assert!(ExecutionStatus::Error(-5).is_finished());
        assert!(!ExecutionStatus::Running.is_finished());
        assert_eq!(ExecutionStatus::Submitted.raw(), CL_SUBMITTED);
    }

    #[test]
    fn test_command_type() {
        assert_eq!(
            CommandType::try_from(CL_COMMAND_FILL_BUFFER).unwrap(),
            CommandType::FillBuffer
        );
        assert_eq!(CommandType::Marker.raw(), CL_COMMAND_MARKER);
    }

    #[test]
    fn test_profiling_durations() {
        let info = ProfilingInfo {
            queued: 100,
            submit: 150,
            start: 200,
            end: 1200,
            complete: None,
        };

        assert_eq!(info.duration(), Duration::from_nanos(1000));
        assert_eq!(info.latency(), Duration::from_nanos(1100));

        let skewed = ProfilingInfo { end: 50, ..info };
        assert_eq!(skewed.duration(), Duration::from_nanos(0));
    }
}
