//! Exercises the system OpenCL driver. Every test returns early when no
//! library can be loaded, so these pass on machines without OpenCL.

extern crate ocl_query;

use ocl_query::buffer::flags::{DeviceReadOnly, DeviceWriteOnly, HostNoAccess, HostReadOnly};
use ocl_query::device::{Device, DeviceType};
use ocl_query::event::Event;
use ocl_query::load_opencl;
use ocl_query::platform::Platform;
use ocl_query::program::ProgramBuilder;
use ocl_query::raw::OpenCLVersion;
use ocl_query::util::OclInfo;

const KERNEL: &str = r#"
__kernel void sum(__constant int *a, __constant int *b, __global int *c) {
    size_t id = get_global_id(0);
    c[id] = a[id] + b[id];
}
"#;

fn devices() -> Option<Vec<Device>> {
    let version = dbg!(load_opencl()).ok()?;
    assert!(version >= OpenCLVersion::CL10);

    let mut devices = Vec::new();
    for platform in Platform::get_platforms().ok()? {
        devices.extend(platform.get_devices(DeviceType::ALL).ok()?);
    }

    Some(devices)
}

#[test]
fn query_everything() {
    let devices = match devices() {
        Some(d) => d,
        None => return,
    };

    for platform in Platform::get_platforms().unwrap() {
        for (param, value) in platform.query_all() {
            dbg!(param.name, value.ok());
        }
    }

    for device in devices {
        assert!(!device.name().unwrap().as_bytes().is_empty());
        dbg!(device);

        let ctx = device.create_context().unwrap();
        assert_eq!(ctx.devices().unwrap(), vec![device]);
        assert_eq!(ctx.platform().unwrap(), device.platform().unwrap());

        let clone = ctx.try_clone().unwrap();
        assert!(clone.reference_count().unwrap() >= 2);
        drop(clone);

        dbg!(ctx);
    }
}

#[test]
fn sum_kernel() {
    let devices = match devices() {
        Some(d) => d,
        None => return,
    };

    for device in devices {
        let ctx = device.create_context().unwrap();
        let queue = ctx.queue_builder(&device).build().unwrap();

        let program = ProgramBuilder::with_source(&ctx, &KERNEL)
            .opt("-cl-kernel-arg-info")
            .build()
            .unwrap();
        dbg!(&program);

        let a = ctx
            .buffer_builder()
            .host_access::<HostNoAccess>()
            .device_access::<DeviceReadOnly>()
            .build_copying_slice(&[1, 2, 3])
            .unwrap();

        let b = ctx
            .buffer_builder()
            .host_access::<HostNoAccess>()
            .device_access::<DeviceReadOnly>()
            .build_copying_slice(&[1, 2, 3])
            .unwrap();

        let c = ctx
            .buffer_builder()
            .host_access::<HostReadOnly>()
            .device_access::<DeviceWriteOnly>()
            .build_with_size::<i32>(3)
            .unwrap();

        let mut kernel = program.create_kernel("sum").unwrap();
        assert_eq!(kernel.num_args().unwrap(), 3);

        kernel.set_arg(0, &a).unwrap();
        kernel.set_arg(1, &b).unwrap();
        kernel.set_arg(2, &c).unwrap();
        assert!(kernel.set_arg(3, &c).is_err());

        // the kernel keeps its own references to bound buffers
        drop(a);
        drop(b);

        let event = queue.kernel_cmd(&kernel).exec_ndrange(&[3]).unwrap();
        Event::wait_all(&[&event]).unwrap();

        let mut data = [0i32; 3];
        queue.buffer_cmd(&c).read(&mut data).unwrap();

        assert_eq!(data, [2, 4, 6]);
    }
}

#[test]
fn build_failure_has_log() {
    let devices = match devices() {
        Some(d) => d,
        None => return,
    };

    if let Some(device) = devices.first() {
        let ctx = device.create_context().unwrap();
        let src = "__kernel void broken( {";

        match ProgramBuilder::with_source(&ctx, &src).build() {
            Err(ocl_query::Error::BuildFailed { log, .. }) => {
                dbg!(log);
            }
            other => panic!("expected a build failure, got {:?}", other),
        }
    }
}
