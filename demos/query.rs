extern crate ocl_query;

use ocl_query::device::DeviceType;
use ocl_query::load_opencl;
use ocl_query::platform::Platform;

pub fn main() {
    let version = match load_opencl() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Couldn't load OpenCL: {}", e);
            return;
        }
    };

    println!("Loaded OpenCL (compat level {})", version);

    for platform in Platform::get_platforms().unwrap() {
        println!("Platform: {:#?}", platform);

        for device in platform.get_devices(DeviceType::ALL).unwrap() {
            println!("Device: {:#?}", device);

            let ctx = device.create_context().unwrap();
            println!("Context: {:#?}", ctx);

            let queue = ctx.queue_builder(&device).build().unwrap();
            println!("Queue: {:#?}", queue);

            match ctx.sampler_builder().build() {
                Ok(sampler) => println!("Sampler: {:#?}", sampler),
                Err(e) => println!("No sampler: {}", e),
            }
        }
    }
}
