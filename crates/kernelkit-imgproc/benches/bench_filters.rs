use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kernelkit_image::Image;
use kernelkit_imgproc::filter::{
    apply_filter, convolve, gaussian_blur_with_config,
    kernels::{FilterKind, Kernel},
    FilterConfig, GaussianParams,
};
use kernelkit_imgproc::parallel::ExecutionStrategy;

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("Catalog Filters");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let image = Image::<u8>::from_size_val([*width, *height].into(), 3, 127).unwrap();

        for kind in FilterKind::ALL {
            group.bench_with_input(
                BenchmarkId::new(kind.name(), format!("{}x{}", width, height)),
                &image,
                |b, i| b.iter(|| black_box(apply_filter(i, kind))),
            );
        }
    }

    group.finish();
}

fn bench_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448)].iter() {
        for radius in [1, 2, 4, 8].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * (2 * *radius + 1)) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, radius);

            let image = Image::<u8>::from_size_val([*width, *height].into(), 3, 127).unwrap();
            let params = GaussianParams::new(*radius, *radius as f32 / 2.0).unwrap();
            let weights = params.weights();
            let kernel_2d = Kernel::from_outer_product(&weights, &weights).unwrap();

            for (name, strategy) in [
                ("separable_serial", ExecutionStrategy::Serial),
                ("separable_parallel", ExecutionStrategy::Parallel),
            ] {
                let config = FilterConfig::default().with_strategy(strategy);
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &image,
                    |b, i| b.iter(|| black_box(gaussian_blur_with_config(i, params, &config))),
                );
            }

            group.bench_with_input(
                BenchmarkId::new("convolve_2d", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve(i, &kernel_2d))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_catalog, bench_gaussian);
criterion_main!(benches);
