use criterion::{black_box, Criterion};
use lucent_core::dense::DenseArray;
use lucent_tensor::{einsum, Dft2, Tensor};

const SIZES: [(usize, &str); 3] = [(16, "small"), (64, "medium"), (128, "large")];

fn square(n: usize) -> Tensor {
    let data: Vec<f64> = (0..n * n).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
    Tensor::from_dense_with_grad(DenseArray::from_vec(data, &[n, n]).unwrap())
}

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contract/basic");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(30);

    for &(n, size_name) in &SIZES {
        let a = square(n);
        let b = square(n);
        let y = einsum("ij,jk->ik", &[&a, &b]).unwrap().sum();
        group.bench_function(format!("einsum_backward_{}", size_name), |bench| {
            bench.iter(|| {
                y.zero_grad().unwrap();
                y.backward().unwrap();
                black_box(a.grad().unwrap())
            })
        });

        let x = square(n);
        let psf = x.expc().dft2(Dft2::new((0.5 / n as f64, 0.5 / n as f64))).abs_square().sum();
        group.bench_function(format!("dft2_backward_{}", size_name), |bench| {
            bench.iter(|| {
                psf.zero_grad().unwrap();
                psf.backward().unwrap();
                black_box(x.grad().unwrap())
            })
        });
    }

    group.finish();
}
