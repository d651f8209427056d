use criterion::{black_box, Criterion};
use lucent_core::dense::DenseArray;
use lucent_tensor::Tensor;

// Constants for benchmark data sizes
const SIZES: [(usize, &str); 3] = [(100, "small"), (5000, "medium"), (10000, "large")];

// x*x + exp(x) feeding a sum, with x shared by every branch
fn build(size: usize) -> (Tensor, Tensor) {
    let data: Vec<f64> = (0..size).map(|i| (i as f64) / size as f64).collect();
    let x = Tensor::from_dense_with_grad(DenseArray::from_vec(data, &[size]).unwrap());
    let y = (&x * &x + x.exp() * 0.5).sum();
    (x, y)
}

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("graph/basic");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    for &(size, size_name) in &SIZES {
        let (_, y) = build(size);
        group.bench_function(format!("forward_{}", size_name), |b| b.iter(|| black_box(y.data().unwrap())));

        let (x, y) = build(size);
        group.bench_function(format!("backward_{}", size_name), |b| {
            b.iter(|| {
                x.zero_grad().unwrap();
                y.backward().unwrap();
                black_box(x.grad().unwrap())
            })
        });
    }

    group.finish();
}
