use lucent::prelude::*;

const N: usize = 16;

// circular pupil of radius N/4 centred on (N/2, N/2)
fn pupil() -> Result<DenseArray> {
    let c = (N / 2) as f64;
    let r = N as f64 / 4.0;
    let values = (0..N * N)
        .map(|i| {
            let (y, x) = ((i / N) as f64 - c, (i % N) as f64 - c);
            if x * x + y * y <= r * r {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    DenseArray::from_vec(values, &[N, N])
}

fn psf(amplitude: &Tensor, phase: &Tensor) -> Tensor {
    let field = amplitude * phase.expc();
    field.dft2(Dft2::new((0.5 / N as f64, 0.5 / N as f64)).with_shape(2 * N, 2 * N)).abs_square()
}

fn main() -> Result<()> {
    env_logger::init();

    let amplitude = Tensor::from_dense(pupil()?);

    // a tilt plus a little defocus
    let c = (N / 2) as f64;
    let truth: Vec<f64> = (0..N * N)
        .map(|i| {
            let (y, x) = ((i / N) as f64 - c, (i % N) as f64 - c);
            0.15 * x + 0.02 * (x * x + y * y)
        })
        .collect();
    let truth = Tensor::from_dense(DenseArray::from_vec(truth, &[N, N])?);
    let measured = psf(&amplitude, &truth).data()?;

    let phase = Tensor::from_dense_with_grad(DenseArray::zeros(&[N, N]));
    let cost = sserror(&psf(&amplitude, &phase), &measured, None, true)?;
    let start = cost.item()?.as_f64()?;

    let res = optimize(&cost, &[phase.clone()], &OptimizeOptions::default().with_maxiter(200))?;

    println!("{}", res.message);
    println!("error: {:e} -> {:e} in {} iterations", start, res.fun, res.nit);

    Ok(())
}
