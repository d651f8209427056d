use lucent::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    for analytic_grad in [true, false] {
        let x = Tensor::from_dense_with_grad(DenseArray::rand(&[1], 0.0, 1.0)?);
        let y = (4.0 * (&x - 5.0).pow(2.0)).sum();

        let options = OptimizeOptions::default().with_analytic_grad(analytic_grad);
        let res = optimize(&y, &[x.clone()], &options)?;

        println!("analytic_grad = {}", analytic_grad);
        println!("  message: {}", res.message);
        println!("  x: {:?}, fun: {:e}", res.x, res.fun);
        println!("  nit: {}, nfev: {}, njev: {}", res.nit, res.nfev, res.njev);
    }

    Ok(())
}
