use lucent::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let a = DenseArray::rand(&[3, 3], -0.05, 0.05)?;
    let x_true = DenseArray::new(vec![1.0, -2.0, 3.0])?;
    let data = DenseArray::einsum("ij,j->i", &[&a, &x_true.square()])?.add(&x_true)?;

    let x = Tensor::from_dense_with_grad(DenseArray::zeros(&[3]));
    let a = Tensor::from_dense(a);
    let model = einsum("ij,j->i", &[&a, &x.pow(2.0)])? + &x;
    let cost = sserror(&model, &data, None, false)?;

    let options = OptimizeOptions::default().with_gtol(1e-9).with_ftol(1e-16).with_maxiter(500);
    let res = optimize(&cost, &[x.clone()], &options)?;

    println!("{} (status {})", res.message, res.status);
    println!("x = {:?}", x.to_flatten_vec()?);
    println!("x_true = {:?}", x_true.to_flatten_vec()?);
    println!("cost = {:e} after {} iterations", res.fun, res.nit);

    Ok(())
}
