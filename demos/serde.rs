use lucent::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let x = Tensor::from_dense_with_grad(DenseArray::new(vec![0.5, -1.5])?);
    let cost = (&x - 2.0).pow(2.0).sum();
    let res = optimize(&cost, &[x.clone()], &OptimizeOptions::default())?;

    println!("{}", serde_json::to_string_pretty(&res)?);

    let solution = x.data()?;
    let bytes = solution.to_bytes()?;
    let restored = DenseArray::from_bytes(&bytes)?;
    println!("restored from {} bytes: {:?}", bytes.len(), restored.to_flatten_vec()?);
    println!("json: {}", solution.to_json()?);

    Ok(())
}
