pub mod binary;
pub mod einsum;
pub mod matmul;
pub mod reduction;
pub mod transform;
pub mod unary;
