pub mod be;
pub mod buffer;
pub mod complex;
pub mod dense;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod scalar;
