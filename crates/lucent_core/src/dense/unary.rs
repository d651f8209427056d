use super::DenseArray;
use crate::{be::ops::unary, buffer::Buffer, error::Result, scalar::Scalar};

impl DenseArray {
    fn map_buffer<F>(&self, op: F) -> DenseArray
    where
        F: FnOnce(&Buffer) -> Buffer,
    {
        DenseArray::from_parts(op(self.buffer()), self.shape())
    }

    pub fn neg(&self) -> DenseArray {
        self.map_buffer(unary::neg)
    }

    /// Complex conjugate; a copy for real arrays.
    pub fn conj(&self) -> DenseArray {
        if self.is_complex() {
            self.map_buffer(unary::conj)
        } else {
            self.clone()
        }
    }

    pub fn real(&self) -> DenseArray {
        if self.is_complex() {
            self.map_buffer(unary::real)
        } else {
            self.clone()
        }
    }

    pub fn imag(&self) -> DenseArray {
        self.map_buffer(unary::imag)
    }

    pub fn exp(&self) -> DenseArray {
        self.map_buffer(unary::exp)
    }

    /// `exp(i·x)` of a real array.
    pub fn expc(&self) -> Result<DenseArray> {
        Ok(DenseArray::from_parts(unary::expc(self.buffer())?, self.shape()))
    }

    /// `|x|²`, always real.
    pub fn abs_square(&self) -> DenseArray {
        self.map_buffer(unary::abs_square)
    }

    pub fn square(&self) -> DenseArray {
        self.map_buffer(unary::square)
    }

    pub fn powf(&self, exponent: f64) -> DenseArray {
        self.map_buffer(|buf| unary::powf(buf, exponent))
    }

    pub fn mul_scalar(&self, s: impl Into<Scalar>) -> DenseArray {
        let s = s.into();
        self.map_buffer(|buf| unary::mul_scalar(buf, s))
    }

    pub fn add_scalar(&self, s: impl Into<Scalar>) -> DenseArray {
        let s = s.into();
        self.map_buffer(|buf| unary::add_scalar(buf, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex128;

    #[test]
    fn expc_lies_on_unit_circle() -> Result<()> {
        let x = DenseArray::new(vec![0.0, std::f64::consts::PI / 2.0, 1.3])?;
        let z = x.expc()?;
        for (v, theta) in z.to_complex_vec().iter().zip([0.0, std::f64::consts::PI / 2.0, 1.3]) {
            assert!((v.magnitude() - 1.0).abs() < 1e-15);
            assert!((v.phase() - theta).abs() < 1e-12);
        }
        assert!(z.expc().is_err());
        Ok(())
    }

    #[test]
    fn abs_square_of_complex_is_real() -> Result<()> {
        let z = DenseArray::new(vec![Complex128::new(3.0, 4.0), Complex128::new(0.0, -2.0)])?;
        let a = z.abs_square();
        assert_eq!(a.to_flatten_vec()?, vec![25.0, 4.0]);
        assert_eq!(z.conj().imag().to_flatten_vec()?, vec![-4.0, 2.0]);
        Ok(())
    }

    #[test]
    fn scalar_ops_promote_with_complex_scalar() -> Result<()> {
        let x = DenseArray::new(vec![1.0, 2.0])?;
        assert_eq!(x.mul_scalar(3.0).to_flatten_vec()?, vec![3.0, 6.0]);
        let z = x.mul_scalar(Complex128::I);
        assert_eq!(z.to_complex_vec(), vec![Complex128::new(0.0, 1.0), Complex128::new(0.0, 2.0)]);
        assert_eq!(x.powf(3.0).add_scalar(-1.0).to_flatten_vec()?, vec![0.0, 7.0]);
        Ok(())
    }
}
