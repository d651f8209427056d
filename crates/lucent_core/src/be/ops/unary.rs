use crate::{
    buffer::Buffer,
    complex::Complex128,
    error::{Error, Result},
    scalar::Scalar,
};
use lucent_cpu::ops::unary::unary_map;

macro_rules! declare_unary_op {
    ($name:ident, $f64_op:expr, $c128_op:expr) => {
        pub fn $name(inp: &Buffer) -> Buffer {
            match inp {
                Buffer::F64(x) => {
                    let mut out = vec![0.0; x.len()];
                    unary_map(x, &mut out, $f64_op);
                    Buffer::F64(out)
                }
                Buffer::C128(x) => {
                    let mut out = vec![Complex128::ZERO; x.len()];
                    unary_map(x, &mut out, $c128_op);
                    Buffer::C128(out)
                }
            }
        }
    };
}

macro_rules! declare_to_real_op {
    ($name:ident, $f64_op:expr, $c128_op:expr) => {
        pub fn $name(inp: &Buffer) -> Buffer {
            let mut out = vec![0.0; inp.len()];
            match inp {
                Buffer::F64(x) => unary_map(x, &mut out, $f64_op),
                Buffer::C128(x) => unary_map(x, &mut out, $c128_op),
            }
            Buffer::F64(out)
        }
    };
}

declare_unary_op!(neg, |x: f64| -x, |z: Complex128| -z);
declare_unary_op!(conj, |x: f64| x, |z: Complex128| z.conj());
declare_unary_op!(exp, |x: f64| x.exp(), |z: Complex128| z.exp());
declare_unary_op!(square, |x: f64| x * x, |z: Complex128| z * z);

declare_to_real_op!(real, |x: f64| x, |z: Complex128| z.re);
declare_to_real_op!(imag, |_: f64| 0.0, |z: Complex128| z.im);
declare_to_real_op!(abs_square, |x: f64| x * x, |z: Complex128| z.magnitude_squared());

/// `cos x + i sin x` of a real buffer.
pub fn expc(inp: &Buffer) -> Result<Buffer> {
    let x = inp.as_f64_slice().map_err(|_| Error::UnsupportedDType {
        op: "expc",
        dtype: inp.dtype(),
    })?;
    let mut out = vec![Complex128::ZERO; x.len()];
    unary_map(x, &mut out, Complex128::cis);
    Ok(Buffer::C128(out))
}

pub fn powf(inp: &Buffer, p: f64) -> Buffer {
    match inp {
        Buffer::F64(x) => {
            let mut out = vec![0.0; x.len()];
            unary_map(x, &mut out, |v: f64| v.powf(p));
            Buffer::F64(out)
        }
        Buffer::C128(x) => {
            let mut out = vec![Complex128::ZERO; x.len()];
            unary_map(x, &mut out, |z: Complex128| z.powf(p));
            Buffer::C128(out)
        }
    }
}

pub fn mul_scalar(inp: &Buffer, s: Scalar) -> Buffer {
    match (inp, s) {
        (Buffer::F64(x), Scalar::F64(s)) => {
            let mut out = vec![0.0; x.len()];
            unary_map(x, &mut out, |v: f64| v * s);
            Buffer::F64(out)
        }
        (_, s) => {
            let s = s.as_complex();
            map_complex(inp, |z| z * s)
        }
    }
}

pub fn add_scalar(inp: &Buffer, s: Scalar) -> Buffer {
    match (inp, s) {
        (Buffer::F64(x), Scalar::F64(s)) => {
            let mut out = vec![0.0; x.len()];
            unary_map(x, &mut out, |v: f64| v + s);
            Buffer::F64(out)
        }
        (_, s) => {
            let s = s.as_complex();
            map_complex(inp, |z| z + s)
        }
    }
}

fn map_complex<F>(inp: &Buffer, op: F) -> Buffer
where
    F: Fn(Complex128) -> Complex128 + Send + Sync,
{
    let mut out = vec![Complex128::ZERO; inp.len()];
    match inp {
        Buffer::F64(x) => unary_map(x, &mut out, |v: f64| op(Complex128::from(v))),
        Buffer::C128(x) => unary_map(x, &mut out, op),
    }
    Buffer::C128(out)
}
