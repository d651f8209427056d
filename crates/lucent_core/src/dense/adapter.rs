use crate::{
    buffer::Buffer,
    complex::Complex128,
    error::{Error, Result},
};

/// Host data that can be turned into a dense array: scalars and nested `Vec`s.
pub trait ArrayAdapter: Sized {
    fn to_shape(&self) -> Vec<usize>;
    fn into_buffer(self) -> Result<Buffer>;
}

fn flatten_rows<T>(rows: Vec<Vec<T>>, width: usize) -> Result<Vec<T>> {
    let mut flat = Vec::with_capacity(rows.len() * width);
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != width {
            return Err(Error::ConversionError(format!(
                "ragged nested vector: row {} has length {}, expected {}",
                i,
                row.len(),
                width
            )));
        }
        flat.extend(row);
    }
    Ok(flat)
}

macro_rules! impl_array_adapter {
    ($t:ty, $variant:ident, $conv:expr) => {
        impl ArrayAdapter for $t {
            fn to_shape(&self) -> Vec<usize> {
                vec![]
            }
            fn into_buffer(self) -> Result<Buffer> {
                Ok(Buffer::$variant(vec![$conv(self)]))
            }
        }

        impl ArrayAdapter for Vec<$t> {
            fn to_shape(&self) -> Vec<usize> {
                vec![self.len()]
            }
            fn into_buffer(self) -> Result<Buffer> {
                Ok(Buffer::$variant(self.into_iter().map($conv).collect()))
            }
        }

        impl ArrayAdapter for Vec<Vec<$t>> {
            fn to_shape(&self) -> Vec<usize> {
                vec![self.len(), self.first().map_or(0, Vec::len)]
            }
            fn into_buffer(self) -> Result<Buffer> {
                let width = self.first().map_or(0, Vec::len);
                let flat = flatten_rows(self, width)?;
                Ok(Buffer::$variant(flat.into_iter().map($conv).collect()))
            }
        }

        impl ArrayAdapter for Vec<Vec<Vec<$t>>> {
            fn to_shape(&self) -> Vec<usize> {
                let rows = self.first().map_or(0, Vec::len);
                let width = self.first().and_then(|m| m.first()).map_or(0, Vec::len);
                vec![self.len(), rows, width]
            }
            fn into_buffer(self) -> Result<Buffer> {
                let shape = self.to_shape();
                let mut matrices = Vec::with_capacity(self.len());
                for (i, matrix) in self.into_iter().enumerate() {
                    if matrix.len() != shape[1] {
                        return Err(Error::ConversionError(format!(
                            "ragged nested vector: matrix {} has {} rows, expected {}",
                            i,
                            matrix.len(),
                            shape[1]
                        )));
                    }
                    matrices.push(flatten_rows(matrix, shape[2])?);
                }
                let flat = flatten_rows(matrices, shape[1] * shape[2])?;
                Ok(Buffer::$variant(flat.into_iter().map($conv).collect()))
            }
        }
    };
}

impl_array_adapter!(f64, F64, |x: f64| x);
impl_array_adapter!(f32, F64, |x: f32| x as f64);
impl_array_adapter!(i32, F64, |x: i32| x as f64);
impl_array_adapter!(i64, F64, |x: i64| x as f64);
impl_array_adapter!(Complex128, C128, |z: Complex128| z);
