use super::DenseArray;
use crate::{
    buffer::Buffer,
    complex::Complex128,
    dtype::DType,
    error::{Error, Result},
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
struct SerializedDenseArray {
    dtype: DType,
    shape: Vec<usize>,
    // complex values are stored interleaved (re, im)
    data: Vec<f64>,
}

impl Serialize for DenseArray {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = match self.buffer() {
            Buffer::F64(v) => v.clone(),
            Buffer::C128(v) => v.iter().flat_map(|z| [z.re, z.im]).collect(),
        };

        SerializedDenseArray {
            dtype: self.dtype(),
            shape: self.shape().to_vec(),
            data,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DenseArray {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serialized = SerializedDenseArray::deserialize(deserializer)?;

        let buffer = match serialized.dtype {
            DType::F64 => Buffer::F64(serialized.data),
            DType::C128 => {
                if serialized.data.len() % 2 != 0 {
                    return Err(de::Error::custom("complex128 payload has an odd number of values"));
                }
                Buffer::C128(
                    serialized
                        .data
                        .chunks_exact(2)
                        .map(|pair| Complex128::new(pair[0], pair[1]))
                        .collect(),
                )
            }
        };

        DenseArray::from_buffer(buffer, &serialized.shape).map_err(de::Error::custom)
    }
}

impl DenseArray {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let config = bincode::config::legacy();
        bincode::serde::encode_to_vec(self, config).map_err(|e| Error::SerializationError(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::legacy();
        bincode::serde::decode_from_slice(bytes, config)
            .map(|(array, _)| array)
            .map_err(|e| Error::DeserializationError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SerializationError(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::DeserializationError(e.to_string()))
    }
}
