use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum DType {
    F64,
    #[default]
    F32,
    BF16,
    F16,
    U64,
    I64,
    U32,
    I32,
    U16,
    I16,
    U8,
    I8,
    BOOL
}

impl DType {
    pub fn size(&self) -> usize {
        match self {
            DType::F64 => 8,
            DType::F32 => 4,
            DType::BF16 => 2,
            DType::F16 => 2,
            DType::U64 => 8,
            DType::I64 => 8,
            DType::U32 => 4,
            DType::I32 => 4,
            DType::U16 => 2,
            DType::I16 => 2,
            DType::U8 => 1,
            DType::I8 => 1,
            DType::BOOL => 1
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::F64 => write!(f, "Float64"),
            DType::F32 => write!(f, "Float32"),
            DType::BF16 => write!(f, "BFloat16"),
            DType::F16 => write!(f, "Float16"),
            DType::I64 => write!(f, "Int64"),
            DType::I32 => write!(f, "Int32"),
            DType::U64 => write!(f, "UInt64"),
            DType::U32 => write!(f, "UInt32"),
            DType::I16 => write!(f, "Int16"),
            DType::U16 => write!(f, "UInt16"),
            DType::U8 => write!(f, "UInt8"),
            DType::I8 => write!(f, "Int8"),
            DType::BOOL => write!(f, "Bool")
        }
    }
}
