//! Scalar type inference
//!
//! Maps a signal's physical encoding (bit length, signedness, scaling) to the
//! canonical Simulink scalar type. Pure and total: every input combination
//! yields a defined type name.

/// Canonical scalar type produced by inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Single,
    Double,
}

impl ScalarType {
    /// The Simulink data type name
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint8 => "uint8",
            ScalarType::Uint16 => "uint16",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Single => "single",
            ScalarType::Double => "double",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Infer the scalar type for a signal encoding
///
/// Rules, in priority order:
/// 1. A single bit is always `boolean`, regardless of factor/offset.
/// 2. A non-identity scaling (factor != 1.0 or offset != 0.0) requires a
///    floating type: `single` up to 32 bits, `double` above.
/// 3. Otherwise an integer type: family by signedness, width by the first
///    threshold satisfied among 8/16/32 bits, else 64.
pub fn infer_scalar_type(bit_length: u16, is_signed: bool, factor: f64, offset: f64) -> ScalarType {
    if bit_length == 1 {
        return ScalarType::Boolean;
    }

    let requires_float = factor != 1.0 || offset != 0.0;
    if requires_float {
        return if bit_length <= 32 {
            ScalarType::Single
        } else {
            ScalarType::Double
        };
    }

    if is_signed {
        match bit_length {
            0..=8 => ScalarType::Int8,
            9..=16 => ScalarType::Int16,
            17..=32 => ScalarType::Int32,
            _ => ScalarType::Int64,
        }
    } else {
        match bit_length {
            0..=8 => ScalarType::Uint8,
            9..=16 => ScalarType::Uint16,
            17..=32 => ScalarType::Uint32,
            _ => ScalarType::Uint64,
        }
    }
}
