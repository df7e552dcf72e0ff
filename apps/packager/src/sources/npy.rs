//! Decoder for NumPy `.npy` array files.
//!
//! Covers what the exported model artifacts use: numeric and boolean dtypes,
//! fixed-width unicode strings, C or Fortran order, any rank. Object arrays
//! hold pickled Python objects and are rejected.
//!
//! The decoded array converts to a nested JSON value with the same nesting as
//! the array shape (a 0-d array becomes its scalar).

use serde_json::{Number, Value};
use thiserror::Error;

const MAGIC: &[u8] = b"\x93NUMPY";

#[derive(Debug, Error, PartialEq)]
pub enum NpyError {
    #[error("not an .npy file (bad magic string)")]
    BadMagic,

    #[error("unsupported .npy format version {0}.{1}")]
    UnsupportedVersion(u8, u8),

    #[error("file truncated: {0}")]
    Truncated(&'static str),

    #[error("invalid header: {0}")]
    Header(String),

    #[error("unsupported dtype '{0}'")]
    UnsupportedDtype(String),

    #[error("object array (pickled payload) cannot be decoded")]
    ObjectArray,

    #[error("invalid unicode code point {0:#x}")]
    InvalidCodePoint(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Dtype {
    Bool,
    Int(usize),
    UInt(usize),
    Float(usize),
    /// Fixed-width UTF-32 string of the given number of code points.
    Unicode(usize),
}

impl Dtype {
    fn item_size(self) -> usize {
        match self {
            Dtype::Bool => 1,
            Dtype::Int(n) | Dtype::UInt(n) | Dtype::Float(n) => n,
            Dtype::Unicode(chars) => chars * 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NpyData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    UInt(Vec<u64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl NpyData {
    fn value_at(&self, index: usize) -> Value {
        match self {
            NpyData::Bool(v) => Value::Bool(v[index]),
            NpyData::Int(v) => Value::from(v[index]),
            NpyData::UInt(v) => Value::from(v[index]),
            // NaN and infinities have no JSON form
            NpyData::Float(v) => Number::from_f64(v[index])
                .map(Value::Number)
                .unwrap_or(Value::Null),
            NpyData::Text(v) => Value::String(v[index].clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpyArray {
    pub shape: Vec<usize>,
    pub fortran_order: bool,
    /// Elements in file order.
    pub data: NpyData,
}

impl NpyArray {
    pub fn parse(bytes: &[u8]) -> Result<Self, NpyError> {
        if bytes.len() < MAGIC.len() + 2 || &bytes[..MAGIC.len()] != MAGIC {
            return Err(NpyError::BadMagic);
        }
        let (major, minor) = (bytes[6], bytes[7]);
        let (header_len, header_start) = match major {
            1 => {
                let raw = bytes.get(8..10).ok_or(NpyError::Truncated("header length"))?;
                (u16::from_le_bytes([raw[0], raw[1]]) as usize, 10)
            }
            2 | 3 => {
                let raw = bytes.get(8..12).ok_or(NpyError::Truncated("header length"))?;
                (u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize, 12)
            }
            _ => return Err(NpyError::UnsupportedVersion(major, minor)),
        };
        let header_end = header_start + header_len;
        let header = bytes
            .get(header_start..header_end)
            .ok_or(NpyError::Truncated("header"))?;
        let header = std::str::from_utf8(header)
            .map_err(|e| NpyError::Header(format!("not valid text: {e}")))?;

        let dtype = parse_descr(header)?;
        let fortran_order = parse_fortran_order(header)?;
        let shape = parse_shape(header)?;

        let too_large = || NpyError::Header(format!("shape {shape:?} is too large"));
        let count = checked_product(shape.iter().copied()).ok_or_else(too_large)?;
        let needed = count.checked_mul(dtype.item_size()).ok_or_else(too_large)?;
        let body = &bytes[header_end..];
        if body.len() < needed {
            return Err(NpyError::Truncated("array data"));
        }
        if needed == 0 {
            // Zero-sized data leaves the shape unbounded by the body; every
            // non-empty axis still has to fit in the file.
            let slots = checked_product(shape.iter().copied().filter(|dim| *dim != 0));
            if slots.map_or(true, |slots| slots > bytes.len()) {
                return Err(too_large());
            }
        }
        let data = decode(dtype, &body[..needed], count)?;

        Ok(NpyArray {
            shape,
            fortran_order,
            data,
        })
    }

    /// Nested JSON value mirroring the array shape, in logical (C) index order.
    pub fn to_value(&self) -> Value {
        let rank = self.shape.len();
        let mut strides = vec![1usize; rank];
        if self.fortran_order {
            for axis in 1..rank {
                strides[axis] = strides[axis - 1] * self.shape[axis - 1];
            }
        } else {
            for axis in (0..rank.saturating_sub(1)).rev() {
                strides[axis] = strides[axis + 1] * self.shape[axis + 1];
            }
        }
        self.build(0, 0, &strides)
    }

    fn build(&self, axis: usize, offset: usize, strides: &[usize]) -> Value {
        if axis == self.shape.len() {
            return self.data.value_at(offset);
        }
        Value::Array(
            (0..self.shape[axis])
                .map(|i| self.build(axis + 1, offset + i * strides[axis], strides))
                .collect(),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header fields
// ────────────────────────────────────────────────────────────────────────────

/// Text following `'key':` in the header dictionary.
fn field<'a>(header: &'a str, key: &str) -> Result<&'a str, NpyError> {
    let quoted = format!("'{key}'");
    let start = header
        .find(&quoted)
        .ok_or_else(|| NpyError::Header(format!("missing '{key}'")))?;
    let rest = header[start + quoted.len()..].trim_start();
    let rest = rest
        .strip_prefix(':')
        .ok_or_else(|| NpyError::Header(format!("expected ':' after '{key}'")))?;
    Ok(rest.trim_start())
}

fn parse_descr(header: &str) -> Result<Dtype, NpyError> {
    let rest = field(header, "descr")?;
    let quote = rest
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        // structured dtypes are written as a list of fields
        .ok_or_else(|| NpyError::UnsupportedDtype(rest.chars().take(24).collect()))?;
    let inner = &rest[1..];
    let end = inner
        .find(quote)
        .ok_or_else(|| NpyError::Header("unterminated descr".to_string()))?;
    parse_dtype(&inner[..end])
}

fn parse_dtype(descr: &str) -> Result<Dtype, NpyError> {
    let unsupported = || NpyError::UnsupportedDtype(descr.to_string());
    let (order, rest) = match descr.chars().next() {
        Some(c @ ('<' | '>' | '|' | '=')) => (c, &descr[1..]),
        _ => ('=', descr),
    };
    let mut chars = rest.chars();
    let kind = chars.next().ok_or_else(unsupported)?;
    if kind == 'O' {
        return Err(NpyError::ObjectArray);
    }
    let size: usize = chars.as_str().parse().map_err(|_| unsupported())?;
    if order == '>' && size > 1 {
        return Err(unsupported());
    }
    let dtype = match (kind, size) {
        ('b', 1) => Dtype::Bool,
        ('i', 1 | 2 | 4 | 8) => Dtype::Int(size),
        ('u', 1 | 2 | 4 | 8) => Dtype::UInt(size),
        ('f', 4 | 8) => Dtype::Float(size),
        ('U', n) if n.checked_mul(4).is_some() => Dtype::Unicode(n),
        _ => return Err(unsupported()),
    };
    Ok(dtype)
}

fn parse_fortran_order(header: &str) -> Result<bool, NpyError> {
    let rest = field(header, "fortran_order")?;
    if rest.starts_with("True") {
        Ok(true)
    } else if rest.starts_with("False") {
        Ok(false)
    } else {
        Err(NpyError::Header("fortran_order is not a boolean".to_string()))
    }
}

fn checked_product(mut dims: impl Iterator<Item = usize>) -> Option<usize> {
    dims.try_fold(1usize, usize::checked_mul)
}

fn parse_shape(header: &str) -> Result<Vec<usize>, NpyError> {
    let rest = field(header, "shape")?;
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.split_once(')'))
        .map(|(inner, _)| inner)
        .ok_or_else(|| NpyError::Header("shape is not a tuple".to_string()))?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|dim| !dim.is_empty())
        .map(|dim| {
            dim.trim_end_matches('L')
                .parse::<usize>()
                .map_err(|_| NpyError::Header(format!("invalid dimension '{dim}'")))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Array data
// ────────────────────────────────────────────────────────────────────────────

fn le<const N: usize>(chunk: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(chunk);
    buf
}

fn decode(dtype: Dtype, body: &[u8], count: usize) -> Result<NpyData, NpyError> {
    let size = dtype.item_size();
    if size == 0 {
        // '<U0': every element is the empty string
        return Ok(NpyData::Text(vec![String::new(); count]));
    }
    let items = body.chunks_exact(size);
    let data = match dtype {
        Dtype::Bool => NpyData::Bool(items.map(|c| c[0] != 0).collect()),
        Dtype::Int(1) => NpyData::Int(items.map(|c| i64::from(c[0] as i8)).collect()),
        Dtype::Int(2) => NpyData::Int(items.map(|c| i64::from(i16::from_le_bytes(le(c)))).collect()),
        Dtype::Int(4) => NpyData::Int(items.map(|c| i64::from(i32::from_le_bytes(le(c)))).collect()),
        Dtype::Int(_) => NpyData::Int(items.map(|c| i64::from_le_bytes(le(c))).collect()),
        Dtype::UInt(1) => NpyData::UInt(items.map(|c| u64::from(c[0])).collect()),
        Dtype::UInt(2) => NpyData::UInt(items.map(|c| u64::from(u16::from_le_bytes(le(c)))).collect()),
        Dtype::UInt(4) => NpyData::UInt(items.map(|c| u64::from(u32::from_le_bytes(le(c)))).collect()),
        Dtype::UInt(_) => NpyData::UInt(items.map(|c| u64::from_le_bytes(le(c))).collect()),
        Dtype::Float(4) => NpyData::Float(items.map(|c| f64::from(f32::from_le_bytes(le(c)))).collect()),
        Dtype::Float(_) => NpyData::Float(items.map(|c| f64::from_le_bytes(le(c))).collect()),
        Dtype::Unicode(_) => NpyData::Text(items.map(decode_utf32).collect::<Result<_, _>>()?),
    };
    Ok(data)
}

/// NumPy pads fixed-width strings with NUL code points; they are not part of the value.
fn decode_utf32(chunk: &[u8]) -> Result<String, NpyError> {
    let mut text: String = chunk
        .chunks_exact(4)
        .map(|c| {
            let code = u32::from_le_bytes(le(c));
            char::from_u32(code).ok_or(NpyError::InvalidCodePoint(code))
        })
        .collect::<Result<_, _>>()?;
    let trimmed = text.trim_end_matches('\0').len();
    text.truncate(trimmed);
    Ok(text)
}
