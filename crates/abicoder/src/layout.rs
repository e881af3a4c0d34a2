//! Head/tail layout engine
//!
//! A sequence of values is laid out as a head region followed by a tail
//! region. Static values sit in the head in place; a dynamic value leaves a
//! single word in the head holding the byte offset (from the head start) of
//! its encoding in the tail. Parameter lists, static arrays and the element
//! run of dynamic arrays all go through the same packer, so nesting works at
//! any depth.

use abicoder_primitives::{U256, WORD};

use crate::{AbiError, ParamType, Value};

/// Encode a U256 as one big-endian word
pub fn encode_word(value: &U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// Encode a length or offset as one word
pub fn encode_usize(value: usize) -> [u8; WORD] {
    encode_word(&U256::from(value))
}

/// Right-pad `data` with zeros up to the next word boundary
pub fn pad_right(data: &[u8]) -> Vec<u8> {
    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    padded
}

/// Length word followed by the padded payload (`string` / `bytes` layout)
pub fn encode_length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut result = encode_usize(data.len()).to_vec();
    result.extend(pad_right(data));
    result
}

/// Lay out `values` as head region ++ tail region
pub fn encode_sequence(values: &[Value]) -> Vec<u8> {
    let head_size: usize = values.iter().map(Value::head_size).sum();

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for value in values {
        if value.is_dynamic() {
            let offset = head_size + tail.len();
            tracing::trace!("dynamic {} at tail offset {}", value.param_type(), offset);
            head.extend_from_slice(&encode_usize(offset));
            tail.extend(value.encode());
        } else {
            head.extend(value.encode());
        }
    }

    head.extend(tail);
    head
}

/// Borrow the word starting at `at`
pub fn read_word(data: &[u8], at: usize) -> Result<&[u8], AbiError> {
    check_length(data, at.saturating_add(WORD))?;
    Ok(&data[at..at + WORD])
}

/// Read a word that must hold a length or offset small enough to index memory
pub fn read_usize(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let value = U256::from_big_endian(read_word(data, at)?);
    if value.bits() > 64 {
        return Err(AbiError::malformed(format!(
            "word at byte {} is too large for a length or offset: {}",
            at, value
        )));
    }
    usize::try_from(value.low_u64()).map_err(|_| {
        AbiError::malformed(format!("word at byte {} does not fit in usize", at))
    })
}

/// Check that data has at least `required` bytes
pub fn check_length(data: &[u8], required: usize) -> Result<(), AbiError> {
    if data.len() < required {
        return Err(AbiError::malformed(format!(
            "Insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}

/// How many times over a buffer's words a decode may materialize.
///
/// Well-formed buffers never reuse a tail entry, so they stay within one
/// pass; offsets that alias the same sub-array run out quickly.
pub const DECODE_BUDGET_FACTOR: usize = 4;

/// Words a single decode call may still materialize.
///
/// One budget is shared by every nesting level of a decode, so aliased
/// offsets cannot make the output grow faster than the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeBudget {
    remaining: usize,
}

impl DecodeBudget {
    /// Budget for decoding `data`
    pub fn for_buffer(data: &[u8]) -> Self {
        Self {
            remaining: data.len().div_ceil(WORD).saturating_mul(DECODE_BUDGET_FACTOR),
        }
    }

    /// Words left
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Account for `words` words of `ty` before materializing them
    pub fn charge(&mut self, words: usize, ty: &ParamType) -> Result<(), AbiError> {
        if words > self.remaining {
            return Err(AbiError::malformed(format!(
                "decoding {} exceeds what the buffer can hold; offsets may alias the same data",
                ty
            )));
        }
        self.remaining -= words;
        Ok(())
    }
}

/// Decode one value per type from a head/tail region starting at `data[0]`
pub fn decode_sequence(types: &[ParamType], data: &[u8]) -> Result<Vec<Value>, AbiError> {
    let mut budget = DecodeBudget::for_buffer(data);
    decode_slots(types.iter(), data, &mut budget)
}

/// Decode `count` values of the same type from a head/tail region
pub fn decode_repeated(
    elem: &ParamType,
    count: usize,
    data: &[u8],
    budget: &mut DecodeBudget,
) -> Result<Vec<Value>, AbiError> {
    // Reject impossible counts before walking them
    let needed = elem.head_size().saturating_mul(count);
    if needed > data.len() {
        return Err(AbiError::malformed(format!(
            "{} elements of {} need {} bytes, have {}",
            count,
            elem,
            needed,
            data.len()
        )));
    }
    decode_slots(std::iter::repeat(elem).take(count), data, budget)
}

fn decode_slots<'a, I>(types: I, data: &[u8], budget: &mut DecodeBudget) -> Result<Vec<Value>, AbiError>
where
    I: Iterator<Item = &'a ParamType> + Clone,
{
    let head_size = types
        .clone()
        .fold(0usize, |acc, ty| acc.saturating_add(ty.head_size()));
    if head_size > data.len() {
        return Err(AbiError::malformed(format!(
            "head region needs {} bytes, buffer has {}",
            head_size,
            data.len()
        )));
    }

    let mut values = Vec::new();
    let mut cursor = 0;

    for ty in types {
        let value = if ty.is_dynamic() {
            let offset = read_usize(data, cursor)?;
            tracing::trace!("slot {} ({}) -> offset {}", cursor / WORD, ty, offset);
            if offset.saturating_add(WORD) > data.len() {
                return Err(AbiError::malformed(format!(
                    "offset {} for {} points outside buffer of {} bytes",
                    offset,
                    ty,
                    data.len()
                )));
            }
            Value::read_within(ty, &data[offset..], budget)?
        } else {
            Value::read_within(ty, &data[cursor..cursor + ty.head_size()], budget)?
        };
        values.push(value);
        cursor += ty.head_size();
    }

    Ok(values)
}
