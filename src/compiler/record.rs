//! Bytecode records and their binary form.
//!
//! A compiled program is a flat sequence of records with no header. The
//! first byte of each record is its [`Opcode`], which is enough to find where
//! the next record starts, so [`disassemble`] can walk a stream back into
//! records.

use crate::compiler::isa::Opcode;
use crate::compiler::selector::{SELECTOR_LEN, Selector};
use crate::types::address::Address;
use crate::types::encoding::{
    Decode, DecodeError, Encode, EncodeSink, read_bytes, read_u32_be,
};
use crate::types::word::{WORD_LEN, Word};

/// Largest payload the 4-byte length prefix can describe.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// A `CALL` record: target address plus selector and argument words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub address: Address,
    pub selector: Selector,
    pub words: Vec<Word>,
}

impl CallRecord {
    /// Payload size in bytes: selector plus one word per argument.
    pub fn payload_len(&self) -> usize {
        SELECTOR_LEN + WORD_LEN * self.words.len()
    }
}

/// One unit of the emitted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Call(CallRecord),
    /// Single `0xFF` byte standing in for a blank source line.
    Pad,
}

impl Record {
    pub fn opcode(&self) -> Opcode {
        match self {
            Record::Call(_) => Opcode::Call,
            Record::Pad => Opcode::Pad,
        }
    }
}

impl Encode for Record {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&[self.opcode() as u8]);
        if let Record::Call(call) = self {
            call.address.encode(out);
            // Bounded by MAX_PAYLOAD_LEN, enforced when the record is built.
            out.write(&(call.payload_len() as u32).to_be_bytes());
            call.selector.encode(out);
            call.words.encode(out);
        }
    }
}

impl Decode for Record {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let opcode = Opcode::try_from(read_bytes(input, 1)?[0])?;
        match opcode {
            Opcode::Pad => Ok(Record::Pad),
            Opcode::Call => {
                let address = Address::decode(input)?;
                let len = read_u32_be(input)? as usize;
                let mut payload = read_bytes(input, len)?;

                if len < SELECTOR_LEN {
                    return Err(DecodeError::InvalidValue("payload shorter than a selector"));
                }
                if (len - SELECTOR_LEN) % WORD_LEN != 0 {
                    return Err(DecodeError::InvalidValue(
                        "arguments are not a whole number of words",
                    ));
                }

                let selector = Selector::decode(&mut payload)?;
                let mut words = Vec::with_capacity(payload.len() / WORD_LEN);
                while !payload.is_empty() {
                    words.push(Word::decode(&mut payload)?);
                }

                Ok(Record::Call(CallRecord {
                    address,
                    selector,
                    words,
                }))
            }
        }
    }
}

/// Splits an emitted byte stream back into records.
pub fn disassemble(bytes: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let mut input = bytes;
    let mut records = Vec::new();
    while !input.is_empty() {
        records.push(Record::decode(&mut input)?);
    }
    Ok(records)
}
