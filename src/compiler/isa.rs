//! Opcode table for the emitted record stream.
//!
//! # Record Format
//!
//! - `CALL` (`0x01`): opcode, 20-byte address, 4-byte big-endian payload
//!   length, payload (4-byte selector followed by 32-byte words)
//! - `PAD` (`0xFF`): opcode only, one per blank source line

use crate::types::encoding::DecodeError;

macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $byte:expr
        ),* $(,)?
    ) => {
        /// Record opcodes.
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Opcode {
            $(
                $(#[$doc])*
                $name = $byte,
            )*
        }

        impl TryFrom<u8> for Opcode {
            type Error = DecodeError;

            fn try_from(byte: u8) -> Result<Self, Self::Error> {
                match byte {
                    $( b if b == Opcode::$name as u8 => Ok(Opcode::$name), )*
                    other => Err(DecodeError::UnknownOpcode(other)),
                }
            }
        }
    };
}

define_opcodes! {
    /// CALL address, payload ; invoke `address` with selector + words
    Call = 0x01,
    /// PAD ; spacer emitted for a blank source line
    Pad = 0xFF,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_bytes() {
        assert_eq!(Opcode::Call as u8, 0x01);
        assert_eq!(Opcode::Pad as u8, 0xFF);
    }

    #[test]
    fn decode_known_and_unknown() {
        assert_eq!(Opcode::try_from(0x01), Ok(Opcode::Call));
        assert_eq!(Opcode::try_from(0xFF), Ok(Opcode::Pad));
        assert_eq!(Opcode::try_from(0x02), Err(DecodeError::UnknownOpcode(0x02)));
    }
}
