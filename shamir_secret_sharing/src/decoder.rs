use num_bigint::{BigInt, BigUint};
use thiserror::Error;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("base {base} is outside the supported range 2..=36")]
    UnsupportedBase { base: u32 },
    #[error("share value is empty")]
    Empty,
    #[error("character {character:?} at position {position} is not a base {base} digit")]
    InvalidDigit { character: char, position: usize, base: u32 },
}

pub fn check_base(base: u32) -> Result<(), DecodeError> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(DecodeError::UnsupportedBase { base })
    }
}

// Digits are '0'-'9' then 'a'-'z' (either case) for 10..36. No sign, no separators.
pub fn decode_value(value: &str, base: u32) -> Result<BigInt, DecodeError> {
    check_base(base)?;
    if value.is_empty() {
        return Err(DecodeError::Empty);
    }

    let digits = value
        .chars()
        .enumerate()
        .map(|(position, character)| {
            character
                .to_digit(base)
                .map(|digit| digit as u8)
                .ok_or(DecodeError::InvalidDigit { character, position, base })
        })
        .collect::<Result<Vec<u8>, DecodeError>>()?;

    BigUint::from_radix_be(&digits, base)
        .map(BigInt::from)
        .ok_or(DecodeError::UnsupportedBase { base })
}
