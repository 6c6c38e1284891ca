use num_bigint::BigInt;

use crate::decoder::{decode_value, DecodeError};

// One decoded share: the share index `x` and the value `y` it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    x: u32,
    y: BigInt,
}

impl Point {
    pub fn new(x: u32, y: BigInt) -> Self {
        Point { x, y }
    }

    // decodes `value` written in `base` into the share at index `x`
    pub fn decode(x: u32, value: &str, base: u32) -> Result<Self, DecodeError> {
        Ok(Point { x, y: decode_value(value, base)? })
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

impl From<(u32, BigInt)> for Point {
    fn from((x, y): (u32, BigInt)) -> Self {
        Point::new(x, y)
    }
}
