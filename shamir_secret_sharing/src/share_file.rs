use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, ShareFileError};
use crate::point::Point;
use crate::solver::{find_secret_with, Options};
use crate::threshold::ThresholdPolicy;

// Share count `n` and threshold `k` written next to the shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    #[serde(deserialize_with = "lenient_number")]
    pub n: usize,
    #[serde(deserialize_with = "lenient_number")]
    pub k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedShare {
    #[serde(deserialize_with = "lenient_number")]
    pub base: u32,
    pub value: String,
}

// A JSON share file:
//
//   { "keys": { "n": 4, "k": 3 }, "1": { "base": "10", "value": "4" } }
//
// Every key except "keys" is a share index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareFile {
    pub keys: Keys,
    #[serde(flatten)]
    pub shares: BTreeMap<String, EncodedShare>,
}

// numbers may be written either as JSON numbers or as decimal strings
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(u64),
    Text(String),
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
    <T as FromStr>::Err: Display,
{
    match Lenient::deserialize(deserializer)? {
        Lenient::Number(number) => T::try_from(number)
            .map_err(|_| de::Error::custom(format!("{number} is out of range"))),
        Lenient::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("{text:?} is not a number: {e}"))),
    }
}

impl ShareFile {
    pub fn new(keys: Keys) -> Self {
        ShareFile { keys, shares: BTreeMap::new() }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let file: ShareFile = serde_json::from_str(json).map_err(ShareFileError::from)?;
        debug!(shares = file.shares.len(), n = file.keys.n, k = file.keys.k, "parsed share file");
        Ok(file)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self).map_err(ShareFileError::from)?)
    }

    pub fn insert(&mut self, x: u32, share: EncodedShare) {
        self.shares.insert(x.to_string(), share);
    }

    // decodes every share, in ascending index order
    pub fn points(&self) -> Result<Vec<Point>, Error> {
        let mut points = Vec::with_capacity(self.shares.len());
        for (key, share) in &self.shares {
            let x: u32 = key
                .trim()
                .parse()
                .map_err(|_| ShareFileError::InvalidIndex(key.clone()))?;
            let point = Point::decode(x, &share.value, share.base)
                .map_err(|source| Error::ShareDecode { x, source })?;
            points.push(point);
        }

        points.sort_by_key(|point| point.x());
        Ok(points)
    }

    pub fn reconstruct(&self, policy: ThresholdPolicy, options: &Options) -> Result<BigInt, Error> {
        let points = policy.select(self.points()?, &self.keys)?;
        find_secret_with(&points, options)
    }
}
