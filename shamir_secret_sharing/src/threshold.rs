use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Error;
use crate::point::Point;
use crate::share_file::Keys;

// What to do with the `k` recorded next to the shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdPolicy {
    // use every point, whatever k says
    #[default]
    Ignore,
    // the point count must be exactly k
    Require,
    // keep the k lowest share indices
    TakeFirst,
}

impl ThresholdPolicy {
    pub fn select(&self, mut points: Vec<Point>, keys: &Keys) -> Result<Vec<Point>, Error> {
        if points.len() > keys.n {
            warn!(shares = points.len(), n = keys.n, "more shares than the recorded total");
        }

        match self {
            ThresholdPolicy::Ignore => {
                if points.len() != keys.k {
                    info!(shares = points.len(), k = keys.k, "threshold not enforced, using every share");
                }
                Ok(points)
            }
            ThresholdPolicy::Require => {
                if points.len() != keys.k {
                    return Err(Error::Threshold { k: keys.k, available: points.len() });
                }
                Ok(points)
            }
            ThresholdPolicy::TakeFirst => {
                if points.len() < keys.k {
                    return Err(Error::Threshold { k: keys.k, available: points.len() });
                }
                points.sort_by_key(|point| point.x());
                points.truncate(keys.k);
                Ok(points)
            }
        }
    }
}

impl FromStr for ThresholdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(ThresholdPolicy::Ignore),
            "require" => Ok(ThresholdPolicy::Require),
            "take-first" => Ok(ThresholdPolicy::TakeFirst),
            other => Err(format!(
                "unknown threshold policy {other:?}, expected \"ignore\", \"require\" or \"take-first\""
            )),
        }
    }
}

impl fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThresholdPolicy::Ignore => "ignore",
            ThresholdPolicy::Require => "require",
            ThresholdPolicy::TakeFirst => "take-first",
        };
        write!(f, "{name}")
    }
}
