use num_bigint::BigInt;
use num_traits::Signed;
use polynomials::univariate::univariate::{evaluate, UnivariatePolynomial};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::decoder::{check_base, DecodeError};
use crate::share_file::{EncodedShare, Keys, ShareFile};

// keeps every share small enough for the floating solver at low thresholds
pub const DEFAULT_COEFFICIENT_BOUND: u64 = 1_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    #[error("threshold {k} must be between 1 and the share count {n}")]
    InvalidThreshold { k: u32, n: u32 },
    #[error("secret must not be negative")]
    NegativeSecret,
    #[error(transparent)]
    Base(#[from] DecodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealParams {
    // total number of shares handed out
    pub shares: u32,
    // minimum number of shares needed to get the secret
    pub threshold: u32,
    pub base: u32,
    // random coefficients are drawn from 0..=coefficient_bound
    pub coefficient_bound: u64,
}

impl DealParams {
    pub fn new(shares: u32, threshold: u32) -> Self {
        DealParams { shares, threshold, base: 10, coefficient_bound: DEFAULT_COEFFICIENT_BOUND }
    }
}

// The secret is placed at the zero index of a random degree k - 1 polynomial,
// which is then evaluated at x = 1..=n. Each y is written in the requested base.
pub fn deal<R: Rng>(secret: &BigInt, params: &DealParams, rng: &mut R) -> Result<ShareFile, DealError> {
    if params.threshold == 0 || params.threshold > params.shares {
        return Err(DealError::InvalidThreshold { k: params.threshold, n: params.shares });
    }
    if secret.is_negative() {
        return Err(DealError::NegativeSecret);
    }
    check_base(params.base)?;

    let mut coefficients = vec![secret.clone()];
    for _ in 1..params.threshold {
        coefficients.push(BigInt::from(rng.gen_range(0..=params.coefficient_bound)));
    }
    let polynomial = UnivariatePolynomial::new(coefficients);
    debug!(degree = polynomial.degree(), shares = params.shares, "dealing shares");

    let mut file = ShareFile::new(Keys { n: params.shares as usize, k: params.threshold as usize });
    for x in 1..=params.shares {
        let y = evaluate(&polynomial, &BigInt::from(x));
        file.insert(x, EncodedShare { base: params.base, value: y.to_str_radix(params.base) });
    }

    Ok(file)
}
