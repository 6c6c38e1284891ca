use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use polynomials::linear::linear_system::LinearSystem;
use polynomials::univariate::univariate::interpolate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, PrecisionError};
use crate::point::Point;

// doubles hold integers exactly up to 2^53
const EXACT_DOUBLE_BITS: u64 = 53;

pub const DEFAULT_TOLERANCE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    // Vandermonde system in doubles, Gaussian elimination, rounding
    #[default]
    Float,
    // Lagrange interpolation over big integers
    Exact,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(Strategy::Float),
            "exact" => Ok(Strategy::Exact),
            other => Err(format!("unknown strategy {other:?}, expected \"float\" or \"exact\"")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Float => write!(f, "float"),
            Strategy::Exact => write!(f, "exact"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub strategy: Strategy,
    // largest accepted distance between a solved coefficient and its rounded value
    pub tolerance: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options { strategy: Strategy::Float, tolerance: DEFAULT_TOLERANCE }
    }
}

// Recovers the constant term of the polynomial through `points`, using every point.
pub fn find_secret(points: &[Point]) -> Result<BigInt, Error> {
    find_secret_with(points, &Options::default())
}

pub fn find_secret_with(points: &[Point], options: &Options) -> Result<BigInt, Error> {
    let coefficients = solve_coefficients(points, options)?;
    let degree = points.len() - 1;
    extract_secret(&coefficients, degree).cloned()
}

// Coefficients of the degree `points.len() - 1` polynomial through `points`,
// highest degree first.
pub fn solve_coefficients(points: &[Point], options: &Options) -> Result<Vec<BigInt>, Error> {
    if points.is_empty() {
        return Err(Error::NotEnoughPoints { required: 1, available: 0 });
    }

    debug!(points = points.len(), strategy = %options.strategy, "solving for coefficients");
    match options.strategy {
        Strategy::Float => solve_float(points, options.tolerance),
        Strategy::Exact => solve_exact(points),
    }
}

// the secret sits at position `degree`, the x^0 column
pub fn extract_secret(coefficients: &[BigInt], degree: usize) -> Result<&BigInt, Error> {
    coefficients.get(degree).ok_or(Error::NotEnoughPoints {
        required: degree + 1,
        available: coefficients.len(),
    })
}

fn solve_float(points: &[Point], tolerance: f64) -> Result<Vec<BigInt>, Error> {
    let pairs = points
        .iter()
        .map(|point| share_to_f64(point).map(|y| (f64::from(point.x()), y)))
        .collect::<Result<Vec<(f64, f64)>, Error>>()?;

    let solution = LinearSystem::vandermonde(&pairs).solve()?;

    solution
        .iter()
        .enumerate()
        .map(|(index, value)| round_coefficient(index, *value, tolerance))
        .collect()
}

fn solve_exact(points: &[Point]) -> Result<Vec<BigInt>, Error> {
    let pairs: Vec<(BigInt, BigInt)> = points
        .iter()
        .map(|point| (BigInt::from(point.x()), point.y().clone()))
        .collect();

    let polynomial = interpolate(&pairs)?;
    let mut coefficients = polynomial.coefficients;
    coefficients.reverse();
    Ok(coefficients)
}

fn share_to_f64(point: &Point) -> Result<f64, Error> {
    if point.y().bits() > EXACT_DOUBLE_BITS {
        warn!(x = point.x(), bits = point.y().bits(), "share value loses precision as a double");
    }

    point
        .y()
        .to_f64()
        .filter(|value| value.is_finite())
        .ok_or(Error::Precision(PrecisionError::UnrepresentableShare { x: point.x() }))
}

// rounds half up, floor(v + 0.5)
fn round_coefficient(index: usize, value: f64, tolerance: f64) -> Result<BigInt, Error> {
    if !value.is_finite() {
        return Err(PrecisionError::NonFinite { index, value }.into());
    }

    let rounded = (value + 0.5).floor();
    let residue = (value - rounded).abs();
    if residue > tolerance {
        return Err(PrecisionError::Residue { index, value, residue, tolerance }.into());
    }
    debug!(index, value, residue, "rounded coefficient");

    BigInt::from_f64(rounded).ok_or(Error::Precision(PrecisionError::NonFinite { index, value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Singularity;
    use num_traits::One;
    use polynomials::univariate::univariate::{evaluate, UnivariatePolynomial};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn points(raw: &[(u32, i64)]) -> Vec<Point> {
        raw.iter().map(|(x, y)| Point::new(*x, BigInt::from(*y))).collect()
    }

    fn exact() -> Options {
        Options { strategy: Strategy::Exact, ..Options::default() }
    }

    #[test]
    fn test_find_secret_quadratic() {
        // 3x^2 + 2x + 7
        let points = points(&[(1, 12), (2, 23), (3, 40)]);
        assert_eq!(find_secret(&points).unwrap(), BigInt::from(7));
        assert_eq!(find_secret_with(&points, &exact()).unwrap(), BigInt::from(7));
    }

    #[test]
    fn test_find_secret_line() {
        // 4x + 1
        let points = points(&[(1, 5), (2, 9)]);
        assert_eq!(find_secret(&points).unwrap(), BigInt::from(1));
        assert_eq!(find_secret_with(&points, &exact()).unwrap(), BigInt::from(1));
    }

    #[test]
    fn test_single_point_is_the_secret() {
        let points = points(&[(3, 42)]);
        assert_eq!(find_secret(&points).unwrap(), BigInt::from(42));
    }

    #[test]
    fn test_coefficients_highest_degree_first() {
        let points = points(&[(1, 12), (2, 23), (3, 40)]);
        let expected: Vec<BigInt> = vec![3, 2, 7].into_iter().map(BigInt::from).collect();
        assert_eq!(solve_coefficients(&points, &Options::default()).unwrap(), expected);
        assert_eq!(solve_coefficients(&points, &exact()).unwrap(), expected);
    }

    #[test]
    fn test_duplicate_index_is_singular() {
        let points = points(&[(1, 5), (1, 9)]);
        assert!(matches!(
            find_secret(&points),
            Err(Error::SingularSystem(Singularity::Pivot { .. }))
        ));
        assert!(matches!(
            find_secret_with(&points, &exact()),
            Err(Error::SingularSystem(Singularity::DuplicateIndex { .. }))
        ));
    }

    #[test]
    fn test_no_points() {
        assert!(matches!(
            find_secret(&[]),
            Err(Error::NotEnoughPoints { required: 1, available: 0 })
        ));
    }

    #[test]
    fn test_extract_secret() {
        let coefficients: Vec<BigInt> = vec![3, 2, 7].into_iter().map(BigInt::from).collect();
        assert_eq!(extract_secret(&coefficients, 2).unwrap(), &BigInt::from(7));
        assert!(extract_secret(&coefficients, 3).is_err());
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut rng = StdRng::seed_from_u64(11);
        for degree in 1..6 {
            let coefficients: Vec<BigInt> = (0..=degree)
                .map(|_| BigInt::from(rng.gen_range(0..1000)))
                .collect();
            let polynomial = UnivariatePolynomial::new(coefficients.clone());
            let mut points: Vec<Point> = (1..=degree as u32 + 1)
                .map(|x| Point::new(x, evaluate(&polynomial, &BigInt::from(x))))
                .collect();

            for _ in 0..5 {
                points.shuffle(&mut rng);
                assert_eq!(find_secret(&points).unwrap(), coefficients[0]);
                assert_eq!(find_secret_with(&points, &exact()).unwrap(), coefficients[0]);
            }
        }
    }

    #[test]
    fn test_exact_beyond_double_precision() {
        // secret = 2^200 + 1 on a cubic
        let secret: BigInt = (BigInt::one() << 200u32) + 1;
        let polynomial = UnivariatePolynomial::new(vec![
            secret.clone(),
            BigInt::from(123_456_789),
            BigInt::from(1) << 90u32,
            BigInt::from(17),
        ]);
        let points: Vec<Point> = [2u32, 5, 9, 11]
            .iter()
            .map(|x| Point::new(*x, evaluate(&polynomial, &BigInt::from(*x))))
            .collect();

        assert_eq!(find_secret_with(&points, &exact()).unwrap(), secret);
    }

    #[test]
    fn test_high_degree_with_distinct_indices() {
        // coefficients cycle through 1, 2, 3, so the secret is 1
        for count in [12u32, 13] {
            let coefficients: Vec<BigInt> = (0..count).map(|i| BigInt::from(i % 3 + 1)).collect();
            let polynomial = UnivariatePolynomial::new(coefficients.clone());
            let points: Vec<Point> = (1..=count)
                .map(|x| Point::new(x, evaluate(&polynomial, &BigInt::from(x))))
                .collect();

            let mut expected = coefficients;
            expected.reverse();
            assert_eq!(solve_coefficients(&points, &Options::default()).unwrap(), expected);
            assert_eq!(find_secret(&points).unwrap(), BigInt::from(1));
        }
    }

    #[test]
    fn test_residue_over_tolerance() {
        // (x^2 + x) / 2 has half-integer coefficients
        let points = points(&[(1, 1), (2, 3), (3, 6)]);
        assert!(matches!(
            find_secret(&points),
            Err(Error::Precision(PrecisionError::Residue { .. }))
        ));
        assert!(matches!(
            find_secret_with(&points, &exact()),
            Err(Error::Precision(PrecisionError::NonInteger { .. }))
        ));
    }

    #[test]
    fn test_unrepresentable_share() {
        let points = vec![Point::new(1, BigInt::one() << 2000u32), Point::new(2, BigInt::one())];
        assert!(matches!(
            find_secret(&points),
            Err(Error::Precision(PrecisionError::UnrepresentableShare { x: 1 }))
        ));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_coefficient(0, 2.5, 0.5).unwrap(), BigInt::from(3));
        assert_eq!(round_coefficient(0, -2.5, 0.5).unwrap(), BigInt::from(-2));
        assert_eq!(round_coefficient(0, 6.9999999, DEFAULT_TOLERANCE).unwrap(), BigInt::from(7));
        assert!(round_coefficient(0, f64::NAN, DEFAULT_TOLERANCE).is_err());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("float".parse::<Strategy>().unwrap(), Strategy::Float);
        assert_eq!("exact".parse::<Strategy>().unwrap(), Strategy::Exact);
        assert!("modular".parse::<Strategy>().is_err());
    }
}
