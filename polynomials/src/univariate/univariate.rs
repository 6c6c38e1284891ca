use std::ops::{Mul, Add};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use thiserror::Error;

// coefficients are stored lowest degree first: coefficients[i] multiplies x^i
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnivariatePolynomial {
    pub coefficients: Vec<BigInt>
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("no points to interpolate")]
    Empty,
    #[error("points {first} and {second} share the abscissa {x}")]
    DuplicateAbscissa { first: usize, second: usize, x: BigInt },
    // the points lie on a polynomial with rational, not integer, coefficients
    #[error("coefficient of x^{degree} is not an integer ({numerator}/{denominator})")]
    NonIntegerCoefficient { degree: usize, numerator: BigInt, denominator: BigInt },
}

impl UnivariatePolynomial {
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        UnivariatePolynomial { coefficients }
    }

    pub fn constant(value: BigInt) -> Self {
        UnivariatePolynomial { coefficients: vec![value] }
    }

    // degree of the stored representation, trailing zeros included
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn scale(&self, factor: &BigInt) -> Self {
        UnivariatePolynomial {
            coefficients: self.coefficients.iter().map(|c| c * factor).collect()
        }
    }
}

impl Mul for UnivariatePolynomial {
    type Output = Self;

    fn mul(self, other: UnivariatePolynomial) -> UnivariatePolynomial {
        let mut result: UnivariatePolynomial = UnivariatePolynomial{ coefficients: vec![]};

        for (i, value1) in self.coefficients.iter().enumerate() {
            for (j, value2) in other.coefficients.iter().enumerate() {
                if result.coefficients.len() == i + j {
                    result.coefficients.push(BigInt::zero());
                }
                result.coefficients[i + j] += value1 * value2;
            }
        }

        result
    }
}

impl Add for UnivariatePolynomial {
    type Output = Self;

    fn add(self, other: UnivariatePolynomial) -> UnivariatePolynomial {
        let (mut lhs, rhs) = if self.coefficients.len() >= other.coefficients.len() {
            (self, other)
        } else {
            (other, self)
        };

        for (i, value) in rhs.coefficients.into_iter().enumerate() {
            lhs.coefficients[i] += value;
        }

        lhs
    }
}

// Lagrange interpolation over the integers.
// With N_j(x) = prod_{k != j} (x - x_k) and d_j = prod_{k != j} (x_j - x_k), every basis
// term y_j * N_j / d_j is brought onto the common denominator D = lcm(d_j), so
// D * P(x) = sum_j y_j * (D / d_j) * N_j(x) stays integral. Dividing by D at the end
// must be exact, otherwise the points do not sit on an integer polynomial.
pub fn interpolate(points: &[(BigInt, BigInt)]) -> Result<UnivariatePolynomial, InterpolationError> {
    if points.is_empty() {
        return Err(InterpolationError::Empty);
    }

    let mut numerators = Vec::with_capacity(points.len());
    let mut denominators = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        let mut numerator = UnivariatePolynomial::constant(BigInt::one());
        let mut denominator = BigInt::one();

        for (_i, _point) in points.iter().enumerate() {
            if i == _i { continue; }
            if point.0 == _point.0 {
                return Err(InterpolationError::DuplicateAbscissa {
                    first: i.min(_i),
                    second: i.max(_i),
                    x: point.0.clone(),
                });
            }

            numerator = numerator * UnivariatePolynomial::new(vec![-&_point.0, BigInt::one()]);
            denominator *= &point.0 - &_point.0;
        }

        numerators.push(numerator);
        denominators.push(denominator);
    }

    let common = denominators.iter().fold(BigInt::one(), |acc, d| acc.lcm(d));

    let mut scaled = UnivariatePolynomial::new(vec![BigInt::zero(); points.len()]);
    for ((point, numerator), denominator) in points.iter().zip(numerators).zip(denominators.iter()) {
        let factor = &point.1 * (&common / denominator);
        scaled = scaled + numerator.scale(&factor);
    }

    let mut coefficients = Vec::with_capacity(scaled.coefficients.len());
    for (degree, value) in scaled.coefficients.into_iter().enumerate() {
        let (quotient, remainder) = value.div_rem(&common);
        if !remainder.is_zero() {
            let divisor = value.gcd(&common);
            return Err(InterpolationError::NonIntegerCoefficient {
                degree,
                numerator: &value / &divisor,
                denominator: &common / &divisor,
            });
        }
        coefficients.push(quotient);
    }

    Ok(UnivariatePolynomial { coefficients })
}

// Horner evaluation
pub fn evaluate(polynomial: &UnivariatePolynomial, x_value: &BigInt) -> BigInt {
    polynomial
        .coefficients
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, coefficient| acc * x_value + coefficient)
}
