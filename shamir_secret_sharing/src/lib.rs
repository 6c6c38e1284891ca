// This crate reconstructs a secret split with Shamir Secret Sharing.
// Every share is a point (x, y) on a polynomial whose constant term is the secret.
// Share values arrive as text in some base and are decoded into big integers.
// The polynomial through k points is found by solving the Vandermonde system
// (or, with the exact strategy, by Lagrange interpolation over the integers),
// and the coefficient of x^0 is handed back as the secret.

pub mod dealer;
pub mod decoder;
pub mod error;
pub mod point;
pub mod share_file;
pub mod solver;
pub mod threshold;

pub use decoder::{decode_value, DecodeError};
pub use error::{Error, PrecisionError, Singularity};
pub use point::Point;
pub use share_file::{EncodedShare, Keys, ShareFile};
pub use solver::{extract_secret, find_secret, find_secret_with, solve_coefficients, Options, Strategy};
pub use threshold::ThresholdPolicy;
