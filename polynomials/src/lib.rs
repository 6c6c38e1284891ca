// Integer univariate polynomials and the dense real systems used to fit them.
pub mod univariate;
pub mod linear;
