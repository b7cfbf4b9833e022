use std::{fmt, ops::Mul};

/// A polynomial in the Laplace variable `s`, coefficients highest power first.
///
/// `[1.0, 2.0, 4.0]` is `s² + 2s + 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial(Vec<f64>);

impl Polynomial {
    /// Creates a polynomial from coefficients ordered highest power first.
    ///
    /// An empty coefficient list is the zero polynomial.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            Self(vec![0.0])
        } else {
            Self(coefficients)
        }
    }

    /// Coefficients ordered highest power first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.0
    }

    /// Degree implied by the coefficient count (leading zeros are kept).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.0.len() - 1
    }

    /// Coefficient of `s⁰`.
    #[must_use]
    pub fn constant_term(&self) -> f64 {
        self.0[self.0.len() - 1]
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    /// Multiplies two polynomials by convolving their coefficients.
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut product = vec![0.0; self.0.len() + rhs.0.len() - 1];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in rhs.0.iter().enumerate() {
                product[i + j] += a * b;
            }
        }
        Polynomial(product)
    }
}

impl fmt::Display for Polynomial {
    /// Writes the polynomial in descending powers, e.g. `1 s^2 + 0.5 s^1 + 4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.degree();
        for (i, coefficient) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            match degree - i {
                0 => write!(f, "{coefficient}")?,
                power => write!(f, "{coefficient} s^{power}")?,
            }
        }
        Ok(())
    }
}

/// A rational transfer function `N(s) / D(s)`.
///
/// Used for display of the model `G(s)`, the test input `U(s)` and the
/// output `Y(s) = G(s) U(s)`, and as the source of the state-space
/// realization used by the numerical sampling method.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl TransferFunction {
    /// Creates a transfer function from its numerator and denominator.
    #[must_use]
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    #[must_use]
    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    /// Steady-state gain `N(0) / D(0)`.
    ///
    /// Returns `None` when the denominator has a root at the origin, as for
    /// the step input `A / s`.
    #[must_use]
    pub fn dc_gain(&self) -> Option<f64> {
        let den = self.denominator.constant_term();
        (den != 0.0).then(|| self.numerator.constant_term() / den)
    }

    /// Whether the numerator degree is below the denominator degree.
    #[must_use]
    pub fn is_strictly_proper(&self) -> bool {
        self.numerator.degree() < self.denominator.degree()
    }
}

impl Mul for &TransferFunction {
    type Output = TransferFunction;

    /// Series connection: multiplies numerators and denominators.
    fn mul(self, rhs: &TransferFunction) -> TransferFunction {
        TransferFunction {
            numerator: &self.numerator * &rhs.numerator,
            denominator: &self.denominator * &rhs.denominator,
        }
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn multiply_polynomials() {
        // (s + 1)(s + 2) = s² + 3s + 2
        let a = Polynomial::new(vec![1.0, 1.0]);
        let b = Polynomial::new(vec![1.0, 2.0]);
        assert_eq!((&a * &b).coefficients(), &[1.0, 3.0, 2.0]);

        // Multiplying by s appends a zero constant term.
        let s = Polynomial::new(vec![1.0, 0.0]);
        assert_eq!((&b * &s).coefficients(), &[1.0, 2.0, 0.0]);
    }

    #[test]
    fn empty_polynomial_is_zero() {
        let p = Polynomial::new(Vec::new());
        assert_eq!(p.degree(), 0);
        assert_relative_eq!(p.constant_term(), 0.0);
    }

    #[test]
    fn display_descending_powers() {
        let p = Polynomial::new(vec![1.0, 0.5, 4.0]);
        assert_eq!(p.to_string(), "1 s^2 + 0.5 s^1 + 4");

        let tf = TransferFunction::new(Polynomial::new(vec![2.0]), Polynomial::new(vec![3.0, 1.0]));
        assert_eq!(tf.to_string(), "(2) / (3 s^1 + 1)");
    }

    #[test]
    fn dc_gain_and_integrators() {
        let g = TransferFunction::new(Polynomial::new(vec![2.0]), Polynomial::new(vec![3.0, 1.0]));
        assert_relative_eq!(g.dc_gain().unwrap(), 2.0);
        assert!(g.is_strictly_proper());

        let step = TransferFunction::new(Polynomial::new(vec![1.0]), Polynomial::new(vec![1.0, 0.0]));
        assert_eq!(step.dc_gain(), None);

        let y = &g * &step;
        assert_eq!(y.numerator().coefficients(), &[2.0]);
        assert_eq!(y.denominator().coefficients(), &[3.0, 1.0, 0.0]);
    }
}
