/// ## Numeric value domain
///
/// The evaluator is generic over the value type it stacks. A `Value` is
/// either a plain scalar or an equal-length numeric buffer evaluated
/// elementwise, with constants broadcast across the batch length.
/// Everything the operator and function tables can do is named here, so
/// a new numeric representation only has to fill in this contract.

pub trait Value: Clone + std::fmt::Debug {
    /// Lift a scalar into this domain. `len` is the batch width and is
    /// ignored by scalar implementations.
    fn broadcast(value: f64, len: usize) -> Self;
    /// Batch width; scalars report 0.
    fn len(&self) -> usize;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;
    fn pow(self, rhs: Self) -> Self;
    fn max(self, rhs: Self) -> Self;
    fn min(self, rhs: Self) -> Self;

    fn neg(self) -> Self;
    fn abs(self) -> Self;
    /// `x*x`, the fast path for `^2`.
    fn square(self) -> Self;
    /// `x*x*x`, the fast path for `^3`.
    fn cube(self) -> Self;
    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;
}

/// Stack pop for the instruction loop. Underflow means the program was
/// never validated; that is a contract violation, not a user error.
pub(crate) fn pop<V: Value>(stack: &mut Vec<V>) -> V {
    match stack.pop() {
        Some(v) => v,
        None => panic!("value stack underflow: program was not validated"),
    }
}

impl Value for f64 {
    fn broadcast(value: f64, _len: usize) -> f64 {
        value
    }
    fn len(&self) -> usize {
        0
    }
    fn add(self, rhs: f64) -> f64 {
        self + rhs
    }
    fn sub(self, rhs: f64) -> f64 {
        self - rhs
    }
    fn mul(self, rhs: f64) -> f64 {
        self * rhs
    }
    fn div(self, rhs: f64) -> f64 {
        self / rhs
    }
    fn pow(self, rhs: f64) -> f64 {
        f64::powf(self, rhs)
    }
    fn max(self, rhs: f64) -> f64 {
        f64::max(self, rhs)
    }
    fn min(self, rhs: f64) -> f64 {
        f64::min(self, rhs)
    }
    fn neg(self) -> f64 {
        -self
    }
    fn abs(self) -> f64 {
        f64::abs(self)
    }
    fn square(self) -> f64 {
        self * self
    }
    fn cube(self) -> f64 {
        self * self * self
    }
    fn sqrt(self) -> f64 {
        f64::sqrt(self)
    }
    fn exp(self) -> f64 {
        f64::exp(self)
    }
    fn ln(self) -> f64 {
        f64::ln(self)
    }
    fn sin(self) -> f64 {
        f64::sin(self)
    }
    fn cos(self) -> f64 {
        f64::cos(self)
    }
    fn tan(self) -> f64 {
        f64::tan(self)
    }
    fn asin(self) -> f64 {
        f64::asin(self)
    }
    fn acos(self) -> f64 {
        f64::acos(self)
    }
    fn atan(self) -> f64 {
        f64::atan(self)
    }
    fn sinh(self) -> f64 {
        f64::sinh(self)
    }
    fn cosh(self) -> f64 {
        f64::cosh(self)
    }
    fn tanh(self) -> f64 {
        f64::tanh(self)
    }
    fn asinh(self) -> f64 {
        f64::asinh(self)
    }
    fn acosh(self) -> f64 {
        f64::acosh(self)
    }
    fn atanh(self) -> f64 {
        f64::atanh(self)
    }
}

/// Equal-length buffer of doubles, evaluated elementwise. One program
/// execution computes the formula at every point of the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch(pub Vec<f64>);

impl Batch {
    fn map<F: Fn(f64) -> f64>(self, f: F) -> Batch {
        Batch(self.0.into_iter().map(f).collect())
    }

    fn zip<F: Fn(f64, f64) -> f64>(self, rhs: Batch, f: F) -> Batch {
        debug_assert_eq!(self.0.len(), rhs.0.len());
        Batch(
            self.0
                .into_iter()
                .zip(rhs.0.into_iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        )
    }
}

impl Value for Batch {
    fn broadcast(value: f64, len: usize) -> Batch {
        Batch(vec![value; len])
    }
    fn len(&self) -> usize {
        self.0.len()
    }
    fn add(self, rhs: Batch) -> Batch {
        self.zip(rhs, |a, b| a + b)
    }
    fn sub(self, rhs: Batch) -> Batch {
        self.zip(rhs, |a, b| a - b)
    }
    fn mul(self, rhs: Batch) -> Batch {
        self.zip(rhs, |a, b| a * b)
    }
    fn div(self, rhs: Batch) -> Batch {
        self.zip(rhs, |a, b| a / b)
    }
    fn pow(self, rhs: Batch) -> Batch {
        self.zip(rhs, f64::powf)
    }
    fn max(self, rhs: Batch) -> Batch {
        self.zip(rhs, f64::max)
    }
    fn min(self, rhs: Batch) -> Batch {
        self.zip(rhs, f64::min)
    }
    fn neg(self) -> Batch {
        self.map(|a| -a)
    }
    fn abs(self) -> Batch {
        self.map(f64::abs)
    }
    fn square(self) -> Batch {
        self.map(|a| a * a)
    }
    fn cube(self) -> Batch {
        self.map(|a| a * a * a)
    }
    fn sqrt(self) -> Batch {
        self.map(f64::sqrt)
    }
    fn exp(self) -> Batch {
        self.map(f64::exp)
    }
    fn ln(self) -> Batch {
        self.map(f64::ln)
    }
    fn sin(self) -> Batch {
        self.map(f64::sin)
    }
    fn cos(self) -> Batch {
        self.map(f64::cos)
    }
    fn tan(self) -> Batch {
        self.map(f64::tan)
    }
    fn asin(self) -> Batch {
        self.map(f64::asin)
    }
    fn acos(self) -> Batch {
        self.map(f64::acos)
    }
    fn atan(self) -> Batch {
        self.map(f64::atan)
    }
    fn sinh(self) -> Batch {
        self.map(f64::sinh)
    }
    fn cosh(self) -> Batch {
        self.map(f64::cosh)
    }
    fn tanh(self) -> Batch {
        self.map(f64::tanh)
    }
    fn asinh(self) -> Batch {
        self.map(f64::asinh)
    }
    fn acosh(self) -> Batch {
        self.map(f64::acosh)
    }
    fn atanh(self) -> Batch {
        self.map(f64::atanh)
    }
}
