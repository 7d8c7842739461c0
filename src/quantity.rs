use crate::error::EvalErr;
use std::ops::{Add, Mul, Sub};

/// A measured value with its uncertainty, as an absolute error or as an
/// error relative to the value.
///
/// Only the value and the absolute error are stored. The relative error is
/// derived on demand, so `absolute == value * relative` holds for every
/// non-zero value. A measured zero with a non-zero error has an infinite
/// relative error; propagation never reads `relative` for that reason and
/// works from the absolute error instead.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Quantity {
    value: f64,
    absolute: f64,
}

impl Quantity {
    pub fn from_value_and_absolute(value: f64, absolute: f64) -> Quantity {
        Quantity { value, absolute }
    }

    pub fn from_value_and_relative(value: f64, relative: f64) -> Quantity {
        Quantity {
            value,
            absolute: value * relative,
        }
    }

    pub fn from_absolute_and_relative(absolute: f64, relative: f64) -> Quantity {
        Quantity {
            value: absolute / relative,
            absolute,
        }
    }

    pub fn exact(value: f64) -> Quantity {
        Quantity {
            value,
            absolute: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn absolute(&self) -> f64 {
        self.absolute
    }

    /// `absolute / value`, 0 when there is no error at all and infinite
    /// (signed like the error) for a measured zero.
    pub fn relative(&self) -> f64 {
        if self.absolute == 0.0 {
            0.0
        } else {
            self.absolute / self.value
        }
    }

    /// First-order propagation through a constant exponent: `n * v^(n-1) * dv`,
    /// i.e. the relative error scales by the signed exponent.
    pub fn powf(self, n: f64) -> Quantity {
        let absolute = if n == 0.0 || self.absolute == 0.0 {
            0.0
        } else {
            n * self.value.powf(n - 1.0) * self.absolute
        };
        Quantity::from_value_and_absolute(self.value.powf(n), absolute)
    }
}

// independent errors add in quadrature
fn quadrature(a: f64, b: f64) -> f64 {
    (a * a + b * b).sqrt()
}

// the error takes the sign of the value so relative stays the quadrature sum
fn signed_like(value: f64, magnitude: f64) -> f64 {
    if value < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// An evaluation stack entry: either a literal with no uncertainty or a
/// quantity carrying one.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Operand {
    Exact(f64),
    Uncertain(Quantity),
}

impl Operand {
    pub fn value(&self) -> f64 {
        match *self {
            Operand::Exact(v) => v,
            Operand::Uncertain(q) => q.value,
        }
    }

    pub fn into_quantity(self) -> Quantity {
        match self {
            Operand::Exact(v) => Quantity::exact(v),
            Operand::Uncertain(q) => q,
        }
    }

    pub fn checked_div(self, rhs: Operand) -> Result<Operand, EvalErr> {
        if rhs.value() == 0.0 {
            return Err(EvalErr::DivisionByZero);
        }
        Ok(match (self, rhs) {
            (Operand::Exact(l), Operand::Exact(r)) => Operand::Exact(l / r),
            (Operand::Uncertain(q), Operand::Exact(s)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(q.value / s, q.absolute / s))
            }
            (Operand::Exact(s), Operand::Uncertain(q)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(
                    s / q.value,
                    s * q.absolute / (q.value * q.value),
                ))
            }
            (Operand::Uncertain(l), Operand::Uncertain(r)) => {
                let value = l.value / r.value;
                let magnitude = quadrature(
                    l.absolute / r.value,
                    l.value * r.absolute / (r.value * r.value),
                );
                Operand::Uncertain(Quantity::from_value_and_absolute(
                    value,
                    signed_like(value, magnitude),
                ))
            }
        })
    }

    pub fn pow(self, exponent: Operand) -> Result<Operand, EvalErr> {
        match (self, exponent) {
            (Operand::Exact(b), Operand::Exact(n)) => Ok(Operand::Exact(b.powf(n))),
            (Operand::Uncertain(q), Operand::Exact(n)) => Ok(Operand::Uncertain(q.powf(n))),
            (_, Operand::Uncertain(_)) => Err(EvalErr::UnsupportedOperand),
        }
    }
}

impl Add for Operand {
    type Output = Operand;
    fn add(self, rhs: Operand) -> Operand {
        match (self, rhs) {
            (Operand::Exact(l), Operand::Exact(r)) => Operand::Exact(l + r),
            (Operand::Uncertain(q), Operand::Exact(s)) | (Operand::Exact(s), Operand::Uncertain(q)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(q.value + s, q.absolute))
            }
            (Operand::Uncertain(l), Operand::Uncertain(r)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(
                    l.value + r.value,
                    quadrature(l.absolute, r.absolute),
                ))
            }
        }
    }
}

impl Sub for Operand {
    type Output = Operand;
    fn sub(self, rhs: Operand) -> Operand {
        match (self, rhs) {
            (Operand::Exact(l), Operand::Exact(r)) => Operand::Exact(l - r),
            (Operand::Uncertain(q), Operand::Exact(s)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(q.value - s, q.absolute))
            }
            (Operand::Exact(s), Operand::Uncertain(q)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(s - q.value, q.absolute))
            }
            // uncertainties never cancel
            (Operand::Uncertain(l), Operand::Uncertain(r)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(
                    l.value - r.value,
                    quadrature(l.absolute, r.absolute),
                ))
            }
        }
    }
}

impl Mul for Operand {
    type Output = Operand;
    fn mul(self, rhs: Operand) -> Operand {
        match (self, rhs) {
            (Operand::Exact(l), Operand::Exact(r)) => Operand::Exact(l * r),
            // scaling keeps the relative error, so the absolute one scales too
            (Operand::Uncertain(q), Operand::Exact(s)) | (Operand::Exact(s), Operand::Uncertain(q)) => {
                Operand::Uncertain(Quantity::from_value_and_absolute(q.value * s, q.absolute * s))
            }
            (Operand::Uncertain(l), Operand::Uncertain(r)) => {
                let value = l.value * r.value;
                let magnitude = quadrature(r.value * l.absolute, l.value * r.absolute);
                Operand::Uncertain(Quantity::from_value_and_absolute(
                    value,
                    signed_like(value, magnitude),
                ))
            }
        }
    }
}
