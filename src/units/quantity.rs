use std::fmt;
use std::ops::Mul;

use crate::error::{Result, ShopError};
use crate::units::registry::{lookup_unit, Unit};

/// A magnitude paired with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Unit,
}

/// Build a quantity from a magnitude and a unit expression.
///
/// The expression may carry its own leading magnitude (`"100 g"`), which
/// multiplies `magnitude`.
pub fn quantity(magnitude: f64, unit: &str) -> Result<Quantity> {
    let expr = unit.trim();
    let (scale, name) = match expr.split_once(char::is_whitespace) {
        Some((head, rest)) => match head.parse::<f64>() {
            Ok(value) => (value, rest.trim()),
            Err(_) => (1.0, expr),
        },
        None => match expr.parse::<f64>() {
            Ok(value) => (value, ""),
            Err(_) => (1.0, expr),
        },
    };

    let unit = lookup_unit(name).ok_or_else(|| ShopError::UnitParse(unit.to_string()))?;
    Ok(Quantity {
        magnitude: magnitude * scale,
        unit,
    })
}

impl Quantity {
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Sum with another quantity, expressed in this quantity's unit.
    pub fn try_add(&self, other: &Quantity) -> Result<Quantity> {
        if !self.unit.is_compatible(&other.unit) {
            return Err(ShopError::IncompatibleUnits {
                from: other.unit_label(),
                to: self.unit_label(),
            });
        }
        let converted = other.magnitude * other.unit.factor / self.unit.factor;
        Ok(Quantity::new(self.magnitude + converted, self.unit))
    }

    /// Convert to the unit named by `target`.
    pub fn to(&self, target: &str) -> Result<Quantity> {
        let unit = lookup_unit(target).ok_or_else(|| ShopError::UnitParse(target.to_string()))?;
        self.to_unit(unit)
    }

    pub fn to_unit(&self, unit: Unit) -> Result<Quantity> {
        if !self.unit.is_compatible(&unit) {
            return Err(ShopError::IncompatibleUnits {
                from: self.unit_label(),
                to: if unit.name.is_empty() {
                    "dimensionless".to_string()
                } else {
                    unit.name.to_string()
                },
            });
        }
        Ok(Quantity::new(
            self.magnitude * self.unit.factor / unit.factor,
            unit,
        ))
    }

    /// Convert for display, keeping the native unit when `target` does not fit.
    pub fn display_in(&self, target: &str) -> Quantity {
        self.to(target).unwrap_or(*self)
    }

    fn unit_label(&self) -> String {
        if self.unit.name.is_empty() {
            "dimensionless".to_string()
        } else {
            self.unit.name.to_string()
        }
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.magnitude * rhs, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        if self.unit.name.is_empty() {
            write!(f, "{:.*}", precision, self.magnitude)
        } else {
            write!(f, "{:.*} {}", precision, self.magnitude, self.unit.name)
        }
    }
}
