//! The generic unit-conversion widget.
//!
//! [`convert_all`] owns validation and fan-out; the conversion function
//! itself is an injected collaborator supplied per unit family. The shipped
//! families convert through a base unit by factor.

use serde::Serialize;

use crate::error::Error;

/// The value expressed in one target unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub unit: &'static str,
    pub value: f64,
}

/// Express a raw input value in every admissible unit.
///
/// Validation happens before the collaborator is invoked, each failure with
/// its own message: empty input, non-numeric input, non-positive values, and
/// an unknown source unit.
pub fn convert_all<F>(
    raw: &str,
    from: &str,
    units: &[&'static str],
    convert: F,
) -> Result<Vec<Conversion>, Error>
where
    F: Fn(f64, &str, &str) -> Option<f64>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::Validation(format!("{trimmed:?} is not a number")))?;
    if !value.is_finite() {
        return Err(Error::Validation(format!("{trimmed:?} is not a number")));
    }
    if value <= 0.0 {
        return Err(Error::Validation(
            "value must be greater than zero".to_string(),
        ));
    }
    if !units.iter().any(|unit| *unit == from) {
        return Err(Error::Validation(format!(
            "unknown unit {from:?}, expected one of: {}",
            units.join(", ")
        )));
    }

    units
        .iter()
        .map(|&unit| {
            convert(value, from, unit)
                .map(|converted| Conversion {
                    unit,
                    value: converted,
                })
                .ok_or_else(|| Error::Conversion(format!("cannot convert {from} to {unit}")))
        })
        .collect()
}

/// A family of units convertible through a common base unit.
pub struct UnitFamily {
    pub name: &'static str,
    units: &'static [(&'static str, f64)],
}

impl UnitFamily {
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|(unit, _)| *unit).collect()
    }

    fn factor(&self, unit: &str) -> Option<f64> {
        self.units
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
    }

    /// The injected collaborator for this family.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Option<f64> {
        Some(value * self.factor(from)? / self.factor(to)?)
    }

    /// Validate and express `raw` in every unit of this family.
    pub fn convert_value(&self, raw: &str, from: &str) -> Result<Vec<Conversion>, Error> {
        let names = self.unit_names();
        convert_all(raw, from, &names, |value, from, to| {
            self.convert(value, from, to)
        })
    }
}

pub const LENGTH: UnitFamily = UnitFamily {
    name: "length",
    units: &[
        ("mm", 0.001),
        ("cm", 0.01),
        ("m", 1.0),
        ("km", 1000.0),
        ("in", 0.0254),
        ("ft", 0.3048),
        ("yd", 0.9144),
        ("mi", 1609.344),
    ],
};

pub const WEIGHT: UnitFamily = UnitFamily {
    name: "weight",
    units: &[
        ("mg", 0.001),
        ("g", 1.0),
        ("kg", 1000.0),
        ("t", 1_000_000.0),
        ("oz", 28.349523125),
        ("lb", 453.59237),
        ("st", 6350.29318),
    ],
};

pub const ANGLE: UnitFamily = UnitFamily {
    name: "angle",
    units: &[
        ("deg", 1.0),
        ("rad", 57.29577951308232),
        ("grad", 0.9),
        ("turn", 360.0),
    ],
};

pub const DATA: UnitFamily = UnitFamily {
    name: "data",
    units: &[
        ("B", 1.0),
        ("KB", 1024.0),
        ("MB", 1_048_576.0),
        ("GB", 1_073_741_824.0),
        ("TB", 1_099_511_627_776.0),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_zero_never_reaches_the_collaborator() {
        let called = Cell::new(false);
        let result = convert_all("0", "m", &["m", "km"], |v, _, _| {
            called.set(true);
            Some(v)
        });
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!called.get());
    }

    #[test]
    fn test_negative_never_reaches_the_collaborator() {
        let called = Cell::new(false);
        let result = convert_all("-3", "m", &["m", "km"], |v, _, _| {
            called.set(true);
            Some(v)
        });
        assert!(
            matches!(result, Err(Error::Validation(ref msg)) if msg.contains("greater than zero"))
        );
        assert!(!called.get());
    }

    #[test]
    fn test_empty_input_distinct_message() {
        let result = convert_all("  ", "m", &["m"], |v, _, _| Some(v));
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_non_numeric_distinct_message() {
        let result = convert_all("fast", "m", &["m"], |v, _, _| Some(v));
        assert!(matches!(result, Err(Error::Validation(ref msg)) if msg.contains("not a number")));
    }

    #[test]
    fn test_unknown_source_unit() {
        let result = convert_all("5", "parsec", &["m", "km"], |v, _, _| Some(v));
        assert!(matches!(result, Err(Error::Validation(ref msg)) if msg.contains("unknown unit")));
    }

    #[test]
    fn test_converts_into_every_unit_in_family_order() {
        let conversions = LENGTH.convert_value("2", "m").unwrap();
        let units: Vec<&str> = conversions.iter().map(|c| c.unit).collect();
        assert_eq!(units, vec!["mm", "cm", "m", "km", "in", "ft", "yd", "mi"]);

        let meters = conversions.iter().find(|c| c.unit == "m").unwrap();
        assert!((meters.value - 2.0).abs() < 1e-12);
        let millimeters = conversions.iter().find(|c| c.unit == "mm").unwrap();
        assert!((millimeters.value - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_inches_to_centimeters() {
        let inches = LENGTH.convert(10.0, "in", "cm").unwrap();
        assert!((inches - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_weight_pounds_to_kilograms() {
        let kilograms = WEIGHT.convert(2.0, "lb", "kg").unwrap();
        assert!((kilograms - 0.90718474).abs() < 1e-9);
    }

    #[test]
    fn test_angle_turn_to_degrees() {
        let degrees = ANGLE.convert(0.5, "turn", "deg").unwrap();
        assert!((degrees - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_data_kilobytes_to_bytes() {
        let bytes = DATA.convert(2.0, "KB", "B").unwrap();
        assert!((bytes - 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit_in_collaborator_is_conversion_error() {
        let result = convert_all("5", "m", &["m", "bogus"], |value, from, to| {
            LENGTH.convert(value, from, to)
        });
        assert!(matches!(result, Err(Error::Conversion(_))));
    }
}
