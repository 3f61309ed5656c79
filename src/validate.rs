//! Input validation for anthropometric measurements.
//!
//! Every formula consumes only values that passed these checks; out-of-range
//! or non-finite inputs are rejected before any computation runs.

use crate::domain::{Gender, Measurement};
use crate::error::ValidationError;

/// Plausible inclusive ranges for physical inputs.
mod ranges {
    pub const WEIGHT_KG: (f64, f64) = (30.0, 300.0);
    pub const HEIGHT_CM: (f64, f64) = (100.0, 250.0);
    pub const AGE_YEARS: (u32, u32) = (1, 120);
}

/// Checks that a named value lies within an inclusive [min, max] range.
///
/// NaN and infinite values are rejected as non-numeric.
pub fn ensure_in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Checks that a named circumference or mass is strictly positive.
pub fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

/// Validates every field of a measurement.
///
/// Hip circumference is mandatory for female measurements since the
/// body-fat and waist-hip formulas require it.
pub fn validate(measurement: &Measurement) -> Result<(), ValidationError> {
    ensure_in_range(
        "weight",
        measurement.weight_kg,
        ranges::WEIGHT_KG.0,
        ranges::WEIGHT_KG.1,
    )?;
    ensure_in_range(
        "height",
        measurement.height_cm,
        ranges::HEIGHT_CM.0,
        ranges::HEIGHT_CM.1,
    )?;

    if measurement.age_years < ranges::AGE_YEARS.0 || measurement.age_years > ranges::AGE_YEARS.1 {
        return Err(ValidationError::OutOfRange {
            field: "age",
            value: f64::from(measurement.age_years),
            min: f64::from(ranges::AGE_YEARS.0),
            max: f64::from(ranges::AGE_YEARS.1),
        });
    }

    ensure_positive("waist", measurement.waist_cm)?;
    ensure_positive("neck", measurement.neck_cm)?;

    match (measurement.gender, measurement.hip_cm) {
        (Gender::Female, None) => Err(ValidationError::MissingHip),
        (_, Some(hip)) => ensure_positive("hip", hip),
        (Gender::Male, None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Goal;

    fn valid_male() -> Measurement {
        Measurement {
            weight_kg: 70.0,
            height_cm: 175.0,
            age_years: 30,
            gender: Gender::Male,
            waist_cm: 80.0,
            neck_cm: 40.0,
            hip_cm: None,
            goal: Goal::Maintain,
        }
    }

    fn valid_female() -> Measurement {
        Measurement {
            weight_kg: 60.0,
            height_cm: 165.0,
            age_years: 28,
            gender: Gender::Female,
            waist_cm: 70.0,
            neck_cm: 33.0,
            hip_cm: Some(95.0),
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_valid_measurements_pass() {
        assert!(validate(&valid_male()).is_ok());
        assert!(validate(&valid_female()).is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        let mut m = valid_male();
        m.weight_kg = 20.0;
        assert!(matches!(
            validate(&m),
            Err(ValidationError::OutOfRange { field: "weight", .. })
        ));

        m.weight_kg = 350.0;
        assert!(validate(&m).is_err());
    }

    #[test]
    fn test_height_out_of_range() {
        let mut m = valid_male();
        m.height_cm = 90.0;
        assert!(matches!(
            validate(&m),
            Err(ValidationError::OutOfRange { field: "height", .. })
        ));
    }

    #[test]
    fn test_age_out_of_range() {
        let mut m = valid_male();
        m.age_years = 0;
        assert!(matches!(
            validate(&m),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));

        m.age_years = 121;
        assert!(validate(&m).is_err());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut m = valid_male();
        m.weight_kg = 30.0;
        assert!(validate(&m).is_ok());
        m.weight_kg = 300.0;
        assert!(validate(&m).is_ok());

        let mut m = valid_male();
        m.age_years = 1;
        assert!(validate(&m).is_ok());
        m.age_years = 120;
        assert!(validate(&m).is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let mut m = valid_male();
        m.weight_kg = f64::NAN;
        assert!(matches!(
            validate(&m),
            Err(ValidationError::NotANumber { field: "weight" })
        ));

        let mut m = valid_male();
        m.waist_cm = f64::INFINITY;
        assert!(matches!(
            validate(&m),
            Err(ValidationError::NotANumber { field: "waist" })
        ));
    }

    #[test]
    fn test_circumference_must_be_positive() {
        let mut m = valid_male();
        m.neck_cm = 0.0;
        assert!(matches!(
            validate(&m),
            Err(ValidationError::NotPositive { field: "neck", .. })
        ));

        let mut m = valid_male();
        m.waist_cm = -5.0;
        assert!(validate(&m).is_err());
    }

    #[test]
    fn test_female_requires_hip() {
        let mut m = valid_female();
        m.hip_cm = None;
        assert_eq!(validate(&m), Err(ValidationError::MissingHip));
    }

    #[test]
    fn test_male_hip_optional_but_checked_when_present() {
        let mut m = valid_male();
        m.hip_cm = Some(-1.0);
        assert!(matches!(
            validate(&m),
            Err(ValidationError::NotPositive { field: "hip", .. })
        ));
    }
}
