//! Result aggregation for the full analysis pipeline.
//!
//! Sequences validation, the formula engine, and the interpreter to turn
//! one measurement into one complete result record. Any failure aborts the
//! pipeline; no partial result is ever produced.

use serde::Serialize;

use crate::domain::{Gender, MacroSplit, Measurement};
use crate::error::{MetricsError, ValidationError};
use crate::formulas;
use crate::interpret::{self, Interpretation};
use crate::validate;

/// Complete set of computed metrics for one measurement.
///
/// Immutable once produced; persisting it with an identity and timestamp
/// is the storage collaborator's concern.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResult {
    pub bmr_kcal: f64,
    pub bmi: f64,
    pub body_fat_pct: f64,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
    pub body_water_l: f64,
    pub ffmi: f64,
    pub healthy_weight_min_kg: f64,
    pub healthy_weight_max_kg: f64,
    pub overweight_kg: f64,
    /// Absent for male measurements.
    pub waist_hip_ratio: Option<f64>,
    pub waist_height_ratio: f64,
    pub daily_calories_kcal: f64,
    pub macros: MacroSplit,
    pub interpretation: Interpretation,
}

/// Computes every metric and interpretation for a measurement.
///
/// Sequencing: validate all fields, compute base metrics (BMR, BMI,
/// body fat), then derived metrics, then interpretations. Validation
/// failures abort before any formula runs; a formula precondition
/// failure aborts before later steps execute.
pub fn compute(measurement: &Measurement) -> Result<MetricsResult, MetricsError> {
    validate::validate(measurement)?;

    let weight = measurement.weight_kg;
    let height = measurement.height_cm;
    let age = measurement.age_years;
    let gender = measurement.gender;

    // Base metrics
    let bmr = formulas::calculate_bmr(weight, height, age, gender);
    let bmi = formulas::calculate_bmi(weight, height);
    let body_fat_pct = match gender {
        Gender::Male => {
            formulas::body_fat_pct_male(measurement.waist_cm, measurement.neck_cm, height)?
        }
        Gender::Female => {
            let hip = measurement.hip_cm.ok_or(ValidationError::MissingHip)?;
            formulas::body_fat_pct_female(measurement.waist_cm, measurement.neck_cm, hip, height)?
        }
    };

    // Derived metrics
    let fat_mass = formulas::calculate_fat_mass(weight, body_fat_pct);
    let lean_mass = formulas::calculate_lean_mass(weight, body_fat_pct);
    let ffmi = formulas::calculate_ffmi(lean_mass, height);
    let body_water = formulas::calculate_body_water(weight, height, age, gender);
    let (healthy_min, healthy_max) = formulas::healthy_weight_range(height);
    let overweight = formulas::calculate_overweight(weight, height);

    let waist_hip = match (gender, measurement.hip_cm) {
        (Gender::Female, Some(hip)) => Some(formulas::waist_hip_ratio(measurement.waist_cm, hip)),
        _ => None,
    };
    let waist_height = formulas::waist_height_ratio(measurement.waist_cm, height);

    let daily_calories = formulas::daily_calories(bmr, measurement.goal);
    let macros = formulas::macro_split(daily_calories, measurement.goal);

    let interpretation = Interpretation {
        bmi_category: interpret::interpret_bmi(bmi),
        bmi_summary: interpret::bmi_summary(bmi, ffmi, gender),
        body_fat_level: interpret::interpret_body_fat(body_fat_pct, gender),
        ffmi_label: interpret::interpret_ffmi(ffmi, gender),
        waist_hip_risk: waist_hip.map(|r| interpret::interpret_waist_hip(r, gender)),
        waist_height_risk: interpret::interpret_waist_height(waist_height),
    };

    Ok(MetricsResult {
        bmr_kcal: bmr,
        bmi,
        body_fat_pct,
        fat_mass_kg: fat_mass,
        lean_mass_kg: lean_mass,
        body_water_l: body_water,
        ffmi,
        healthy_weight_min_kg: healthy_min,
        healthy_weight_max_kg: healthy_max,
        overweight_kg: overweight,
        waist_hip_ratio: waist_hip,
        waist_height_ratio: waist_height,
        daily_calories_kcal: daily_calories,
        macros,
        interpretation,
    })
}
