//! Body-composition and energy formulas.
//!
//! All functions here are pure: they consume validated numeric inputs and
//! fixed regression coefficients, and hold no state. Gender-specific
//! coefficient sets live in nested const modules.

use crate::domain::{Gender, Goal, MacroSplit};
use crate::error::ComputationError;

/// Harris-Benedict BMR coefficients for men (revised equation).
mod bmr_male {
    pub const BASE: f64 = 88.362;
    pub const WEIGHT: f64 = 13.397;
    pub const HEIGHT: f64 = 4.799;
    pub const AGE: f64 = 5.677;
}

/// Harris-Benedict BMR coefficients for women (revised equation).
mod bmr_female {
    pub const BASE: f64 = 447.593;
    pub const WEIGHT: f64 = 9.247;
    pub const HEIGHT: f64 = 3.098;
    pub const AGE: f64 = 4.330;
}

/// U.S. Navy circumference coefficients for men.
mod navy_male {
    pub const BASE: f64 = 1.0324;
    pub const GIRTH: f64 = 0.19077;
    pub const HEIGHT: f64 = 0.15456;
}

/// U.S. Navy circumference coefficients for women.
mod navy_female {
    pub const BASE: f64 = 1.29579;
    pub const GIRTH: f64 = 0.35004;
    pub const HEIGHT: f64 = 0.22100;
}

/// Total body water regression coefficients (Watson-style, simplified).
mod water_male {
    pub const BASE: f64 = 2.447;
    pub const AGE: f64 = 0.09156;
    pub const HEIGHT: f64 = 0.1074;
    pub const WEIGHT: f64 = 0.3362;
}

mod water_female {
    pub const BASE: f64 = -2.097;
    pub const HEIGHT: f64 = 0.1069;
    pub const WEIGHT: f64 = 0.2466;
}

/// Healthy BMI band used for the weight range and overweight metrics.
pub const HEALTHY_BMI_MIN: f64 = 18.5;
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Moderate activity factor applied to BMR before goal scaling.
const ACTIVITY_FACTOR: f64 = 1.2;

/// Calorie density per gram of each macronutrient.
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Calculates Basal Metabolic Rate using the Harris-Benedict equation.
///
/// # Arguments
/// * `weight_kg` - Body weight in kilograms
/// * `height_cm` - Height in centimeters
/// * `age_years` - Age in years
/// * `gender` - Selects the male or female coefficient set
///
/// # Returns
/// BMR in kcal/day
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => {
            bmr_male::BASE + bmr_male::WEIGHT * weight_kg + bmr_male::HEIGHT * height_cm
                - bmr_male::AGE * age
        }
        Gender::Female => {
            bmr_female::BASE + bmr_female::WEIGHT * weight_kg + bmr_female::HEIGHT * height_cm
                - bmr_female::AGE * age
        }
    }
}

/// Calculates Body Mass Index from weight (kg) and height (cm).
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Calculates body fat percentage for men using the US Navy formula.
///
/// Formula (measurements in cm):
/// ```text
/// BF% = 495 / (1.0324 - 0.19077 × log10(waist - neck) + 0.15456 × log10(height)) - 450
/// ```
///
/// The result is clamped to [0, 100] to tolerate formula inaccuracy at
/// extreme measurements.
///
/// # Errors
/// Returns `ComputationError` if `waist <= neck` (the logarithm would be
/// undefined) or the denominator is not positive.
pub fn body_fat_pct_male(
    waist_cm: f64,
    neck_cm: f64,
    height_cm: f64,
) -> Result<f64, ComputationError> {
    let girth = waist_cm - neck_cm;
    if girth <= 0.0 {
        return Err(ComputationError::WaistNotAboveNeck {
            waist: waist_cm,
            neck: neck_cm,
        });
    }

    let denominator =
        navy_male::BASE - navy_male::GIRTH * girth.log10() + navy_male::HEIGHT * height_cm.log10();
    if denominator <= 0.0 {
        return Err(ComputationError::DegenerateDenominator);
    }

    Ok((495.0 / denominator - 450.0).clamp(0.0, 100.0))
}

/// Calculates body fat percentage for women using the US Navy formula.
///
/// Formula (measurements in cm):
/// ```text
/// BF% = 495 / (1.29579 - 0.35004 × log10(waist + hip - neck) + 0.22100 × log10(height)) - 450
/// ```
///
/// The result is clamped to [0, 100].
///
/// # Errors
/// Returns `ComputationError` if `waist + hip <= neck` or the denominator
/// is not positive.
pub fn body_fat_pct_female(
    waist_cm: f64,
    neck_cm: f64,
    hip_cm: f64,
    height_cm: f64,
) -> Result<f64, ComputationError> {
    let girth = waist_cm + hip_cm - neck_cm;
    if girth <= 0.0 {
        return Err(ComputationError::GirthNotAboveNeck {
            girth: waist_cm + hip_cm,
            neck: neck_cm,
        });
    }

    let denominator = navy_female::BASE - navy_female::GIRTH * girth.log10()
        + navy_female::HEIGHT * height_cm.log10();
    if denominator <= 0.0 {
        return Err(ComputationError::DegenerateDenominator);
    }

    Ok((495.0 / denominator - 450.0).clamp(0.0, 100.0))
}

/// Calculates lean (fat-free) mass from bodyweight and body fat percentage.
pub fn calculate_lean_mass(weight_kg: f64, body_fat_pct: f64) -> f64 {
    weight_kg * (1.0 - body_fat_pct / 100.0)
}

/// Calculates fat mass from bodyweight and body fat percentage.
pub fn calculate_fat_mass(weight_kg: f64, body_fat_pct: f64) -> f64 {
    weight_kg * body_fat_pct / 100.0
}

/// Calculates the Fat-Free Mass Index from lean mass (kg) and height (cm).
pub fn calculate_ffmi(lean_mass_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    lean_mass_kg / (height_m * height_m)
}

/// Calculates total body water in liters using a simplified regression.
///
/// The male variant depends on age; the female variant does not.
pub fn calculate_body_water(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    match gender {
        Gender::Male => {
            water_male::BASE - water_male::AGE * f64::from(age_years)
                + water_male::HEIGHT * height_cm
                + water_male::WEIGHT * weight_kg
        }
        Gender::Female => {
            water_female::BASE + water_female::HEIGHT * height_cm + water_female::WEIGHT * weight_kg
        }
    }
}

/// Calculates the healthy weight range (min, max) in kg for a height,
/// derived from the healthy BMI band.
pub fn healthy_weight_range(height_cm: f64) -> (f64, f64) {
    let height_m = height_cm / 100.0;
    let squared = height_m * height_m;
    (HEALTHY_BMI_MIN * squared, HEALTHY_BMI_MAX * squared)
}

/// Calculates how many kilograms the given weight exceeds the healthy
/// maximum for the height. Never negative.
pub fn calculate_overweight(weight_kg: f64, height_cm: f64) -> f64 {
    let (_, max_kg) = healthy_weight_range(height_cm);
    (weight_kg - max_kg).max(0.0)
}

/// Calculates the waist-to-hip ratio. Callers gate on gender: the ratio is
/// only meaningful for female measurements in this model.
pub fn waist_hip_ratio(waist_cm: f64, hip_cm: f64) -> f64 {
    waist_cm / hip_cm
}

/// Calculates the waist-to-height ratio.
pub fn waist_height_ratio(waist_cm: f64, height_cm: f64) -> f64 {
    waist_cm / height_cm
}

/// Calculates the daily caloric target from BMR and goal.
///
/// A moderate activity factor of 1.2 is applied first, then the goal
/// scales the total: maintain ×1.0, lose ×0.8, gain ×1.2.
pub fn daily_calories(bmr: f64, goal: Goal) -> f64 {
    let maintenance = bmr * ACTIVITY_FACTOR;
    match goal {
        Goal::Maintain => maintenance,
        Goal::Lose => maintenance * 0.8,
        Goal::Gain => maintenance * 1.2,
    }
}

/// Percentage split (protein, carbs, fat) of daily calories per goal.
fn split_for(goal: Goal) -> (f64, f64, f64) {
    match goal {
        Goal::Maintain => (0.30, 0.40, 0.30),
        Goal::Lose => (0.40, 0.40, 0.20),
        Goal::Gain => (0.30, 0.50, 0.20),
    }
}

/// Calculates daily macronutrient grams from the caloric target and goal.
///
/// Uses fixed calorie densities (protein 4 kcal/g, carbs 4 kcal/g,
/// fat 9 kcal/g), so the gram amounts always sum back to the calorie
/// target.
pub fn macro_split(calories: f64, goal: Goal) -> MacroSplit {
    let (protein_pct, carbs_pct, fat_pct) = split_for(goal);
    MacroSplit {
        protein_g: calories * protein_pct / KCAL_PER_G_PROTEIN,
        carbs_g: calories * carbs_pct / KCAL_PER_G_CARB,
        fat_g: calories * fat_pct / KCAL_PER_G_FAT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to check floating point equality with tolerance
    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_bmr_male_reference_case() {
        // 70kg, 175cm, 30 years
        // 88.362 + 13.397×70 + 4.799×175 - 5.677×30 ≈ 1695.67
        let bmr = calculate_bmr(70.0, 175.0, 30, Gender::Male);
        assert!(approx_eq(bmr, 1695.67, 0.5), "BMR = {}", bmr);
    }

    #[test]
    fn test_bmr_female_reference_case() {
        // 60kg, 165cm, 28 years
        // 447.593 + 9.247×60 + 3.098×165 - 4.330×28 ≈ 1392.45
        let bmr = calculate_bmr(60.0, 165.0, 28, Gender::Female);
        assert!(approx_eq(bmr, 1392.45, 0.5), "BMR = {}", bmr);
    }

    #[test]
    fn test_bmi_reference_case() {
        // 70kg at 175cm -> 70 / 1.75² ≈ 22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!(approx_eq(bmi, 22.86, 0.01), "BMI = {}", bmi);
    }

    #[test]
    fn test_body_fat_male_typical() {
        // waist 80cm, neck 40cm, height 175cm -> low-teens percentage
        let bf = body_fat_pct_male(80.0, 40.0, 175.0).unwrap();
        assert!(bf > 8.0 && bf < 16.0, "BF% = {}", bf);
    }

    #[test]
    fn test_body_fat_male_waist_below_neck() {
        let err = body_fat_pct_male(35.0, 40.0, 175.0).unwrap_err();
        assert!(matches!(err, ComputationError::WaistNotAboveNeck { .. }));

        // Equal is also invalid
        assert!(body_fat_pct_male(40.0, 40.0, 175.0).is_err());
    }

    #[test]
    fn test_body_fat_male_clamped_at_zero() {
        // waist barely above neck on a tall frame drives the raw formula
        // negative; the result must clamp to 0
        let bf = body_fat_pct_male(41.0, 40.0, 250.0).unwrap();
        assert_eq!(bf, 0.0);
    }

    #[test]
    fn test_body_fat_male_monotonic_in_waist() {
        let bf1 = body_fat_pct_male(80.0, 40.0, 175.0).unwrap();
        let bf2 = body_fat_pct_male(90.0, 40.0, 175.0).unwrap();
        let bf3 = body_fat_pct_male(100.0, 40.0, 175.0).unwrap();
        assert!(bf1 < bf2 && bf2 < bf3);
    }

    #[test]
    fn test_body_fat_female_typical() {
        // waist 70, neck 33, hip 95, height 165 -> mid-twenties percentage
        let bf = body_fat_pct_female(70.0, 33.0, 95.0, 165.0).unwrap();
        assert!(bf > 18.0 && bf < 32.0, "BF% = {}", bf);
    }

    #[test]
    fn test_body_fat_female_girth_below_neck() {
        let err = body_fat_pct_female(10.0, 40.0, 20.0, 165.0).unwrap_err();
        assert!(matches!(err, ComputationError::GirthNotAboveNeck { .. }));
    }

    #[test]
    fn test_body_fat_always_within_bounds() {
        for waist in [41.0, 60.0, 90.0, 150.0, 250.0] {
            let bf = body_fat_pct_male(waist, 40.0, 175.0).unwrap();
            assert!((0.0..=100.0).contains(&bf), "BF% = {}", bf);
        }
    }

    #[test]
    fn test_lean_and_fat_mass() {
        // 80kg at 20% body fat -> 64kg lean, 16kg fat
        assert!(approx_eq(calculate_lean_mass(80.0, 20.0), 64.0, 0.01));
        assert!(approx_eq(calculate_fat_mass(80.0, 20.0), 16.0, 0.01));
    }

    #[test]
    fn test_lean_plus_fat_recovers_weight() {
        let weight = 72.5;
        let bf = 17.3;
        let total = calculate_lean_mass(weight, bf) + calculate_fat_mass(weight, bf);
        assert!(approx_eq(total, weight, 1e-9));
    }

    #[test]
    fn test_ffmi() {
        // 64kg lean mass at 180cm -> 64 / 1.8² ≈ 19.75
        let ffmi = calculate_ffmi(64.0, 180.0);
        assert!(approx_eq(ffmi, 19.75, 0.01), "FFMI = {}", ffmi);
    }

    #[test]
    fn test_body_water_male() {
        // 2.447 - 0.09156×30 + 0.1074×175 + 0.3362×70 ≈ 42.03
        let water = calculate_body_water(70.0, 175.0, 30, Gender::Male);
        assert!(approx_eq(water, 42.03, 0.05), "water = {}", water);
    }

    #[test]
    fn test_body_water_female_ignores_age() {
        let young = calculate_body_water(60.0, 165.0, 20, Gender::Female);
        let old = calculate_body_water(60.0, 165.0, 60, Gender::Female);
        assert_eq!(young, old);

        // -2.097 + 0.1069×165 + 0.2466×60 ≈ 30.34
        assert!(approx_eq(young, 30.34, 0.05), "water = {}", young);
    }

    #[test]
    fn test_healthy_weight_range() {
        // At 175cm: 18.5×1.75² ≈ 56.66, 24.9×1.75² ≈ 76.26
        let (min, max) = healthy_weight_range(175.0);
        assert!(approx_eq(min, 56.66, 0.01), "min = {}", min);
        assert!(approx_eq(max, 76.26, 0.01), "max = {}", max);
    }

    #[test]
    fn test_overweight_never_negative() {
        // Well under the healthy max
        assert_eq!(calculate_overweight(70.0, 175.0), 0.0);

        // Above the healthy max
        let over = calculate_overweight(80.0, 175.0);
        assert!(over > 3.7 && over < 3.8, "overweight = {}", over);
    }

    #[test]
    fn test_overweight_zero_at_boundary() {
        let (_, max) = healthy_weight_range(175.0);
        assert_eq!(calculate_overweight(max, 175.0), 0.0);
    }

    #[test]
    fn test_ratios() {
        assert!(approx_eq(waist_hip_ratio(70.0, 100.0), 0.7, 1e-9));
        assert!(approx_eq(waist_height_ratio(80.0, 175.0), 0.457, 0.001));
    }

    #[test]
    fn test_daily_calories_per_goal() {
        let bmr = 1700.0;
        assert!(approx_eq(daily_calories(bmr, Goal::Maintain), 2040.0, 1e-9));
        assert!(approx_eq(daily_calories(bmr, Goal::Lose), 1632.0, 1e-9));
        assert!(approx_eq(daily_calories(bmr, Goal::Gain), 2448.0, 1e-9));
    }

    #[test]
    fn test_macro_split_maintain_reference() {
        // 2000 kcal maintain -> 150g protein, 200g carbs, ~66.67g fat
        let macros = macro_split(2000.0, Goal::Maintain);
        assert!(approx_eq(macros.protein_g, 150.0, 0.01));
        assert!(approx_eq(macros.carbs_g, 200.0, 0.01));
        assert!(approx_eq(macros.fat_g, 66.67, 0.01));
    }

    #[test]
    fn test_macro_split_round_trips_to_calories() {
        // Grams × calorie density must recover the target for every goal
        for goal in [Goal::Maintain, Goal::Lose, Goal::Gain] {
            let calories = 2345.0;
            let macros = macro_split(calories, goal);
            let recovered = macros.protein_g * 4.0 + macros.carbs_g * 4.0 + macros.fat_g * 9.0;
            assert!(
                approx_eq(recovered, calories, 1e-6),
                "{:?}: {} != {}",
                goal,
                recovered,
                calories
            );
        }
    }

    #[test]
    fn test_macro_split_lose_favors_protein() {
        let maintain = macro_split(2000.0, Goal::Maintain);
        let lose = macro_split(2000.0, Goal::Lose);
        assert!(lose.protein_g > maintain.protein_g);
        assert!(lose.fat_g < maintain.fat_g);
    }
}
