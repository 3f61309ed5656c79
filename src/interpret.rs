//! Qualitative interpretation of computed metrics.
//!
//! State-free category lookups driven by ordered threshold tables. Range
//! comparisons follow one convention throughout: a band's upper bound is
//! exclusive, so values on an edge belong to the higher band.

use serde::Serialize;

use crate::domain::Gender;

/// BMI categories, ascending severity. The derived ordering follows the
/// declaration order, so comparisons express severity directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Low,
    Healthy,
    Overweight,
    ObesityClass1,
    ObesityClass2,
    MorbidObesity,
    ExtremeObesity,
}

impl BmiCategory {
    /// Returns the display name for the category.
    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Low => "Low",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityClass1 => "Obesity class 1",
            BmiCategory::ObesityClass2 => "Obesity class 2",
            BmiCategory::MorbidObesity => "Morbid obesity",
            BmiCategory::ExtremeObesity => "Extreme obesity",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Three-way level from a generic two-threshold lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Normal,
    High,
}

impl Level {
    pub fn display_name(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Normal => "Normal",
            Level::High => "High",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Health risk level for the circumference ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low risk",
            RiskLevel::Moderate => "Moderate risk",
            RiskLevel::High => "High risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// BMI bands as ascending (upper bound, category) pairs. Values at or
/// above the last bound are extreme obesity.
const BMI_BANDS: &[(f64, BmiCategory)] = &[
    (18.5, BmiCategory::Low),
    (24.9, BmiCategory::Healthy),
    (31.9, BmiCategory::Overweight),
    (34.9, BmiCategory::ObesityClass1),
    (39.9, BmiCategory::ObesityClass2),
    (44.9, BmiCategory::MorbidObesity),
];

/// Body-fat thresholds (low, high) per gender.
const BODY_FAT_THRESHOLDS_MALE: (f64, f64) = (6.0, 25.0);
const BODY_FAT_THRESHOLDS_FEMALE: (f64, f64) = (16.0, 32.0);

/// FFMI above which an elevated BMI is attributed to muscle mass.
const MUSCULAR_FFMI_MALE: f64 = 16.0;
const MUSCULAR_FFMI_FEMALE: f64 = 19.0;

/// FFMI bands for men as ascending (upper bound, label) pairs.
const FFMI_BANDS_MALE: &[(f64, &str)] = &[
    (18.0, "Far from maximum potential (poor physical condition)"),
    (19.0, "Close to normal"),
    (20.0, "Normal"),
    (21.0, "Above normal (good physical condition)"),
    (22.5, "Strong (very good physical condition)"),
    (24.0, "Very strong (excellent physical condition), close to maximum potential"),
    (25.5, "Very close to maximum potential"),
    (27.0, "Natural maximum potential reached, very few get there naturally"),
    (29.0, "Practically impossible without drugs"),
];

/// FFMI bands for women.
const FFMI_BANDS_FEMALE: &[(f64, &str)] = &[
    (13.5, "Far from maximum potential (poor physical condition)"),
    (14.5, "Close to normal"),
    (16.0, "Normal"),
    (17.0, "Above normal (good physical condition)"),
    (18.5, "Strong (very good physical condition)"),
    (20.0, "Very strong (excellent physical condition), close to maximum potential"),
    (21.0, "Very close to maximum potential"),
    (22.0, "Natural maximum potential reached, very few get there naturally"),
    (23.0, "Practically impossible without drugs"),
];

/// Label for FFMI values above the last band.
const FFMI_TOP_LABEL: &str = "Impossible without drugs";

/// Waist-hip risk thresholds (moderate, high) per gender.
const WAIST_HIP_THRESHOLDS_MALE: (f64, f64) = (0.90, 0.95);
const WAIST_HIP_THRESHOLDS_FEMALE: (f64, f64) = (0.80, 0.85);

/// Waist-height risk thresholds (moderate, high), gender-independent.
const WAIST_HEIGHT_THRESHOLDS: (f64, f64) = (0.5, 0.6);

/// Aggregate of every qualitative reading for one result.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    pub bmi_category: BmiCategory,
    pub bmi_summary: &'static str,
    pub body_fat_level: Level,
    pub ffmi_label: &'static str,
    /// Absent for male measurements.
    pub waist_hip_risk: Option<RiskLevel>,
    pub waist_height_risk: RiskLevel,
}

/// Maps a BMI value to its category band.
pub fn interpret_bmi(bmi: f64) -> BmiCategory {
    for &(upper, category) in BMI_BANDS {
        if bmi < upper {
            return category;
        }
    }
    BmiCategory::ExtremeObesity
}

/// Generic two-threshold lookup: below `low` is Low, above `high` is High,
/// everything between (inclusive) is Normal.
pub fn interpret_level(value: f64, low: f64, high: f64) -> Level {
    if value > high {
        Level::High
    } else if value < low {
        Level::Low
    } else {
        Level::Normal
    }
}

/// Classifies body fat percentage against gender-specific thresholds.
pub fn interpret_body_fat(body_fat_pct: f64, gender: Gender) -> Level {
    let (low, high) = match gender {
        Gender::Male => BODY_FAT_THRESHOLDS_MALE,
        Gender::Female => BODY_FAT_THRESHOLDS_FEMALE,
    };
    interpret_level(body_fat_pct, low, high)
}

/// Maps an FFMI value to its descriptive band label.
///
/// The value is compared against ascending thresholds; the first band the
/// value falls under wins, and anything past the last threshold gets the
/// top label.
pub fn interpret_ffmi(ffmi: f64, gender: Gender) -> &'static str {
    let bands = match gender {
        Gender::Male => FFMI_BANDS_MALE,
        Gender::Female => FFMI_BANDS_FEMALE,
    };
    for &(upper, label) in bands {
        if ffmi < upper {
            return label;
        }
    }
    FFMI_TOP_LABEL
}

/// Classifies the waist-hip ratio against gender-specific risk thresholds.
pub fn interpret_waist_hip(ratio: f64, gender: Gender) -> RiskLevel {
    let (moderate, high) = match gender {
        Gender::Male => WAIST_HIP_THRESHOLDS_MALE,
        Gender::Female => WAIST_HIP_THRESHOLDS_FEMALE,
    };
    if ratio > high {
        RiskLevel::High
    } else if ratio > moderate {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Classifies the waist-height ratio. Both thresholds are inclusive on
/// the riskier side.
pub fn interpret_waist_height(ratio: f64) -> RiskLevel {
    let (moderate, high) = WAIST_HEIGHT_THRESHOLDS;
    if ratio >= high {
        RiskLevel::High
    } else if ratio >= moderate {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// General health message combining BMI with FFMI.
///
/// A BMI above 25 is attributed to muscle mass when the FFMI clears the
/// gender-specific threshold; otherwise only low BMI gets a caution.
pub fn bmi_summary(bmi: f64, ffmi: f64, gender: Gender) -> &'static str {
    let muscular_threshold = match gender {
        Gender::Male => MUSCULAR_FFMI_MALE,
        Gender::Female => MUSCULAR_FFMI_FEMALE,
    };
    if bmi > 25.0 && ffmi > muscular_threshold {
        "BMI is elevated but likely driven by high muscle mass"
    } else if bmi < 18.5 {
        "BMI is low, which may indicate underweight"
    } else {
        "BMI is within the normal range"
    }
}
