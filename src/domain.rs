//! Domain types for body-composition analysis.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Gender, selecting the coefficient set for gendered formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns the display name for the gender.
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(ValidationError::UnknownGender(s.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Nutritional goal driving calorie and macronutrient targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Maintain,
    Lose,
    Gain,
}

impl Goal {
    /// Returns the display name for the goal.
    pub fn display_name(&self) -> &'static str {
        match self {
            Goal::Maintain => "Maintain",
            Goal::Lose => "Lose",
            Goal::Gain => "Gain",
        }
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "maintain" => Ok(Goal::Maintain),
            "lose" => Ok(Goal::Lose),
            "gain" => Ok(Goal::Gain),
            _ => Err(ValidationError::UnknownGoal(s.to_string())),
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One set of anthropometric measurements supplied by a caller.
///
/// Consumed once to produce exactly one result record; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub waist_cm: f64,
    pub neck_cm: f64,
    /// Required when gender is female, unused otherwise.
    pub hip_cm: Option<f64>,
    pub goal: Goal,
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}
