//! SQLite-backed history of analysis records.
//!
//! The computation core never touches the database; callers hand a
//! finished result here together with the person's name and the pool is
//! injected from the outside.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::analysis::MetricsResult;
use crate::domain::Measurement;

/// One persisted analysis record: identity, timestamp, the raw
/// measurement, and every computed metric.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClientRecord {
    #[sqlx(default)]
    pub id: i64,
    pub name: String,
    pub recorded_at: DateTime<Utc>,

    pub gender: String,
    pub goal: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: i64,
    pub waist_cm: f64,
    pub neck_cm: f64,
    pub hip_cm: Option<f64>,

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
    pub waist_hip_ratio: Option<f64>,
    pub waist_height_ratio: f64,
    pub daily_calories_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,

    pub bmi_category: String,
    pub bmi_summary: String,
    pub body_fat_level: String,
    pub ffmi_label: String,
    pub waist_hip_risk: Option<String>,
    pub waist_height_risk: String,
}

impl ClientRecord {
    /// Builds a record from a name, the measurement it came from, and the
    /// computed result. The id is assigned on save.
    pub fn new(name: &str, measurement: &Measurement, result: &MetricsResult) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            recorded_at: Utc::now(),

            gender: measurement.gender.display_name().to_string(),
            goal: measurement.goal.display_name().to_string(),
            weight_kg: measurement.weight_kg,
            height_cm: measurement.height_cm,
            age_years: i64::from(measurement.age_years),
            waist_cm: measurement.waist_cm,
            neck_cm: measurement.neck_cm,
            hip_cm: measurement.hip_cm,

            bmr_kcal: result.bmr_kcal,
            bmi: result.bmi,
            body_fat_pct: result.body_fat_pct,
            fat_mass_kg: result.fat_mass_kg,
            lean_mass_kg: result.lean_mass_kg,
            body_water_l: result.body_water_l,
            ffmi: result.ffmi,
            healthy_weight_min_kg: result.healthy_weight_min_kg,
            healthy_weight_max_kg: result.healthy_weight_max_kg,
            overweight_kg: result.overweight_kg,
            waist_hip_ratio: result.waist_hip_ratio,
            waist_height_ratio: result.waist_height_ratio,
            daily_calories_kcal: result.daily_calories_kcal,
            protein_g: result.macros.protein_g,
            carbs_g: result.macros.carbs_g,
            fat_g: result.macros.fat_g,

            bmi_category: result.interpretation.bmi_category.to_string(),
            bmi_summary: result.interpretation.bmi_summary.to_string(),
            body_fat_level: result.interpretation.body_fat_level.to_string(),
            ffmi_label: result.interpretation.ffmi_label.to_string(),
            waist_hip_risk: result
                .interpretation
                .waist_hip_risk
                .map(|r| r.to_string()),
            waist_height_risk: result.interpretation.waist_height_risk.to_string(),
        }
    }
}

/// Opens (or creates) the SQLite database at the given path.
pub async fn connect<P: AsRef<Path>>(path: P) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .create_if_missing(true);
    SqlitePoolOptions::new().connect_with(options).await
}

/// Creates the history table if it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            recorded_at TEXT NOT NULL,
            gender TEXT NOT NULL,
            goal TEXT NOT NULL,
            weight_kg REAL NOT NULL,
            height_cm REAL NOT NULL,
            age_years INTEGER NOT NULL,
            waist_cm REAL NOT NULL,
            neck_cm REAL NOT NULL,
            hip_cm REAL,
            bmr_kcal REAL NOT NULL,
            bmi REAL NOT NULL,
            body_fat_pct REAL NOT NULL,
            fat_mass_kg REAL NOT NULL,
            lean_mass_kg REAL NOT NULL,
            body_water_l REAL NOT NULL,
            ffmi REAL NOT NULL,
            healthy_weight_min_kg REAL NOT NULL,
            healthy_weight_max_kg REAL NOT NULL,
            overweight_kg REAL NOT NULL,
            waist_hip_ratio REAL,
            waist_height_ratio REAL NOT NULL,
            daily_calories_kcal REAL NOT NULL,
            protein_g REAL NOT NULL,
            carbs_g REAL NOT NULL,
            fat_g REAL NOT NULL,
            bmi_category TEXT NOT NULL,
            bmi_summary TEXT NOT NULL,
            body_fat_level TEXT NOT NULL,
            ffmi_label TEXT NOT NULL,
            waist_hip_risk TEXT,
            waist_height_risk TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Saves one record, returning its row id.
pub async fn save(pool: &SqlitePool, record: &ClientRecord) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO clients (
            name, recorded_at, gender, goal, weight_kg, height_cm, age_years,
            waist_cm, neck_cm, hip_cm, bmr_kcal, bmi, body_fat_pct,
            fat_mass_kg, lean_mass_kg, body_water_l, ffmi,
            healthy_weight_min_kg, healthy_weight_max_kg, overweight_kg,
            waist_hip_ratio, waist_height_ratio, daily_calories_kcal,
            protein_g, carbs_g, fat_g, bmi_category, bmi_summary,
            body_fat_level, ffmi_label, waist_hip_risk, waist_height_risk
        ) VALUES (
            ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
            ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
        )",
    )
    .bind(&record.name)
    .bind(record.recorded_at)
    .bind(&record.gender)
    .bind(&record.goal)
    .bind(record.weight_kg)
    .bind(record.height_cm)
    .bind(record.age_years)
    .bind(record.waist_cm)
    .bind(record.neck_cm)
    .bind(record.hip_cm)
    .bind(record.bmr_kcal)
    .bind(record.bmi)
    .bind(record.body_fat_pct)
    .bind(record.fat_mass_kg)
    .bind(record.lean_mass_kg)
    .bind(record.body_water_l)
    .bind(record.ffmi)
    .bind(record.healthy_weight_min_kg)
    .bind(record.healthy_weight_max_kg)
    .bind(record.overweight_kg)
    .bind(record.waist_hip_ratio)
    .bind(record.waist_height_ratio)
    .bind(record.daily_calories_kcal)
    .bind(record.protein_g)
    .bind(record.carbs_g)
    .bind(record.fat_g)
    .bind(&record.bmi_category)
    .bind(&record.bmi_summary)
    .bind(&record.body_fat_level)
    .bind(&record.ffmi_label)
    .bind(&record.waist_hip_risk)
    .bind(&record.waist_height_risk)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Loads the full history, oldest first.
pub async fn load_history(pool: &SqlitePool) -> Result<Vec<ClientRecord>, sqlx::Error> {
    sqlx::query_as::<_, ClientRecord>("SELECT * FROM clients ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Loads the history for one person, oldest first.
pub async fn history_for(pool: &SqlitePool, name: &str) -> Result<Vec<ClientRecord>, sqlx::Error> {
    sqlx::query_as::<_, ClientRecord>("SELECT * FROM clients WHERE name = ? ORDER BY id")
        .bind(name)
        .fetch_all(pool)
        .await
}
