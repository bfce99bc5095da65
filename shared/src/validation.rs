//! Input validation functions
//!
//! The calculators trust their inputs; these checks run at the API boundary
//! before anything reaches them. Simple field ranges on request types use the
//! `validator` derive, cross-field and domain checks live here.

use chrono::{DateTime, Utc};
use validator::ValidationErrors;

use crate::health_metrics::BodyProfile;
use crate::models::Macros;

/// Validate body mass (in kg)
pub fn validate_mass_kg(mass_kg: f64) -> Result<(), String> {
    if mass_kg.is_nan() || mass_kg.is_infinite() {
        return Err("Mass must be a valid number".to_string());
    }
    if mass_kg < 20.0 {
        return Err("Mass must be at least 20 kg".to_string());
    }
    if mass_kg > 500.0 {
        return Err("Mass must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age_years(age_years: i32) -> Result<(), String> {
    if age_years < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Upper bound for a single macro figure on one meal log
pub const MAX_MACRO_GRAMS: f64 = 10000.0;

/// Validate macro grams; absent values are allowed
pub fn validate_macros(macros: &Macros) -> Result<(), ValidationError> {
    let fields = [
        ("protein_g", macros.protein_g),
        ("carbs_g", macros.carbs_g),
        ("fat_g", macros.fat_g),
    ];
    for (field, value) in fields {
        if let Some(grams) = value {
            if grams.is_nan() || grams.is_infinite() || grams < 0.0 {
                return Err(ValidationError::new(field, "must be a non-negative number"));
            }
            if grams > MAX_MACRO_GRAMS {
                return Err(ValidationError::new(field, "must be at most 10000 g"));
            }
        }
    }
    Ok(())
}

/// Validate an explicit MET value
pub fn validate_met_value(met: f64) -> Result<(), String> {
    if met.is_nan() || met.is_infinite() || met <= 0.0 {
        return Err("MET value must be a positive number".to_string());
    }
    if met > 25.0 {
        return Err("MET value must be at most 25".to_string());
    }
    Ok(())
}

/// Validate that a query range is ordered
pub fn validate_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), String> {
    if start > end {
        return Err("Range start must not be after range end".to_string());
    }
    Ok(())
}

/// Validate every numeric field of a body profile
pub fn validate_body_profile(profile: &BodyProfile) -> Result<(), ValidationError> {
    validate_mass_kg(profile.mass_kg).map_err(|e| ValidationError::new("mass_kg", &e))?;
    validate_height_cm(profile.height_cm).map_err(|e| ValidationError::new("height_cm", &e))?;
    validate_age_years(profile.age_years).map_err(|e| ValidationError::new("age_years", &e))?;
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "mass_kg" => "Body Mass",
        "target_mass_kg" => "Target Mass",
        "height_cm" => "Height",
        "age_years" => "Age",
        "sex" => "Sex",
        "activity_level" => "Activity Level",
        "calories" => "Calories",
        "calories_burned" => "Calories Burned",
        "protein_g" => "Protein",
        "carbs_g" => "Carbohydrates",
        "fat_g" => "Fat",
        "duration_minutes" => "Duration",
        "met_value" => "MET Value",
        "exercise_name" => "Exercise Name",
        "period" => "Period",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Reduce `validator` derive errors to the first field failure, labelled
pub fn first_validation_error(errors: &ValidationErrors) -> ValidationError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, failures)| {
            failures.first().map(|failure| {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed '{}' check", failure.code));
                ValidationError::new(field.as_ref(), &message)
            })
        })
        .unwrap_or_else(|| ValidationError::new("request", "is invalid"))
}
