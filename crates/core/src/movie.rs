//! Movie request payloads and the validation rules applied before any write.
//!
//! Incoming JSON is deserialized into [`CreateMovie`] / [`UpdateMovie`], whose
//! fields are all optional so that missing values can be reported with a
//! field-specific message. Validation turns them into [`NewMovie`] and
//! [`MovieChanges`], which the storage layer accepts as-is.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Movie";

/// Earliest accepted release year (inclusive).
pub const MIN_YEAR: i32 = 1900;

/// Latest accepted release year (inclusive).
pub const MAX_YEAR: i32 = 2030;

/// Lowest accepted rating (inclusive).
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating (inclusive).
pub const MAX_RATING: f64 = 10.0;

/// Number of movies returned by the top-rated listing when no limit is given.
pub const DEFAULT_TOP_LIMIT: i64 = 5;

/// Upper bound for the top-rated `limit` parameter.
pub const MAX_TOP_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /peliculas`.
///
/// Field aliases accept the Spanish names used by earlier clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMovie {
    #[serde(alias = "nombre")]
    pub name: Option<String>,
    #[serde(alias = "categoria")]
    pub category: Option<String>,
    #[serde(alias = "año")]
    pub year: Option<i32>,
    pub director: Option<String>,
    #[serde(alias = "duracion")]
    pub duration_minutes: Option<i32>,
    #[serde(alias = "calificacion")]
    pub rating: Option<f64>,
}

/// Body of `PUT /peliculas/{id}`.
///
/// The outer `Option` records whether the field was present in the payload,
/// the inner one whether it was `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    #[serde(default, alias = "nombre", deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, alias = "categoria", deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, alias = "año", deserialize_with = "present")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub director: Option<Option<String>>,
    #[serde(default, alias = "duracion", deserialize_with = "present")]
    pub duration_minutes: Option<Option<i32>>,
    #[serde(default, alias = "calificacion", deserialize_with = "present")]
    pub rating: Option<Option<f64>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Validated values
// ---------------------------------------------------------------------------

/// A fully validated movie ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub name: String,
    pub category: String,
    pub year: i32,
    pub director: String,
    pub duration_minutes: i32,
    pub rating: Option<f64>,
}

/// A validated partial update. `None` leaves the column untouched;
/// `rating: Some(None)` clears the rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration_minutes: Option<i32>,
    pub rating: Option<Option<f64>>,
}

impl MovieChanges {
    /// True when the update supplies no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn required(field: &str) -> CoreError {
    CoreError::Validation(format!("The field {field} is required"))
}

/// PostgreSQL text columns cannot store NUL, so it is rejected here.
fn required_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(text) if text.contains('\0') => Err(CoreError::Validation(format!(
            "The field {field} must not contain NUL characters"
        ))),
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(required(field)),
    }
}

/// Zero is reported as missing rather than as out of range.
fn required_number(field: &str, value: Option<i32>) -> Result<i32, CoreError> {
    match value {
        Some(number) if number != 0 => Ok(number),
        _ => Err(required(field)),
    }
}

/// Validate a release year against [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "year must be an integer between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

/// Validate that a duration is a positive number of minutes.
pub fn validate_duration(duration_minutes: i32) -> Result<(), CoreError> {
    if duration_minutes <= 0 {
        return Err(CoreError::Validation(format!(
            "duration_minutes must be a positive integer (minutes), got {duration_minutes}"
        )));
    }
    Ok(())
}

/// Validate a rating against [`MIN_RATING`]..=[`MAX_RATING`].
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be a number between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Validate the top-rated `limit` query parameter.
pub fn validate_top_limit(limit: i64) -> Result<(), CoreError> {
    if !(1..=MAX_TOP_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_TOP_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

/// Validate a creation payload.
///
/// Required fields are checked first, in declaration order, followed by the
/// range checks for year, duration and rating.
pub fn validate_create(input: CreateMovie) -> Result<NewMovie, CoreError> {
    let name = required_text("name", input.name)?;
    let category = required_text("category", input.category)?;
    let year = required_number("year", input.year)?;
    let director = required_text("director", input.director)?;
    let duration_minutes = required_number("duration_minutes", input.duration_minutes)?;

    validate_year(year)?;
    validate_duration(duration_minutes)?;
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    Ok(NewMovie {
        name,
        category,
        year,
        director,
        duration_minutes,
        rating: input.rating,
    })
}

/// Validate a partial update. Only supplied fields are checked.
///
/// An explicit `null` is rejected for required fields and clears the rating.
pub fn validate_update(input: UpdateMovie) -> Result<MovieChanges, CoreError> {
    let name = input
        .name
        .map(|value| required_text("name", value))
        .transpose()?;
    let category = input
        .category
        .map(|value| required_text("category", value))
        .transpose()?;
    let director = input
        .director
        .map(|value| required_text("director", value))
        .transpose()?;

    let year = input
        .year
        .map(|value| {
            let year = value.ok_or_else(|| required("year"))?;
            validate_year(year).map(|()| year)
        })
        .transpose()?;

    let duration_minutes = input
        .duration_minutes
        .map(|value| {
            let minutes = value.ok_or_else(|| required("duration_minutes"))?;
            validate_duration(minutes).map(|()| minutes)
        })
        .transpose()?;

    if let Some(Some(rating)) = input.rating {
        validate_rating(rating)?;
    }

    Ok(MovieChanges {
        name,
        category,
        year,
        director,
        duration_minutes,
        rating: input.rating,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
