pub mod root;
pub mod auth;
pub mod announcements;
pub mod gallery;
pub mod weekly_services;
pub mod uploads;
pub mod seo;

use axum::{extract::rejection::JsonRejection, Json};
use validator::Validate;

use crate::error::Result;

/// Unwraps a JSON body and runs its validation rules.
pub(crate) fn validated<T: Validate>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    let Json(data) = payload?;
    data.validate()?;
    Ok(data)
}
