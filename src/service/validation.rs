//! Local checks on payloads before they are sent.

use crate::error::ApiError;
use crate::models::DoctorDraft;

pub struct DraftValidator;

impl DraftValidator {
    /// Reject a doctor draft the server would refuse anyway.
    pub fn validate(draft: &DoctorDraft) -> Result<(), ApiError> {
        if draft.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".into()));
        }
        validate_email("email", draft.email.trim())?;
        if draft.picture.bytes.is_empty() {
            return Err(ApiError::Validation("profile picture is required".into()));
        }
        if draft.picture.file_name.trim().is_empty() {
            return Err(ApiError::Validation("profile picture needs a file name".into()));
        }
        Ok(())
    }
}

fn validate_email(field: &str, s: &str) -> Result<(), ApiError> {
    if !s.contains('@') || s.len() < 3 {
        return Err(ApiError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}
