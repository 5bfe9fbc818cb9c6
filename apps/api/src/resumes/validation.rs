//! Request validation for resume metadata payloads.

use crate::errors::AppError;
use crate::models::resume::{ResumeMetadataCreate, ResumeMetadataUpdate};

pub fn validate_resume_create(req: &ResumeMetadataCreate) -> Result<(), AppError> {
    let mut problems = Vec::new();

    if req.file_name.is_empty() || req.file_name.chars().count() > 500 {
        problems.push("fileName must be 1-500 characters");
    }
    if req.file_size < 0 {
        problems.push("fileSize must be >= 0");
    }
    if req.mime_type.is_empty() {
        problems.push("mimeType must not be empty");
    }
    if matches!(&req.notes, Some(n) if n.chars().count() > 1000) {
        problems.push("notes too long (max 1000)");
    }

    reject_if_any(problems)
}

pub fn validate_resume_update(req: &ResumeMetadataUpdate) -> Result<(), AppError> {
    let mut problems = Vec::new();

    if matches!(&req.file_name, Some(n) if n.is_empty() || n.chars().count() > 500) {
        problems.push("fileName must be 1-500 characters");
    }
    if matches!(&req.notes, Some(n) if n.chars().count() > 1000) {
        problems.push("notes too long (max 1000)");
    }

    reject_if_any(problems)
}

fn reject_if_any(problems: Vec<&str>) -> Result<(), AppError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}
