//! Request validation for profile payloads — pure functions, collected field
//! errors, no I/O. Limits mirror what the auth platform enforces upstream.

use crate::errors::AppError;
use crate::models::profile::{Education, Experience, ProfileCreate, ProfileUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Folds field errors into the HTTP-facing validation error, or passes.
pub fn into_result(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(AppError::Validation(joined))
}

pub fn validate_profile_create(req: &ProfileCreate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_len(&mut errors, "firstName", &req.first_name, 1, 100);
    check_len(&mut errors, "lastName", &req.last_name, 1, 100);
    if !plausible_email(&req.email) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }
    check_opt_max(&mut errors, "phone", req.phone.as_deref(), 20);
    check_opt_max(&mut errors, "location", req.location.as_deref(), 200);
    check_opt_max(&mut errors, "summary", req.summary.as_deref(), 2000);
    if req.skills.len() > 100 {
        errors.push(FieldError::new("skills", "at most 100 skills allowed"));
    }
    for url_field in [
        ("linkedInUrl", req.linked_in_url.as_deref()),
        ("portfolioUrl", req.portfolio_url.as_deref()),
        ("githubUrl", req.github_url.as_deref()),
        ("websiteUrl", req.website_url.as_deref()),
    ] {
        check_opt_max(&mut errors, url_field.0, url_field.1, 500);
    }
    validate_experience_entries(&mut errors, &req.experience);
    validate_education_entries(&mut errors, &req.education);

    errors
}

pub fn validate_profile_update(req: &ProfileUpdate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(v) = &req.first_name {
        check_len(&mut errors, "firstName", v, 1, 100);
    }
    if let Some(v) = &req.last_name {
        check_len(&mut errors, "lastName", v, 1, 100);
    }
    check_opt_max(&mut errors, "phone", req.phone.as_deref(), 20);
    check_opt_max(&mut errors, "location", req.location.as_deref(), 200);
    check_opt_max(&mut errors, "summary", req.summary.as_deref(), 2000);
    if let Some(skills) = &req.skills {
        if skills.len() > 100 {
            errors.push(FieldError::new("skills", "at most 100 skills allowed"));
        }
    }
    for url_field in [
        ("linkedInUrl", req.linked_in_url.as_deref()),
        ("portfolioUrl", req.portfolio_url.as_deref()),
        ("githubUrl", req.github_url.as_deref()),
        ("websiteUrl", req.website_url.as_deref()),
    ] {
        check_opt_max(&mut errors, url_field.0, url_field.1, 500);
    }
    if let Some(experience) = &req.experience {
        validate_experience_entries(&mut errors, experience);
    }
    if let Some(education) = &req.education {
        validate_education_entries(&mut errors, education);
    }

    errors
}

fn validate_experience_entries(errors: &mut Vec<FieldError>, entries: &[Experience]) {
    for (i, entry) in entries.iter().enumerate() {
        let field = format!("experience[{i}]");
        if entry.company.is_empty() || entry.company.chars().count() > 200 {
            errors.push(FieldError::new(&field, "company must be 1-200 characters"));
        }
        if entry.position.is_empty() || entry.position.chars().count() > 200 {
            errors.push(FieldError::new(&field, "position must be 1-200 characters"));
        }
        if !valid_year_month(&entry.start_date) {
            errors.push(FieldError::new(&field, "startDate must be YYYY-MM"));
        }
        if let Some(end) = &entry.end_date {
            if !valid_year_month(end) {
                errors.push(FieldError::new(&field, "endDate must be YYYY-MM"));
            } else if valid_year_month(&entry.start_date) && end.as_str() < entry.start_date.as_str()
            {
                // YYYY-MM compares correctly as a plain string.
                errors.push(FieldError::new(&field, "endDate must not precede startDate"));
            }
        }
        if let Some(d) = &entry.description {
            if d.chars().count() > 5000 {
                errors.push(FieldError::new(&field, "description too long (max 5000)"));
            }
        }
        if let Some(l) = &entry.location {
            if l.chars().count() > 200 {
                errors.push(FieldError::new(&field, "location too long (max 200)"));
            }
        }
    }
}

fn validate_education_entries(errors: &mut Vec<FieldError>, entries: &[Education]) {
    for (i, entry) in entries.iter().enumerate() {
        let field = format!("education[{i}]");
        if entry.institution.is_empty() || entry.institution.chars().count() > 200 {
            errors.push(FieldError::new(
                &field,
                "institution must be 1-200 characters",
            ));
        }
        if entry.degree.is_empty() || entry.degree.chars().count() > 200 {
            errors.push(FieldError::new(&field, "degree must be 1-200 characters"));
        }
        if let Some(fos) = &entry.field_of_study {
            if fos.chars().count() > 200 {
                errors.push(FieldError::new(&field, "fieldOfStudy too long (max 200)"));
            }
        }
        if !valid_year_month(&entry.start_date) {
            errors.push(FieldError::new(&field, "startDate must be YYYY-MM"));
        }
        if let Some(end) = &entry.end_date {
            if !valid_year_month(end) {
                errors.push(FieldError::new(&field, "endDate must be YYYY-MM"));
            }
        }
        if let Some(gpa) = entry.gpa {
            if !(0.0..=4.0).contains(&gpa) {
                errors.push(FieldError::new(&field, "gpa must be between 0.0 and 4.0"));
            }
        }
        if let Some(d) = &entry.description {
            if d.chars().count() > 2000 {
                errors.push(FieldError::new(&field, "description too long (max 2000)"));
            }
        }
    }
}

fn check_len(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize, max: usize) {
    let n = value.chars().count();
    if n < min || n > max {
        errors.push(FieldError::new(
            field,
            format!("must be {min}-{max} characters"),
        ));
    }
}

fn check_opt_max(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>, max: usize) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.push(FieldError::new(field, format!("too long (max {max})")));
        }
    }
}

/// Accepts `YYYY-MM` with a month of 01-12.
fn valid_year_month(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !bytes[..4].iter().all(u8::is_ascii_digit) || !bytes[5..].iter().all(u8::is_ascii_digit) {
        return false;
    }
    matches!(&s[5..7], "01" | "02" | "03" | "04" | "05" | "06" | "07" | "08" | "09" | "10" | "11" | "12")
}

fn plausible_email(s: &str) -> bool {
    if s.is_empty() || s.chars().count() > 320 || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_create() -> ProfileCreate {
        ProfileCreate {
            user_id: uuid::Uuid::new_v4(),
            organization_id: None,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            location: None,
            summary: None,
            skills: vec!["rust".to_string()],
            experience: vec![],
            education: vec![],
            linked_in_url: None,
            portfolio_url: None,
            github_url: None,
            website_url: None,
        }
    }

    fn experience(start: &str, end: Option<&str>) -> Experience {
        Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: start.to_string(),
            end_date: end.map(str::to_string),
            is_current: end.is_none(),
            description: None,
            location: None,
        }
    }

    #[test]
    fn test_valid_create_passes() {
        assert!(validate_profile_create(&base_create()).is_empty());
    }

    #[test]
    fn test_empty_first_name_fails() {
        let mut req = base_create();
        req.first_name = String::new();
        let errors = validate_profile_create(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "firstName");
    }

    #[test]
    fn test_bad_email_fails() {
        for bad in ["", "no-at-sign", "a@b", "two words@example.com", "a@.com"] {
            let mut req = base_create();
            req.email = bad.to_string();
            assert!(
                !validate_profile_create(&req).is_empty(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn test_too_many_skills_fails() {
        let mut req = base_create();
        req.skills = (0..101).map(|i| format!("skill-{i}")).collect();
        assert!(!validate_profile_create(&req).is_empty());
    }

    #[test]
    fn test_experience_end_before_start_fails() {
        let mut req = base_create();
        req.experience = vec![experience("2022-06", Some("2021-01"))];
        let errors = validate_profile_create(&req);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("precede"));
    }

    #[test]
    fn test_experience_same_month_allowed() {
        let mut req = base_create();
        req.experience = vec![experience("2022-06", Some("2022-06"))];
        assert!(validate_profile_create(&req).is_empty());
    }

    #[test]
    fn test_bad_date_format_fails() {
        for bad in ["2022", "2022-13", "2022-00", "06-2022", "2022/06", "2022-6"] {
            let mut req = base_create();
            req.experience = vec![experience(bad, None)];
            assert!(
                !validate_profile_create(&req).is_empty(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn test_gpa_out_of_range_fails() {
        let mut req = base_create();
        req.education = vec![Education {
            institution: "State University".to_string(),
            degree: "BSc".to_string(),
            field_of_study: None,
            start_date: "2015-09".to_string(),
            end_date: Some("2019-06".to_string()),
            gpa: Some(4.5),
            description: None,
        }];
        let errors = validate_profile_create(&req);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("gpa"));
    }

    #[test]
    fn test_update_with_no_fields_passes() {
        assert!(validate_profile_update(&ProfileUpdate::default()).is_empty());
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let req = ProfileUpdate {
            first_name: Some(String::new()),
            ..ProfileUpdate::default()
        };
        let errors = validate_profile_update(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "firstName");
    }

    #[test]
    fn test_into_result_joins_messages() {
        let errors = vec![
            FieldError::new("firstName", "must be 1-100 characters"),
            FieldError::new("email", "must be a valid email address"),
        ];
        let err = into_result(errors).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("firstName"));
                assert!(msg.contains("email"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
