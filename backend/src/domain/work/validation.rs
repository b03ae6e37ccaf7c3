//! Validation of user-supplied work fields.
//!
//! Create and update share [`validate_work_input`]. Every violation is
//! collected so clients can fix all fields in one round trip.

use std::fmt;

use serde_json::json;

use super::{Category, Title, WorkDraft};
use crate::domain::Error;

/// Field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkField {
    Title,
    Category,
}

impl WorkField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
        }
    }
}

/// Machine-readable reason for a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkViolationCode {
    MissingTitle,
    BlankTitle,
    UnknownCategory,
}

impl WorkViolationCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingTitle => "missing_field",
            Self::BlankTitle => "blank_title",
            Self::UnknownCategory => "unknown_category",
        }
    }
}

/// One failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkViolation {
    pub field: WorkField,
    pub code: WorkViolationCode,
}

impl fmt::Display for WorkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            WorkViolationCode::MissingTitle => f.write_str("title is required"),
            WorkViolationCode::BlankTitle => f.write_str("title must not be blank"),
            WorkViolationCode::UnknownCategory => {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                write!(f, "category must be one of {}", names.join(", "))
            }
        }
    }
}

/// Non-empty list of violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("work is invalid: {}", self.summary())]
pub struct WorkValidationErrors(Vec<WorkViolation>);

impl WorkValidationErrors {
    #[must_use]
    pub fn violations(&self) -> &[WorkViolation] {
        &self.0
    }

    fn summary(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl From<WorkValidationErrors> for Error {
    fn from(value: WorkValidationErrors) -> Self {
        let violations: Vec<_> = value
            .0
            .iter()
            .map(|violation| {
                json!({
                    "field": violation.field.as_str(),
                    "code": violation.code.as_str(),
                    "message": violation.to_string(),
                })
            })
            .collect();
        Self::invalid_request(value.to_string()).with_details(json!({ "violations": violations }))
    }
}

/// Validate a raw title and category.
///
/// # Examples
/// ```
/// use media_ranker::domain::{Category, validate_work_input};
///
/// let draft = validate_work_input(Some("Blue Train"), "album").unwrap();
/// assert_eq!(draft.category, Category::Album);
///
/// let err = validate_work_input(None, "albums").unwrap_err();
/// assert_eq!(err.violations().len(), 2);
/// ```
pub fn validate_work_input(
    title: Option<&str>,
    category: &str,
) -> Result<WorkDraft, WorkValidationErrors> {
    let mut violations = Vec::new();

    let title = match title {
        None => {
            violations.push(WorkViolation {
                field: WorkField::Title,
                code: WorkViolationCode::MissingTitle,
            });
            None
        }
        Some(raw) => Title::new(raw)
            .map_err(|_| {
                violations.push(WorkViolation {
                    field: WorkField::Title,
                    code: WorkViolationCode::BlankTitle,
                });
            })
            .ok(),
    };

    let category = category
        .parse::<Category>()
        .map_err(|_| {
            violations.push(WorkViolation {
                field: WorkField::Category,
                code: WorkViolationCode::UnknownCategory,
            });
        })
        .ok();

    match (title, category) {
        (Some(title), Some(category)) => Ok(WorkDraft { title, category }),
        _ => Err(WorkValidationErrors(violations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn codes(errors: &WorkValidationErrors) -> Vec<WorkViolationCode> {
        errors.violations().iter().map(|v| v.code).collect()
    }

    #[rstest]
    fn accepts_valid_input_without_rewriting_the_title() {
        let draft = validate_work_input(Some(" Moby Dick "), "book").expect("valid input");
        assert_eq!(draft.title.as_str(), " Moby Dick ");
        assert_eq!(draft.category, Category::Book);
    }

    #[rstest]
    #[case(None, vec![WorkViolationCode::MissingTitle])]
    #[case(Some(""), vec![WorkViolationCode::BlankTitle])]
    #[case(Some("   "), vec![WorkViolationCode::BlankTitle])]
    fn rejects_missing_or_blank_titles(
        #[case] title: Option<&str>,
        #[case] expected: Vec<WorkViolationCode>,
    ) {
        let errors = validate_work_input(title, "movie").expect_err("invalid title");
        assert_eq!(codes(&errors), expected);
    }

    #[rstest]
    fn reports_every_violation() {
        let errors = validate_work_input(Some(""), "albumstrailingtext").expect_err("invalid");
        assert_eq!(
            codes(&errors),
            vec![
                WorkViolationCode::BlankTitle,
                WorkViolationCode::UnknownCategory
            ]
        );
    }

    #[rstest]
    fn converts_into_invalid_request_with_details() {
        let errors = validate_work_input(Some("Heat"), "nope").expect_err("invalid category");
        let error = Error::from(errors);

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["violations"][0]["field"], "category");
        assert_eq!(details["violations"][0]["code"], "unknown_category");
        assert_eq!(
            details["violations"][0]["message"],
            "category must be one of book, album, movie"
        );
    }
}
