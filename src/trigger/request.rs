//! Trigger inputs and their validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::defaults::REF_NAME;

static PIPELINE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("pipeline ID pattern is valid"));

/// Raw, untrusted trigger input as submitted by the caller.
///
/// Absent fields are empty strings; there is no separate "missing" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerRequest {
    /// Numeric pipeline definition ID
    pub pipeline_id: String,
    /// Project display name
    pub project: String,
    /// Git ref to run against
    pub ref_name: String,
}

impl TriggerRequest {
    /// Creates a request from its three fields.
    #[must_use]
    pub fn new(
        pipeline_id: impl Into<String>,
        project: impl Into<String>,
        ref_name: impl Into<String>,
    ) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            project: project.into(),
            ref_name: ref_name.into(),
        }
    }
}

/// Fallback values used when the caller leaves a field blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    /// Project substituted for a blank project (may itself be empty)
    pub project: String,
    /// Ref substituted for a blank ref
    pub ref_name: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            project: String::new(),
            ref_name: REF_NAME.to_string(),
        }
    }
}

/// A trigger request that passed validation.
///
/// Only [`validate`] constructs this type, so holding one proves that:
/// - `pipeline_id` is one or more ASCII digits
/// - `project` is non-empty, contains no `/` and is not `.` or `..`
/// - `ref_name` starts with `refs/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTriggerRequest {
    pipeline_id: String,
    project: String,
    ref_name: String,
}

impl ValidatedTriggerRequest {
    /// Pipeline definition ID (digits only).
    #[must_use]
    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Project name after default substitution.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Git ref after default substitution.
    #[must_use]
    pub fn ref_name(&self) -> &str {
        &self.ref_name
    }
}

/// A single field-validation failure.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Pipeline ID is blank or not all digits.
    #[error("Pipeline ID must be a numeric ID (e.g., 42).")]
    PipelineId,

    /// Project is blank and no default is configured.
    #[error("Project is required.")]
    ProjectRequired,

    /// Project contains a path separator.
    #[error("Project must not contain '/'. Use the exact display name.")]
    ProjectSlash,

    /// Project is a dot segment, which URL parsing would collapse.
    #[error("Project must not be '.' or '..'.")]
    ProjectDotSegment,

    /// Ref does not start with `refs/`.
    #[error("Branch must be a valid Git ref (e.g., refs/heads/main).")]
    RefName,
}

/// All validation failures for one request, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Returns the individual failures.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the user-facing messages, one per failure.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates raw input, substituting defaults for blank fields.
///
/// Every rule is checked independently so the caller sees all problems
/// at once.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every failed rule.
pub fn validate(
    raw: &TriggerRequest,
    defaults: &RequestDefaults,
) -> Result<ValidatedTriggerRequest, ValidationErrors> {
    let pipeline_id = raw.pipeline_id.trim();
    let project = or_default(&raw.project, &defaults.project);
    let ref_name = or_default(
        &raw.ref_name,
        or_default(&defaults.ref_name, REF_NAME),
    );

    let mut errors = Vec::new();

    if !PIPELINE_ID.is_match(pipeline_id) {
        errors.push(ValidationError::PipelineId);
    }

    if project.is_empty() {
        errors.push(ValidationError::ProjectRequired);
    } else if project.contains('/') {
        errors.push(ValidationError::ProjectSlash);
    } else if matches!(project, "." | "..") {
        errors.push(ValidationError::ProjectDotSegment);
    }

    if !ref_name.starts_with("refs/") {
        errors.push(ValidationError::RefName);
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(ValidatedTriggerRequest {
        pipeline_id: pipeline_id.to_string(),
        project: project.to_string(),
        ref_name: ref_name.to_string(),
    })
}

/// Trims `value`, falling back to trimmed `fallback` when blank.
fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    match value.trim() {
        "" => fallback.trim(),
        trimmed => trimmed,
    }
}
