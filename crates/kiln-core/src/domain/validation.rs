use crate::domain::{
    entities::{common, corpus::TemplateEntry, project_config::ProjectConfig},
    error::DomainError,
    markers,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    /// A corpus entry must have a relative, non-escaping path and only known
    /// conditional markers.
    pub fn validate_entry(entry: &TemplateEntry) -> Result<(), DomainError> {
        let path = entry.path();

        if path.is_empty() {
            return Err(DomainError::InvalidCorpus("entry with an empty path".into()));
        }
        if common::is_absolute(path) {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.to_string(),
            });
        }
        if path.split(common::SEPARATOR).any(|segment| segment == "..") {
            return Err(DomainError::InvalidCorpus(format!(
                "'{path}' escapes the corpus root"
            )));
        }

        markers::validate_markers(path)
    }
}
