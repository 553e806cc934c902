//! Match form
//!
//! The fields a user fills in before submitting, and their multipart encoding.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use thiserror::Error;

/// File field carrying the resume document.
pub const RESUME_FIELD: &str = "resume";
/// Text field carrying the target job description.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Failed to read file for field '{field}' ({}): {source}", .path.display())]
    ReadFile {
        field: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content type for field '{field}': {source}")]
    ContentType {
        field: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A single form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text { name: String, value: String },
    /// A file input. `None` means nothing has been chosen yet.
    File { name: String, path: Option<PathBuf> },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormField::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, path: Option<PathBuf>) -> Self {
        FormField::File {
            name: name.into(),
            path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }

    /// Parse a `NAME=VALUE` text assignment, or `NAME=@PATH` for a file.
    pub fn parse_assignment(input: &str) -> Result<Self, String> {
        let (name, value) = input
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{input}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err("field name cannot be empty".to_string());
        }
        match value.strip_prefix('@') {
            Some(path) if !path.is_empty() => Ok(FormField::file(name, Some(PathBuf::from(path)))),
            _ => Ok(FormField::text(name, value)),
        }
    }
}

/// Snapshot of every field in the form, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchForm {
    fields: Vec<FormField>,
}

impl MatchForm {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// The resume upload form: an empty resume file input and job description.
    pub fn resume_upload() -> Self {
        Self::new(vec![
            FormField::file(RESUME_FIELD, None),
            FormField::text(JOB_DESCRIPTION_FIELD, ""),
        ])
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            FormField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_path(&self, name: &str) -> Option<&Path> {
        self.fields.iter().find_map(|field| match field {
            FormField::File { name: n, path } if n == name => path.as_deref(),
            _ => None,
        })
    }

    /// Set a text field, appending it when the form has no field by that name.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        for field in &mut self.fields {
            if let FormField::Text { name: n, value: v } = field {
                if n == name {
                    *v = value;
                    return;
                }
            }
        }
        self.fields.push(FormField::text(name, value));
    }

    /// Set a file field, appending it when the form has no field by that name.
    pub fn set_file(&mut self, name: &str, path: Option<PathBuf>) {
        for field in &mut self.fields {
            if let FormField::File { name: n, path: p } = field {
                if n == name {
                    *p = path;
                    return;
                }
            }
        }
        self.fields.push(FormField::file(name, path));
    }

    /// Encode the snapshot as multipart form data, reading file contents.
    pub async fn into_multipart(self) -> Result<Form, FormError> {
        let mut form = Form::new();

        for field in self.fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File { name, path } => {
                    let part = file_part(&name, path.as_deref()).await?;
                    form.part(name, part)
                }
            };
        }

        Ok(form)
    }
}

async fn file_part(field: &str, path: Option<&Path>) -> Result<Part, FormError> {
    // An unset file input still submits an empty part with an empty file name.
    let Some(path) = path else {
        return Part::bytes(Vec::new())
            .file_name(String::new())
            .mime_str(OCTET_STREAM)
            .map_err(|source| FormError::ContentType {
                field: field.to_string(),
                source,
            });
    };

    let contents = tokio::fs::read(path)
        .await
        .map_err(|source| FormError::ReadFile {
            field: field.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(contents)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|source| FormError::ContentType {
            field: field.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_upload_has_file_and_job_description() {
        let form = MatchForm::resume_upload();
        assert_eq!(form.fields().len(), 2);
        assert_eq!(form.fields()[0].name(), RESUME_FIELD);
        assert_eq!(form.text_value(JOB_DESCRIPTION_FIELD), Some(""));
        assert!(form.file_path(RESUME_FIELD).is_none());
    }

    #[test]
    fn setters_update_in_place_and_append_unknown_fields() {
        let mut form = MatchForm::resume_upload();
        form.set_text(JOB_DESCRIPTION_FIELD, "Backend engineer, Rust and SQL");
        form.set_file(RESUME_FIELD, Some(PathBuf::from("cv.pdf")));
        form.set_text("location", "Remote");

        assert_eq!(form.fields().len(), 3);
        assert_eq!(
            form.text_value(JOB_DESCRIPTION_FIELD),
            Some("Backend engineer, Rust and SQL")
        );
        assert_eq!(form.file_path(RESUME_FIELD), Some(Path::new("cv.pdf")));
        assert_eq!(form.text_value("location"), Some("Remote"));
    }

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        assert_eq!(
            FormField::parse_assignment("notes=a=b"),
            Ok(FormField::text("notes", "a=b"))
        );
        assert_eq!(
            FormField::parse_assignment("cover_letter=@letter.pdf"),
            Ok(FormField::file("cover_letter", Some(PathBuf::from("letter.pdf"))))
        );
        assert!(FormField::parse_assignment("novalue").is_err());
        assert!(FormField::parse_assignment(" =x").is_err());
    }

    #[tokio::test]
    async fn missing_resume_file_is_a_read_error() {
        let form = MatchForm::new(vec![FormField::file(
            RESUME_FIELD,
            Some(PathBuf::from("/definitely/not/here/resume.pdf")),
        )]);

        let err = form.into_multipart().await.unwrap_err();
        assert!(matches!(err, FormError::ReadFile { ref field, .. } if field == RESUME_FIELD));
    }

    #[tokio::test]
    async fn unset_file_input_still_encodes() {
        assert!(MatchForm::resume_upload().into_multipart().await.is_ok());
    }
}
