use std::path::Path;

use crate::client::orchestrator::{SubmissionOrchestrator, SubmissionOutcome};
use crate::client::ClientError;
use crate::models::resume::NewResume;

pub const VALIDATION_MESSAGE: &str = "Please enter both title and resume content";

/// The resume intake form: two text fields and a busy flag.
#[derive(Debug, Default)]
pub struct IntakeForm {
    pub title: String,
    pub content: String,
    busy: bool,
}

impl IntakeForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            busy: false,
        }
    }

    /// Trimmed field values, or the validation message when either is empty.
    pub fn validate(&self) -> Result<NewResume, ClientError> {
        NewResume {
            title: self.title.clone(),
            content: self.content.clone(),
        }
        .normalized()
        .ok_or_else(|| ClientError::Validation(VALIDATION_MESSAGE.to_string()))
    }

    /// Validates locally, then hands the trimmed values to the orchestrator.
    /// Fields are cleared only when the submission succeeds.
    pub async fn submit(
        &mut self,
        orchestrator: &SubmissionOrchestrator,
    ) -> Result<SubmissionOutcome, ClientError> {
        if self.busy {
            return Err(ClientError::Busy);
        }
        let submission = self.validate()?;

        let result = {
            let _busy = BusyFlag::raise(&mut self.busy);
            orchestrator.submit(&submission).await
        };

        if result.is_ok() {
            self.title.clear();
            self.content.clear();
        }
        result
    }
}

/// Holds the form's busy flag up until dropped, so an abandoned or panicking
/// submission still frees the form.
struct BusyFlag<'a>(&'a mut bool);

impl<'a> BusyFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for BusyFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Reads resume text from a file. PDFs go through text extraction; anything else is read as UTF-8.
pub fn read_resume_file(path: &Path) -> Result<String, ClientError> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let text = if is_pdf {
        pdf_extract::extract_text(path).map_err(|e| ClientError::File(e.to_string()))?
    } else {
        std::fs::read_to_string(path).map_err(|e| ClientError::File(e.to_string()))?
    };
    Ok(text)
}
