//! Create/edit modal lifecycle.
//!
//! The dashboard's create and edit dialogs all behave the same way: a
//! successful save closes the dialog; a rejected save keeps it open and
//! shows the server's message so the operator can correct the form. That
//! contract lives here, decoupled from any widget library.

use crate::mutation::MutationOutcome;

/// The state of one create/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    open: bool,
    error: Option<String>,
}

impl FormSession {
    /// A dialog that has not been opened.
    pub fn closed() -> Self {
        Self {
            open: false,
            error: None,
        }
    }

    /// A freshly opened dialog with no error shown.
    pub fn opened() -> Self {
        Self {
            open: true,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The message currently shown in the dialog, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Opens the dialog, clearing any stale error.
    pub fn begin(&mut self) {
        self.open = true;
        self.error = None;
    }

    /// Applies a mutation outcome: success closes the dialog, rejection
    /// keeps it open and records the message.
    pub fn apply(&mut self, outcome: &MutationOutcome) {
        match outcome {
            MutationOutcome::Applied { .. } => {
                self.open = false;
                self.error = None;
            }
            MutationOutcome::Rejected { message } => {
                self.error = Some(message.clone());
            }
        }
    }

    /// The operator dismissed the dialog without saving.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.error = None;
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_outcome_closes_the_dialog() {
        let mut form = FormSession::opened();
        form.apply(&MutationOutcome::Applied { message: None });
        assert!(!form.is_open());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn rejected_outcome_keeps_the_dialog_open() {
        let mut form = FormSession::opened();
        form.apply(&MutationOutcome::Rejected {
            message: "Nomor MRN sudah terdaftar".to_owned(),
        });
        assert!(form.is_open());
        assert_eq!(form.error(), Some("Nomor MRN sudah terdaftar"));
    }

    #[test]
    fn reopening_clears_a_stale_error() {
        let mut form = FormSession::opened();
        form.apply(&MutationOutcome::Rejected {
            message: "rejected".to_owned(),
        });
        form.dismiss();
        form.begin();
        assert!(form.is_open());
        assert_eq!(form.error(), None);
    }
}
