//! New-map wizard state: the form, the picked files, and run progress.
//!
//! DESIGN
//! ======
//! File handles are browser objects and stay outside this state; entries
//! here carry only the name and chosen color, in pick order, and are zipped
//! with the handles when the run starts.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use harita::Color;
use harita::api::SourceFormat;
use harita::workflow::{MapDraft, SourceUpload, Step, WorkflowError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub color: Color,
}

impl SourceEntry {
    #[must_use]
    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_file_name(&self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WizardPhase {
    #[default]
    Editing,
    Running(String),
    Failed { step: String, message: String },
    Done(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WizardState {
    pub draft: MapDraft,
    pub sources: Vec<SourceEntry>,
    pub phase: WizardPhase,
}

impl WizardState {
    /// Replace the picked files; every new entry starts with the default color.
    pub fn set_files<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = names
            .into_iter()
            .map(|name| SourceEntry { name: name.into(), color: Color::default() })
            .collect();
    }

    /// Set the color of entry `index` from a picker value; malformed values
    /// keep the entry's current color.
    pub fn set_color(&mut self, index: usize, raw: &str) {
        if let Some(entry) = self.sources.get_mut(index) {
            entry.color = Color::normalize(raw, &entry.color);
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.draft.name.trim().is_empty() && !self.is_running()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, WizardPhase::Running(_))
    }

    pub fn progress(&mut self, step: &Step) {
        self.phase = WizardPhase::Running(step.to_string());
    }

    pub fn fail(&mut self, error: &WorkflowError) {
        self.phase = WizardPhase::Failed {
            step: error.step.to_string(),
            message: error.source.user_message(),
        };
    }

    pub fn finish(&mut self, map_id: String) {
        self.phase = WizardPhase::Done(map_id);
    }

    /// Leave a failed run and return to the (still filled) form.
    pub fn back_to_form(&mut self) {
        self.phase = WizardPhase::Editing;
    }

    /// Draft with the name and description trimmed.
    #[must_use]
    pub fn submitted_draft(&self) -> MapDraft {
        MapDraft {
            name: self.draft.name.trim().to_owned(),
            description: self.draft.description.trim().to_owned(),
            public: self.draft.public,
        }
    }

    /// Pair each entry with its file handle, in pick order.
    pub fn uploads<P>(&self, payloads: impl IntoIterator<Item = P>) -> Vec<SourceUpload<P>> {
        self.sources
            .iter()
            .zip(payloads)
            .map(|(entry, payload)| SourceUpload::new(entry.name.clone(), entry.color.clone(), payload))
            .collect()
    }
}
