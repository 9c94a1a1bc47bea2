//! Onboarding wizards — multi-step guided forms for candidates and
//! employers.
//!
//! A `WizardController` owns one wizard instance end to end: the canonical
//! form state, the current step index, the derived phase, and the two
//! side-effecting transitions (registration after step 1, completion after
//! the final step) submitted through an injected `SubmissionGateway`.
//! Validation and completeness scoring are pure functions over the form.

pub mod completeness;
pub mod controller;
pub mod form;
pub mod steps;
pub mod validate;

pub use completeness::{score, CompletenessReport, ScoreBadge};
pub use controller::{
    Advance, Retreat, SimulatedGateway, SubmissionError, SubmissionGateway, WizardController,
    WizardForm,
};
pub use form::{
    Attachment, CandidateForm, CandidateFormPatch, DegreeEntry, EmployerForm, EmployerFormPatch,
    WorkExperienceEntry,
};
pub use steps::{Phase, WizardKind};
