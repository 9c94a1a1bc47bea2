//! Per-step validation — gates the wizard's "Next" control.
//!
//! Pure predicates over the live form state, re-evaluated on every
//! mutation. Welcome and Confirm never block. Validation gates advancement
//! only; it never produces an error, just a disabled control.

use super::form::{CandidateForm, EmployerForm};

/// Whether the candidate wizard may advance from `step`.
pub fn candidate_step_complete(step: usize, form: &CandidateForm) -> bool {
    match step {
        // Welcome
        0 => true,
        // Registration
        1 => {
            !form.full_name.is_empty() && !form.email.is_empty() && !form.phone.is_empty()
        }
        // Background
        2 => {
            !form.job_title.is_empty()
                && !form.current_company.is_empty()
                && !form.years_of_experience.is_empty()
                && !form.preferred_locations.is_empty()
                && !form.degrees.is_empty()
        }
        // Documents
        3 => form.resume.is_some(),
        // Preferences
        4 => !form.target_roles.is_empty() && !form.employment_type.is_empty(),
        // Confirm and anything past it
        _ => true,
    }
}

/// Whether the employer wizard may advance from `step`.
pub fn employer_step_complete(step: usize, form: &EmployerForm) -> bool {
    match step {
        // Welcome
        0 => true,
        // Registration
        1 => {
            !form.company_name.is_empty()
                && !form.full_name.is_empty()
                && !form.email.is_empty()
                && !form.phone.is_empty()
                && !form.company_size.is_empty()
                && !form.industry.is_empty()
        }
        // Contact
        2 => !form.role.is_empty(),
        // Hiring Needs
        3 => !form.hiring_volume.is_empty(),
        // Preferences
        4 => !form.important_features.is_empty(),
        // Confirm
        _ => true,
    }
}
