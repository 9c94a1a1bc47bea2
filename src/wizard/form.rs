//! Form state for the onboarding wizards.
//!
//! Each wizard owns one form struct for its lifetime. All fields are always
//! present, with empty-string/empty-list/false defaults; there is no partial
//! or undefined state. Step views mutate the form exclusively through the
//! controller by submitting a typed patch (whole-field replacement), or
//! through the explicit add/update/remove operations on repeatable entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference to an uploaded document. The upload mechanics live outside
/// this crate; the form only tracks that a file was attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// A degree held by the candidate. Repeatable; insertion order is kept for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeEntry {
    pub id: Uuid,
    pub level: String,
    pub university: String,
    pub degree_type: String,
    pub concentration: String,
    pub graduation_year: String,
}

impl DegreeEntry {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            level: String::new(),
            university: String::new(),
            degree_type: String::new(),
            concentration: String::new(),
            graduation_year: String::new(),
        }
    }
}

impl Default for DegreeEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// A work-experience entry. When `is_current` is set the end date is
/// suppressed — use `effective_end_date` for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub id: Uuid,
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub description: String,
}

impl WorkExperienceEntry {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            company: String::new(),
            title: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            is_current: false,
            description: String::new(),
        }
    }

    /// End date for display — `None` while this is the current position.
    pub fn effective_end_date(&self) -> Option<&str> {
        if self.is_current {
            None
        } else {
            Some(self.end_date.as_str())
        }
    }
}

impl Default for WorkExperienceEntry {
    fn default() -> Self {
        Self::new()
    }
}

// ── Candidate ───────────────────────────────────────────────────────────

/// Everything collected across the candidate wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateForm {
    // Registration (steps 0-1)
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub how_did_you_hear: String,
    pub urgency: String,
    pub referral_code: String,

    // Background (step 2)
    pub job_title: String,
    pub current_company: String,
    pub is_currently_employed: bool,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub degrees: Vec<DegreeEntry>,
    pub additional_certifications: String,
    pub preferred_locations: String,
    pub is_remote_open: bool,
    pub remote_only: bool,
    pub years_of_experience: String,
    pub skills: String,
    pub career_goals: Vec<String>,
    pub portfolio_url: String,
    pub github_url: String,
    pub personal_website: String,
    pub availability_date: String,
    pub notice_period: String,
    pub willing_to_relocate: bool,
    pub travel_willingness: u8,

    // Documents (step 3)
    pub resume: Option<Attachment>,
    pub cover_letter: Option<Attachment>,
    pub additional_documents: Vec<Attachment>,

    // Preferences (step 4)
    pub target_roles: Vec<String>,
    pub preferred_industries: Vec<String>,
    pub salary_expectations: String,
    pub employment_type: Vec<String>,
}

impl CandidateForm {
    /// Fresh all-empty form, created when a wizard mounts. Candidates start
    /// out marked as currently employed, matching the product default.
    pub fn new() -> Self {
        Self {
            is_currently_employed: true,
            ..Self::default()
        }
    }

    /// Merge a patch: every `Some` field replaces the current value whole.
    pub fn apply(&mut self, patch: CandidateFormPatch) {
        macro_rules! merge {
            ($form:expr, $patch:expr, $($field:ident),* $(,)?) => {
                $(if let Some(value) = $patch.$field {
                    $form.$field = value;
                })*
            };
        }
        merge!(
            self,
            patch,
            full_name,
            email,
            phone,
            linkedin_url,
            how_did_you_hear,
            urgency,
            referral_code,
            job_title,
            current_company,
            is_currently_employed,
            additional_certifications,
            preferred_locations,
            is_remote_open,
            remote_only,
            years_of_experience,
            skills,
            career_goals,
            portfolio_url,
            github_url,
            personal_website,
            availability_date,
            notice_period,
            willing_to_relocate,
            travel_willingness,
            resume,
            cover_letter,
            additional_documents,
            target_roles,
            preferred_industries,
            salary_expectations,
            employment_type,
        );
    }

    /// Append a fresh degree entry, returning its generated id.
    pub fn add_degree(&mut self) -> Uuid {
        let entry = DegreeEntry::new();
        let id = entry.id;
        self.degrees.push(entry);
        id
    }

    pub fn degree_mut(&mut self, id: Uuid) -> Option<&mut DegreeEntry> {
        self.degrees.iter_mut().find(|d| d.id == id)
    }

    /// Remove a degree by id. Returns false if the id is unknown.
    pub fn remove_degree(&mut self, id: Uuid) -> bool {
        let before = self.degrees.len();
        self.degrees.retain(|d| d.id != id);
        self.degrees.len() != before
    }

    /// Append a fresh work-experience entry, returning its generated id.
    pub fn add_work_experience(&mut self) -> Uuid {
        let entry = WorkExperienceEntry::new();
        let id = entry.id;
        self.work_experience.push(entry);
        id
    }

    pub fn work_experience_mut(&mut self, id: Uuid) -> Option<&mut WorkExperienceEntry> {
        self.work_experience.iter_mut().find(|w| w.id == id)
    }

    /// Remove a work-experience entry by id. Returns false if unknown.
    pub fn remove_work_experience(&mut self, id: Uuid) -> bool {
        let before = self.work_experience.len();
        self.work_experience.retain(|w| w.id != id);
        self.work_experience.len() != before
    }
}

/// Partial update for `CandidateForm`. `Some` fields replace the current
/// value; `None` fields are untouched. Repeatable lists are managed through
/// the dedicated add/update/remove operations, not the patch.
#[derive(Debug, Clone, Default)]
pub struct CandidateFormPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub urgency: Option<String>,
    pub referral_code: Option<String>,
    pub job_title: Option<String>,
    pub current_company: Option<String>,
    pub is_currently_employed: Option<bool>,
    pub additional_certifications: Option<String>,
    pub preferred_locations: Option<String>,
    pub is_remote_open: Option<bool>,
    pub remote_only: Option<bool>,
    pub years_of_experience: Option<String>,
    pub skills: Option<String>,
    pub career_goals: Option<Vec<String>>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub personal_website: Option<String>,
    pub availability_date: Option<String>,
    pub notice_period: Option<String>,
    pub willing_to_relocate: Option<bool>,
    pub travel_willingness: Option<u8>,
    pub resume: Option<Option<Attachment>>,
    pub cover_letter: Option<Option<Attachment>>,
    pub additional_documents: Option<Vec<Attachment>>,
    pub target_roles: Option<Vec<String>>,
    pub preferred_industries: Option<Vec<String>>,
    pub salary_expectations: Option<String>,
    pub employment_type: Option<Vec<String>>,
}

// ── Employer ────────────────────────────────────────────────────────────

/// Everything collected across the employer wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployerForm {
    // Registration (steps 0-1)
    pub company_name: String,
    pub company_size: String,
    pub industry: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,

    // Onboarding (steps 2+)
    pub website: String,
    pub role: String,
    pub hiring_roles: String,
    pub hiring_volume: String,
    pub immediate_support: bool,
    pub needs_ats_setup: bool,
    pub replacing_existing_ats: bool,
    pub important_features: Vec<String>,
}

impl EmployerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a patch: every `Some` field replaces the current value whole.
    pub fn apply(&mut self, patch: EmployerFormPatch) {
        macro_rules! merge {
            ($form:expr, $patch:expr, $($field:ident),* $(,)?) => {
                $(if let Some(value) = $patch.$field {
                    $form.$field = value;
                })*
            };
        }
        merge!(
            self,
            patch,
            company_name,
            company_size,
            industry,
            full_name,
            email,
            phone,
            linkedin_url,
            website,
            role,
            hiring_roles,
            hiring_volume,
            immediate_support,
            needs_ats_setup,
            replacing_existing_ats,
            important_features,
        );
    }
}

/// Partial update for `EmployerForm`.
#[derive(Debug, Clone, Default)]
pub struct EmployerFormPatch {
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub website: Option<String>,
    pub role: Option<String>,
    pub hiring_roles: Option<String>,
    pub hiring_volume: Option<String>,
    pub immediate_support: Option<bool>,
    pub needs_ats_setup: Option<bool>,
    pub replacing_existing_ats: Option<bool>,
    pub important_features: Option<Vec<String>>,
}
