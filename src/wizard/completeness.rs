//! Profile-completeness scoring for the candidate wizard.
//!
//! Advisory only — the score is displayed to nudge candidates toward a
//! stronger profile and never gates navigation. Checks are declared in a
//! fixed order; the "quick win" list is the first unsatisfied checks in
//! declaration order, not the heaviest.

use serde::Serialize;

use super::form::CandidateForm;

/// One tracked profile signal.
pub struct CompletenessCheck {
    pub label: &'static str,
    pub weight: u32,
    satisfied: fn(&CandidateForm) -> bool,
}

impl CompletenessCheck {
    pub fn is_satisfied(&self, form: &CandidateForm) -> bool {
        (self.satisfied)(form)
    }
}

/// All tracked signals, heaviest concerns first. Weights: 3 for core
/// identity/role fields (4 for the résumé), 2 for secondary professional
/// signals, 1 for optional enrichments.
pub const CHECKS: &[CompletenessCheck] = &[
    // Essential
    CompletenessCheck {
        label: "Full Name",
        weight: 3,
        satisfied: |f| !f.full_name.is_empty(),
    },
    CompletenessCheck {
        label: "Email",
        weight: 3,
        satisfied: |f| !f.email.is_empty(),
    },
    CompletenessCheck {
        label: "Phone",
        weight: 3,
        satisfied: |f| !f.phone.is_empty(),
    },
    CompletenessCheck {
        label: "Job Title",
        weight: 3,
        satisfied: |f| !f.job_title.is_empty(),
    },
    CompletenessCheck {
        label: "Current Company",
        weight: 3,
        satisfied: |f| !f.current_company.is_empty(),
    },
    CompletenessCheck {
        label: "Experience Level",
        weight: 3,
        satisfied: |f| !f.years_of_experience.is_empty(),
    },
    CompletenessCheck {
        label: "Preferred Locations",
        weight: 3,
        satisfied: |f| !f.preferred_locations.is_empty(),
    },
    CompletenessCheck {
        label: "Resume",
        weight: 4,
        satisfied: |f| f.resume.is_some(),
    },
    CompletenessCheck {
        label: "Target Roles",
        weight: 3,
        satisfied: |f| !f.target_roles.is_empty(),
    },
    CompletenessCheck {
        label: "Employment Type",
        weight: 3,
        satisfied: |f| !f.employment_type.is_empty(),
    },
    // Important
    CompletenessCheck {
        label: "Education",
        weight: 2,
        satisfied: |f| !f.degrees.is_empty(),
    },
    CompletenessCheck {
        label: "Skills",
        weight: 2,
        satisfied: |f| !f.skills.is_empty(),
    },
    CompletenessCheck {
        label: "Work History",
        weight: 2,
        satisfied: |f| !f.work_experience.is_empty(),
    },
    CompletenessCheck {
        label: "Job Search Timeline",
        weight: 2,
        satisfied: |f| !f.urgency.is_empty(),
    },
    CompletenessCheck {
        label: "Salary Expectations",
        weight: 2,
        satisfied: |f| !f.salary_expectations.is_empty(),
    },
    // Nice to have
    CompletenessCheck {
        label: "LinkedIn Profile",
        weight: 1,
        satisfied: |f| !f.linkedin_url.is_empty(),
    },
    CompletenessCheck {
        label: "Cover Letter",
        weight: 1,
        satisfied: |f| f.cover_letter.is_some(),
    },
    CompletenessCheck {
        label: "Portfolio",
        weight: 1,
        satisfied: |f| !f.portfolio_url.is_empty(),
    },
    CompletenessCheck {
        label: "Career Goals",
        weight: 1,
        satisfied: |f| !f.career_goals.is_empty(),
    },
    CompletenessCheck {
        label: "Preferred Industries",
        weight: 1,
        satisfied: |f| !f.preferred_industries.is_empty(),
    },
    CompletenessCheck {
        label: "Certifications",
        weight: 1,
        satisfied: |f| !f.additional_certifications.is_empty(),
    },
    CompletenessCheck {
        label: "GitHub Profile",
        weight: 1,
        satisfied: |f| !f.github_url.is_empty(),
    },
    CompletenessCheck {
        label: "Personal Website",
        weight: 1,
        satisfied: |f| !f.personal_website.is_empty(),
    },
    CompletenessCheck {
        label: "Additional Documents",
        weight: 1,
        satisfied: |f| !f.additional_documents.is_empty(),
    },
];

/// How many unsatisfied checks the report surfaces as quick wins.
const QUICK_WIN_LIMIT: usize = 3;

/// Display tier for the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBadge {
    Excellent,
    Great,
    Good,
    NeedsWork,
}

impl ScoreBadge {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Excellent,
            80..=89 => Self::Great,
            60..=79 => Self::Good,
            _ => Self::NeedsWork,
        }
    }
}

/// Result of scoring a candidate form.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    /// Weighted percentage, rounded to the nearest integer.
    pub percentage: u32,
    pub completed_count: usize,
    pub total_count: usize,
    /// First unsatisfied checks in declaration order, capped at three.
    pub missing: Vec<&'static str>,
    pub badge: ScoreBadge,
}

/// Score a candidate form against the fixed check list.
pub fn score(form: &CandidateForm) -> CompletenessReport {
    let total_weight: u32 = CHECKS.iter().map(|c| c.weight).sum();
    let mut completed_weight = 0u32;
    let mut completed_count = 0usize;
    let mut missing = Vec::new();

    for check in CHECKS {
        if check.is_satisfied(form) {
            completed_weight += check.weight;
            completed_count += 1;
        } else if missing.len() < QUICK_WIN_LIMIT {
            missing.push(check.label);
        }
    }

    let percentage =
        ((f64::from(completed_weight) / f64::from(total_weight)) * 100.0).round() as u32;

    CompletenessReport {
        percentage,
        completed_count,
        total_count: CHECKS.len(),
        missing,
        badge: ScoreBadge::for_percentage(percentage),
    }
}

/// Whether the score widget is shown at all. Hidden until the registration
/// phase is behind the user.
pub fn visible_at(step: usize) -> bool {
    step > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::form::Attachment;

    #[test]
    fn empty_form_scores_zero() {
        let report = score(&CandidateForm::new());
        assert_eq!(report.percentage, 0);
        assert_eq!(report.completed_count, 0);
        assert_eq!(report.total_count, CHECKS.len());
        assert_eq!(report.badge, ScoreBadge::NeedsWork);
    }

    #[test]
    fn full_form_scores_hundred() {
        let mut form = CandidateForm::new();
        form.full_name = "a".to_string();
        form.email = "a".to_string();
        form.phone = "a".to_string();
        form.job_title = "a".to_string();
        form.current_company = "a".to_string();
        form.years_of_experience = "a".to_string();
        form.preferred_locations = "a".to_string();
        form.resume = Some(Attachment::new("r.pdf"));
        form.target_roles = vec!["a".to_string()];
        form.employment_type = vec!["a".to_string()];
        form.add_degree();
        form.skills = "a".to_string();
        form.add_work_experience();
        form.urgency = "a".to_string();
        form.salary_expectations = "a".to_string();
        form.linkedin_url = "a".to_string();
        form.cover_letter = Some(Attachment::new("c.pdf"));
        form.portfolio_url = "a".to_string();
        form.career_goals = vec!["a".to_string()];
        form.preferred_industries = vec!["a".to_string()];
        form.additional_certifications = "a".to_string();
        form.github_url = "a".to_string();
        form.personal_website = "a".to_string();
        form.additional_documents = vec![Attachment::new("d.pdf")];

        let report = score(&form);
        assert_eq!(report.percentage, 100);
        assert_eq!(report.completed_count, CHECKS.len());
        assert!(report.missing.is_empty());
        assert_eq!(report.badge, ScoreBadge::Excellent);
    }

    #[test]
    fn score_is_monotonic_as_fields_fill_in() {
        let mut form = CandidateForm::new();
        let mut last = score(&form).percentage;

        form.full_name = "Sarah".to_string();
        let next = score(&form).percentage;
        assert!(next >= last);
        last = next;

        form.resume = Some(Attachment::new("r.pdf"));
        let next = score(&form).percentage;
        assert!(next > last, "résumé is the heaviest check");
        last = next;

        form.github_url = "https://github.com/sarah".to_string();
        assert!(score(&form).percentage >= last);
    }

    #[test]
    fn unsetting_a_field_lowers_the_score() {
        let mut form = CandidateForm::new();
        form.resume = Some(Attachment::new("r.pdf"));
        let with_resume = score(&form).percentage;
        form.resume = None;
        assert!(score(&form).percentage < with_resume);
    }

    #[test]
    fn missing_list_is_declaration_ordered_and_capped() {
        let report = score(&CandidateForm::new());
        assert_eq!(report.missing, vec!["Full Name", "Email", "Phone"]);

        let mut form = CandidateForm::new();
        form.full_name = "a".to_string();
        form.phone = "a".to_string();
        let report = score(&form);
        // Email is still first in declaration order among the unsatisfied
        assert_eq!(report.missing[0], "Email");
        assert_eq!(report.missing.len(), 3);
    }

    #[test]
    fn hidden_during_registration_phase() {
        assert!(!visible_at(0));
        assert!(!visible_at(1));
        assert!(visible_at(2));
        assert!(visible_at(5));
    }

    #[test]
    fn badge_tiers() {
        assert_eq!(ScoreBadge::for_percentage(95), ScoreBadge::Excellent);
        assert_eq!(ScoreBadge::for_percentage(85), ScoreBadge::Great);
        assert_eq!(ScoreBadge::for_percentage(60), ScoreBadge::Good);
        assert_eq!(ScoreBadge::for_percentage(59), ScoreBadge::NeedsWork);
    }
}
