//! Step sequences and phase derivation for the onboarding wizards.

use serde::{Deserialize, Serialize};

/// Which wizard a user is going through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardKind {
    Candidate,
    Employer,
}

impl WizardKind {
    /// Ordered step names for this wizard.
    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            Self::Candidate => &[
                "Welcome",
                "Registration",
                "Background",
                "Documents",
                "Preferences",
                "Confirm",
            ],
            Self::Employer => &[
                "Welcome",
                "Registration",
                "Contact",
                "Hiring Needs",
                "Preferences",
                "Confirm",
            ],
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps().len()
    }
}

/// Coarse grouping of steps: account creation vs profile collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Registration,
    Onboarding,
}

impl Phase {
    /// Phase is derived from the step index: the first two steps are
    /// registration, everything after is onboarding.
    pub fn for_step(step: usize) -> Self {
        if step <= 1 {
            Self::Registration
        } else {
            Self::Onboarding
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registration => write!(f, "registration"),
            Self::Onboarding => write!(f, "onboarding"),
        }
    }
}
