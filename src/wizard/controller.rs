//! Wizard controller — owns the canonical form state and sequences steps.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::WizardError;

use super::completeness::{self, CompletenessReport};
use super::form::{CandidateForm, CandidateFormPatch, EmployerForm, EmployerFormPatch};
use super::steps::{Phase, WizardKind};
use super::validate::{candidate_step_complete, employer_step_complete};

/// Failure reported by the account backend.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SubmissionError(pub String);

/// The account backend the wizard submits to.
///
/// Both operations must be idempotent: the controller retries by calling
/// them again after a reported failure, and only latches its one-shot
/// registered flag on success.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Create the account from the registration fields.
    async fn register(&self, form: &WizardForm) -> Result<(), SubmissionError>;

    /// Finalize onboarding with the full profile.
    async fn complete_onboarding(&self, form: &WizardForm) -> Result<(), SubmissionError>;
}

/// Stand-in backend: fixed latency, always succeeds.
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn register(&self, _form: &WizardForm) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.latency).await;
        Ok(())
    }

    async fn complete_onboarding(&self, _form: &WizardForm) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

/// Form state for one wizard instance.
#[derive(Debug, Clone)]
pub enum WizardForm {
    Candidate(CandidateForm),
    Employer(EmployerForm),
}

impl WizardForm {
    pub fn kind(&self) -> WizardKind {
        match self {
            Self::Candidate(_) => WizardKind::Candidate,
            Self::Employer(_) => WizardKind::Employer,
        }
    }

    fn step_complete(&self, step: usize) -> bool {
        match self {
            Self::Candidate(form) => candidate_step_complete(step, form),
            Self::Employer(form) => employer_step_complete(step, form),
        }
    }
}

/// Outcome of `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current step's required fields are incomplete; nothing changed.
    Blocked,
    /// Moved to the given step with no side effect.
    Moved { step: usize },
    /// Registration succeeded and the wizard moved to the given step.
    Registered { step: usize },
    /// Onboarding finished; the wizard is in its terminal success state.
    Completed,
}

/// Outcome of `retreat()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Already at the first step — the caller should navigate out.
    Exit,
    /// Moved back to the given step.
    Moved { step: usize },
}

/// Owns one wizard's step index, phase, and form state for its lifetime.
///
/// Step views read an immutable snapshot (`candidate()` / `employer()`) and
/// mutate through `patch_*` or the repeatable-entry helpers; no other
/// component holds authoritative state.
pub struct WizardController {
    form: WizardForm,
    step: usize,
    registered: bool,
    submitting: bool,
    complete: bool,
    gateway: Arc<dyn SubmissionGateway>,
}

impl WizardController {
    pub fn candidate(gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self::new(WizardForm::Candidate(CandidateForm::new()), gateway)
    }

    pub fn employer(gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self::new(WizardForm::Employer(EmployerForm::new()), gateway)
    }

    fn new(form: WizardForm, gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self {
            form,
            step: 0,
            registered: false,
            submitting: false,
            complete: false,
            gateway,
        }
    }

    pub fn kind(&self) -> WizardKind {
        self.form.kind()
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn phase(&self) -> Phase {
        Phase::for_step(self.step)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Whether the current step's data permits advancing. Re-evaluate after
    /// every mutation; this is what enables/disables the "Next" control.
    pub fn can_advance(&self) -> bool {
        self.form.step_complete(self.step)
    }

    /// Label for the "Next" control. Step 1 doubles as the registration
    /// submit.
    pub fn next_label(&self) -> &'static str {
        if self.step == 1 && !self.registered {
            "Complete Registration"
        } else if self.step == self.form.kind().step_count() - 1 {
            "Complete"
        } else {
            "Next"
        }
    }

    pub fn form(&self) -> &WizardForm {
        &self.form
    }

    pub fn candidate_form(&self) -> Option<&CandidateForm> {
        match &self.form {
            WizardForm::Candidate(form) => Some(form),
            WizardForm::Employer(_) => None,
        }
    }

    pub fn employer_form(&self) -> Option<&EmployerForm> {
        match &self.form {
            WizardForm::Employer(form) => Some(form),
            WizardForm::Candidate(_) => None,
        }
    }

    /// Mutable access for repeatable-entry operations (add/update/remove
    /// degrees and work experience).
    pub fn candidate_form_mut(&mut self) -> Option<&mut CandidateForm> {
        match &mut self.form {
            WizardForm::Candidate(form) => Some(form),
            WizardForm::Employer(_) => None,
        }
    }

    /// Merge a candidate patch. Returns false for the wrong wizard kind.
    pub fn patch_candidate(&mut self, patch: CandidateFormPatch) -> bool {
        match &mut self.form {
            WizardForm::Candidate(form) => {
                form.apply(patch);
                true
            }
            WizardForm::Employer(_) => false,
        }
    }

    /// Merge an employer patch. Returns false for the wrong wizard kind.
    pub fn patch_employer(&mut self, patch: EmployerFormPatch) -> bool {
        match &mut self.form {
            WizardForm::Employer(form) => {
                form.apply(patch);
                true
            }
            WizardForm::Candidate(_) => false,
        }
    }

    /// Completeness report for display. `None` for the employer wizard and
    /// while the widget is hidden (registration phase).
    pub fn completeness(&self) -> Option<CompletenessReport> {
        if !completeness::visible_at(self.step) {
            return None;
        }
        self.candidate_form().map(completeness::score)
    }

    /// Go back one step, or signal navigation out of the wizard at step 0.
    /// Never validated.
    pub fn retreat(&mut self) -> Retreat {
        if self.step == 0 {
            Retreat::Exit
        } else {
            self.step -= 1;
            Retreat::Moved { step: self.step }
        }
    }

    /// Advance past the current step.
    ///
    /// Blocked unless the step validator approves. Leaving step 1 for the
    /// first time registers the account (one-shot); leaving the final step
    /// completes onboarding and latches the terminal state. On a gateway
    /// failure the wizard stays on the current step and the error is
    /// surfaced so the caller can retry by advancing again.
    pub async fn advance(&mut self) -> Result<Advance, WizardError> {
        if self.complete {
            return Ok(Advance::Completed);
        }
        if !self.can_advance() {
            return Ok(Advance::Blocked);
        }

        let last_step = self.form.kind().step_count() - 1;

        if self.step == 1 && !self.registered {
            self.submitting = true;
            let result = self.gateway.register(&self.form).await;
            self.submitting = false;
            if let Err(e) = result {
                tracing::warn!(error = %e, "Registration submission failed");
                return Err(WizardError::Submission {
                    operation: "register".to_string(),
                    reason: e.to_string(),
                });
            }
            self.registered = true;
            self.step += 1;
            tracing::info!(step = self.step, "Registration complete");
            return Ok(Advance::Registered { step: self.step });
        }

        if self.step == last_step {
            self.submitting = true;
            let result = self.gateway.complete_onboarding(&self.form).await;
            self.submitting = false;
            if let Err(e) = result {
                tracing::warn!(error = %e, "Onboarding completion failed");
                return Err(WizardError::Submission {
                    operation: "complete_onboarding".to_string(),
                    reason: e.to_string(),
                });
            }
            self.complete = true;
            tracing::info!("Onboarding complete");
            return Ok(Advance::Completed);
        }

        self.step += 1;
        tracing::debug!(step = self.step, "Advanced");
        Ok(Advance::Moved { step: self.step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::form::Attachment;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway that counts calls and can be told to fail.
    #[derive(Default)]
    struct CountingGateway {
        registers: AtomicUsize,
        completions: AtomicUsize,
        fail_register: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl SubmissionGateway for CountingGateway {
        async fn register(&self, _form: &WizardForm) -> Result<(), SubmissionError> {
            self.registers.fetch_add(1, Ordering::SeqCst);
            if self.fail_register.load(Ordering::SeqCst) {
                Err(SubmissionError("backend unavailable".to_string()))
            } else {
                Ok(())
            }
        }

        async fn complete_onboarding(&self, _form: &WizardForm) -> Result<(), SubmissionError> {
            self.completions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn candidate_with(gateway: &Arc<CountingGateway>) -> WizardController {
        WizardController::candidate(Arc::clone(gateway) as Arc<dyn SubmissionGateway>)
    }

    fn fill_registration(ctrl: &mut WizardController) {
        ctrl.patch_candidate(CandidateFormPatch {
            full_name: Some("Sarah Johnson".to_string()),
            email: Some("sarah@x.com".to_string()),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        });
    }

    #[tokio::test]
    async fn welcome_always_advances() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl = candidate_with(&gateway);
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Moved { step: 1 });

        let mut employer =
            WizardController::employer(Arc::clone(&gateway) as Arc<dyn SubmissionGateway>);
        assert_eq!(employer.advance().await.unwrap(), Advance::Moved { step: 1 });
    }

    #[tokio::test]
    async fn registration_blocks_until_identity_is_filled() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl = candidate_with(&gateway);
        ctrl.advance().await.unwrap();

        assert_eq!(ctrl.advance().await.unwrap(), Advance::Blocked);
        assert_eq!(ctrl.current_step(), 1);
        assert_eq!(gateway.registers.load(Ordering::SeqCst), 0);

        fill_registration(&mut ctrl);
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Registered { step: 2 });
        assert!(ctrl.is_registered());
        assert_eq!(gateway.registers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn registration_is_one_shot() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl = candidate_with(&gateway);
        ctrl.advance().await.unwrap();
        fill_registration(&mut ctrl);
        ctrl.advance().await.unwrap();
        assert_eq!(gateway.registers.load(Ordering::SeqCst), 1);

        // Going back to step 1 and forward again must not re-register
        assert_eq!(ctrl.retreat(), Retreat::Moved { step: 1 });
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Moved { step: 2 });
        assert_eq!(gateway.registers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gateway_failure_keeps_step_and_allows_retry() {
        let gateway = Arc::new(CountingGateway::default());
        gateway.fail_register.store(true, Ordering::SeqCst);
        let mut ctrl = candidate_with(&gateway);
        ctrl.advance().await.unwrap();
        fill_registration(&mut ctrl);

        let err = ctrl.advance().await.unwrap_err();
        assert!(matches!(err, WizardError::Submission { .. }));
        assert_eq!(ctrl.current_step(), 1);
        assert!(!ctrl.is_registered());
        assert!(!ctrl.is_submitting());

        gateway.fail_register.store(false, Ordering::SeqCst);
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Registered { step: 2 });
        assert_eq!(gateway.registers.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retreat_at_step_zero_exits() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl = candidate_with(&gateway);
        assert_eq!(ctrl.retreat(), Retreat::Exit);
        assert_eq!(ctrl.current_step(), 0);
    }

    #[tokio::test]
    async fn candidate_happy_path() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl = candidate_with(&gateway);

        assert_eq!(ctrl.advance().await.unwrap(), Advance::Moved { step: 1 });
        assert_eq!(ctrl.phase(), Phase::Registration);

        fill_registration(&mut ctrl);
        assert_eq!(ctrl.next_label(), "Complete Registration");
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Registered { step: 2 });
        assert_eq!(ctrl.phase(), Phase::Onboarding);

        ctrl.patch_candidate(CandidateFormPatch {
            job_title: Some("Engineer".to_string()),
            current_company: Some("Acme".to_string()),
            years_of_experience: Some("3-5 years".to_string()),
            preferred_locations: Some("Austin, TX".to_string()),
            ..Default::default()
        });
        let degree_id = ctrl.candidate_form_mut().unwrap().add_degree();
        ctrl.candidate_form_mut()
            .unwrap()
            .degree_mut(degree_id)
            .unwrap()
            .level = "Bachelor's Degree".to_string();
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Moved { step: 3 });

        ctrl.patch_candidate(CandidateFormPatch {
            resume: Some(Some(Attachment::new("resume.pdf"))),
            ..Default::default()
        });
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Moved { step: 4 });

        ctrl.patch_candidate(CandidateFormPatch {
            target_roles: Some(vec!["Software Engineering".to_string()]),
            employment_type: Some(vec!["Full-Time".to_string()]),
            ..Default::default()
        });
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Moved { step: 5 });

        assert_eq!(ctrl.next_label(), "Complete");
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Completed);
        assert!(ctrl.is_complete());
        assert_eq!(gateway.completions.load(Ordering::SeqCst), 1);

        // Terminal: further advances never move or resubmit
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Completed);
        assert_eq!(gateway.completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn employer_blocked_then_accepted() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl =
            WizardController::employer(Arc::clone(&gateway) as Arc<dyn SubmissionGateway>);
        ctrl.advance().await.unwrap();

        assert_eq!(ctrl.advance().await.unwrap(), Advance::Blocked);

        ctrl.patch_employer(EmployerFormPatch {
            company_name: Some("Acme Corp".to_string()),
            full_name: Some("Pat Lee".to_string()),
            email: Some("pat@acme.com".to_string()),
            phone: Some("555-0200".to_string()),
            company_size: Some("51-200".to_string()),
            industry: Some("Technology".to_string()),
            ..Default::default()
        });
        assert_eq!(ctrl.advance().await.unwrap(), Advance::Registered { step: 2 });
    }

    #[tokio::test]
    async fn completeness_hidden_during_registration() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl = candidate_with(&gateway);
        assert!(ctrl.completeness().is_none());

        ctrl.advance().await.unwrap();
        assert!(ctrl.completeness().is_none());

        fill_registration(&mut ctrl);
        ctrl.advance().await.unwrap();
        let report = ctrl.completeness().expect("visible from step 2");
        assert!(report.percentage > 0);
    }

    #[tokio::test]
    async fn employer_never_gets_a_completeness_report() {
        let gateway = Arc::new(CountingGateway::default());
        let mut ctrl =
            WizardController::employer(Arc::clone(&gateway) as Arc<dyn SubmissionGateway>);
        ctrl.advance().await.unwrap();
        ctrl.patch_employer(EmployerFormPatch {
            company_name: Some("Acme".to_string()),
            full_name: Some("Pat".to_string()),
            email: Some("p@a.com".to_string()),
            phone: Some("1".to_string()),
            company_size: Some("1-10".to_string()),
            industry: Some("Tech".to_string()),
            ..Default::default()
        });
        ctrl.advance().await.unwrap();
        assert!(ctrl.completeness().is_none());
    }
}
