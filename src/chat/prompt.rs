//! Greeting selection and system-prompt construction for the assistant.
//!
//! Both are pure functions of (context tag, optional step index). The
//! system prompt is built server-side only and never leaves the handler.

use serde::Serialize;

/// Where in the product the assistant is embedded. Selects the greeting
/// and the system instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ChatContext {
    #[serde(rename = "candidate-onboarding")]
    CandidateOnboarding,
    #[serde(rename = "client-onboarding")]
    ClientOnboarding,
    #[serde(rename = "welcome")]
    Welcome,
    #[default]
    #[serde(rename = "general")]
    General,
}

impl std::str::FromStr for ChatContext {
    type Err = std::convert::Infallible;

    /// Unknown or absent tags fall back to the default context.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "candidate-onboarding" => Self::CandidateOnboarding,
            "client-onboarding" => Self::ClientOnboarding,
            "welcome" => Self::Welcome,
            _ => Self::General,
        })
    }
}

impl std::fmt::Display for ChatContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CandidateOnboarding => "candidate-onboarding",
            Self::ClientOnboarding => "client-onboarding",
            Self::Welcome => "welcome",
            Self::General => "general",
        };
        write!(f, "{s}")
    }
}

const BASE_PROMPT: &str = "\
You are Juno, a friendly and helpful AI assistant for Talentra, a talent \
intelligence platform that connects candidates with employers. You should be:

- Warm, encouraging, and professional
- Knowledgeable about the onboarding process
- Helpful with navigation and next steps
- Able to provide insights about the platform
- Concise but thorough in your responses

Talentra has two main products:
1. Candidate Suite - helps job seekers find opportunities and advance their careers
2. Hiring Suite - helps companies find and hire top talent

The platform's AI-powered talent intelligence engine provides intelligent \
matching, evaluation tools, and market insights.";

/// Build the system instruction for a chat request.
///
/// `step` is the zero-based wizard index; the prompt mentions it 1-based,
/// matching what the user sees.
pub fn system_prompt(context: ChatContext, step: Option<usize>) -> String {
    let step_line = match step {
        Some(step) => format!("The user is currently on step {}.", step + 1),
        None => String::new(),
    };

    match context {
        ChatContext::CandidateOnboarding => format!(
            "{BASE_PROMPT}\n\n\
             You are currently helping a candidate through the onboarding process. The steps are:\n\
             1. Welcome\n\
             2. Registration (account creation)\n\
             3. Background (job title, experience, location preferences)\n\
             4. Resume upload\n\
             5. Job preferences (target roles, industries, salary, employment type)\n\
             6. Review and confirmation\n\n\
             {step_line}\n\n\
             Help them understand what information is needed, why it's important, and how it \
             will help them find better opportunities. You can also provide career advice and \
             insights about the job market."
        ),
        ChatContext::ClientOnboarding => format!(
            "{BASE_PROMPT}\n\n\
             You are currently helping a client (employer) through the onboarding process. The steps are:\n\
             1. Welcome\n\
             2. Registration (company and contact info)\n\
             3. Additional company details\n\
             4. Hiring needs (roles, volume, urgency)\n\
             5. Platform preferences (ATS setup, important features)\n\
             6. Review and confirmation\n\n\
             {step_line}\n\n\
             Help them understand how to set up their hiring process, what information will \
             help them find better candidates, and how the platform can improve their hiring \
             outcomes."
        ),
        ChatContext::Welcome => format!(
            "{BASE_PROMPT}\n\n\
             You are helping a user on the welcome page who needs to choose between the \
             Candidate Suite and Hiring Suite. Help them understand:\n\
             - The differences between the two products\n\
             - Which one is right for their needs\n\
             - What they can expect from the onboarding process\n\
             - The benefits of each suite"
        ),
        ChatContext::General => BASE_PROMPT.to_string(),
    }
}

/// The single assistant message seeded when a chat opens. No network call
/// is involved.
pub fn greeting(context: ChatContext, step: Option<usize>) -> String {
    let step_suffix = match step {
        Some(step) => format!("I see you're on step {} - how can I help?", step + 1),
        None => "How can I assist you today?".to_string(),
    };

    match context {
        ChatContext::CandidateOnboarding => format!(
            "Hi! I'm Juno, your AI assistant. I'm here to help you complete your candidate \
             profile and answer any questions about the process. {step_suffix}"
        ),
        ChatContext::ClientOnboarding => format!(
            "Hi! I'm Juno, your AI assistant. I'm here to help you set up your hiring suite \
             and answer any questions about our platform. {step_suffix}"
        ),
        ChatContext::Welcome => "Hi! I'm Juno, your AI assistant. I can help you understand the \
             difference between our Candidate Suite and Hiring Suite, or answer any questions \
             about getting started. What would you like to know?"
            .to_string(),
        ChatContext::General => "Hi! I'm Juno, your AI assistant. I'm here to help you navigate \
             Talentra and answer any questions you might have. How can I assist you today?"
            .to_string(),
    }
}
