//! Talentra — onboarding wizards and chat assistant core.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod wizard;
