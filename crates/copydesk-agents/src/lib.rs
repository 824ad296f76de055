//! Collaborator roles and LLM clients for the Copydesk article pipeline.
//!
//! This crate provides the three generation roles the orchestrator drives:
//!
//! - **Researcher**: picks and runs web/entity/news searches via function
//!   calling and folds the hits into a [`copydesk_models::ResearchBundle`]
//! - **Writer**: drafts the article from the research and product context
//! - **Editor**: judges a draft and hands back structured feedback
//!
//! Each role is a trait at the seam ([`Researcher`], [`Writer`], [`Editor`])
//! with a live LLM-backed implementation. The orchestrator takes the traits
//! as injected capability objects, so tests can substitute deterministic
//! stubs without any network access.
//!
//! Configuration is environment-derived and lives entirely in this crate;
//! see the `*_ENV` constants in [`client`], [`search`], and [`config`].

pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod prompts;
pub mod researcher;
pub mod search;
pub mod writer;

pub use client::{ChatClient, ChatMessage, ChatResponse, ChatTool};
pub use config::ModelConfig;
pub use editor::{Editor, LlmEditor};
pub use error::{AgentError, Result};
pub use researcher::{Researcher, SearchResearcher};
pub use search::{SearchClient, WebSearchResults};
pub use writer::{LlmWriter, Writer};
