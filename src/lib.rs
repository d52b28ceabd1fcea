//! # ash-compose
//!
//! AutoSelfHost 的 Compose 生成核心：把应用模板和用户配置交给 AI 补全服务，得到 docker-compose.yml。
//!
//! Compose generation core for AutoSelfHost. Turns a catalog template plus user
//! field values into a `docker-compose.yml` through one chat-completion call.
//!
//! ## Overview
//!
//! A single straight-line pipeline:
//!
//! 1. validate the [`GenerationRequest`]
//! 2. check that a credential is configured ([`GeneratorConfig`])
//! 3. render a deterministic prompt ([`prompt::render_prompt`])
//! 4. call the completion provider once ([`provider::CompletionProvider`])
//! 5. strip markdown fences from the answer ([`normalize::strip_code_fences`])
//!
//! Every failure comes back as [`GenerationResult::Failure`] with one of four
//! generic messages (see [`error_code::FailureKind`]); provider bodies are only
//! logged through `tracing`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ash_compose::{Catalog, ComposeGenerator, GeneratorConfig};
//!
//! #[tokio::main]
//! async fn main() -> ash_compose::Result<()> {
//!     let catalog = Catalog::builtin()?;
//!     let template = catalog.get("vaultwarden").expect("template exists");
//!
//!     let mut values = template.default_values();
//!     values.insert("admin_token".into(), "change-me".into());
//!
//!     let generator = ComposeGenerator::new(GeneratorConfig::from_env()?)?;
//!     let result = generator.generate(&template.to_request(values)).await;
//!     println!("{:?}", result);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`generator`] | The compose generation pipeline |
//! | [`provider`] | Completion provider trait and OpenAI-compatible client |
//! | [`prompt`] | Prompt rendering |
//! | [`normalize`] | Completion text cleaning |
//! | [`config`] | Explicit generator configuration |
//! | [`types`] | Request, result and wire types |
//! | [`catalog`] | Built-in application templates |
//! | [`plans`] | Plan limits and entitlement checks |
//! | [`error_code`] | Failure taxonomy |

pub mod catalog;
pub mod config;
pub mod error_code;
pub mod generator;
pub mod normalize;
pub mod plans;
pub mod prompt;
pub mod provider;
pub mod types;

// Re-export main types for convenience
pub use catalog::{AppTemplate, Catalog, FieldKind, TemplateField};
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use error_code::FailureKind;
pub use generator::ComposeGenerator;
pub use plans::{check_entitlement, Entitlement, Limit, Plan, Resource};
pub use provider::{CompletionProvider, OpenAiProvider};
pub use types::{GenerationRequest, GenerationResult};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
