//! 类型模块：生成请求、生成结果与聊天补全的线上消息格式。
//!
//! # Types Module
//!
//! Message payloads that cross the generator boundary. All of them are built per
//! call and never mutated afterwards.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`GenerationRequest`] | Template identity, hints and user field values |
//! | [`GenerationResult`] | Tagged `Success`/`Failure` outcome |
//! | [`ChatMessage`] | One chat-completion message with role and text |
//! | [`ChatCompletionRequest`] | Outbound chat-completion body |
//! | [`ChatCompletion`] | Parsed provider answer (content + usage) |
//!
//! ## Example
//!
//! ```rust
//! use ash_compose::types::GenerationRequest;
//!
//! let request = GenerationRequest::new("uptime-kuma", "Uptime Kuma")
//!     .with_value("port", "3001");
//! assert!(request.validate().is_ok());
//! ```

pub mod message;
pub mod request;
pub mod result;

pub use message::{ChatCompletion, ChatCompletionRequest, ChatMessage, MessageRole};
pub use request::GenerationRequest;
pub use result::GenerationResult;
