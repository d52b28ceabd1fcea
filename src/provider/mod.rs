//! 补全服务抽象层：通过 trait 隔离外部 chat-completion API，便于测试替换。
//!
//! Completion provider abstraction.
//!
//! The generator talks to the outside world only through [`CompletionProvider`].
//! [`OpenAiProvider`] is the production implementation; tests can plug in any
//! other type that implements the trait.

mod openai;

use async_trait::async_trait;

use crate::types::{ChatCompletion, ChatCompletionRequest};
use crate::Result;

pub use openai::OpenAiProvider;

/// One-shot chat-completion backend.
///
/// Implementations perform exactly one outbound call per `complete` and keep no
/// state between calls. Errors map as follows: transport failures to
/// [`crate::Error::Http`], non-2xx statuses to [`crate::Error::Remote`], and
/// unreadable bodies to [`crate::Error::Serialization`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn complete(
        &self,
        credential: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion>;
}
