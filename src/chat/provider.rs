//! Model-provider capability: a streaming chat completion.

use super::{Role, Turn};
use crate::config::Settings;
use crate::error::{AskVideoError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tracing::debug;

/// A finite, non-restartable sequence of answer fragments.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Trait for streaming chat model providers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Start generating a reply to `question`, given the grounding system
    /// prompt and the prior dialogue history.
    async fn stream_reply(
        &self,
        system: &str,
        history: &[Turn],
        question: &str,
    ) -> Result<ChunkStream>;
}

/// OpenAI-compatible chat model.
pub struct OpenAiChat {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAiChat {
    pub fn new(settings: &Settings, model: &str) -> Self {
        Self {
            client: create_client(settings),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn stream_reply(
        &self,
        system: &str,
        history: &[Turn],
        question: &str,
    ) -> Result<ChunkStream> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![system_message(system)?];

        for turn in history {
            messages.push(match turn.role {
                Role::System => system_message(&turn.content)?,
                Role::Human => user_message(&turn.content)?,
                Role::Ai => assistant_message(&turn.content)?,
            });
        }

        messages.push(user_message(question)?);

        debug!("Requesting completion with {} messages", messages.len());

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.7)
            .stream(true)
            .build()
            .map_err(|e| AskVideoError::OpenAI(format!("Failed to build request: {}", e)))?;

        let stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| AskVideoError::OpenAI(format!("Chat API error: {}", e)))?;

        let chunks = stream.map(|item| match item {
            Ok(response) => Ok(response
                .choices
                .first()
                .and_then(|c| c.delta.content.clone())
                .unwrap_or_default()),
            Err(e) => Err(AskVideoError::OpenAI(format!("Stream error: {}", e))),
        });

        Ok(Box::pin(chunks))
    }
}

fn system_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestSystemMessageArgs::default()
        .content(content)
        .build()
        .map_err(|e| AskVideoError::OpenAI(e.to_string()))?
        .into())
}

fn user_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(content)
        .build()
        .map_err(|e| AskVideoError::OpenAI(e.to_string()))?
        .into())
}

fn assistant_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestAssistantMessageArgs::default()
        .content(content)
        .build()
        .map_err(|e| AskVideoError::OpenAI(e.to_string()))?
        .into())
}
