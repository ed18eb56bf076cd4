use crate::transcript::{Content, Role, normalize};
use anyhow::Result;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tracing::debug;

/// Represents the events that can be yielded from a streaming text response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LLMStreamEvent {
    TextChunk(String),
}

/// A finite stream of reply fragments. Dropping it early releases the
/// underlying response.
pub type LLMStream = Pin<Box<dyn Stream<Item = Result<LLMStreamEvent>> + Send>>;

/// A conversation context: the persistent instruction plus the normalized
/// history the next request continues from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    instruction: String,
    history: Vec<Content>,
}

impl ChatContext {
    /// Opens a fresh context. Every history entry is normalized on the way in.
    pub fn start(instruction: impl Into<String>, history: Vec<Content>) -> Self {
        Self {
            instruction: instruction.into(),
            history: normalize(history),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Builds the structured request: instruction as the system message, the
    /// history in order, then `message` as the newest user turn.
    pub fn to_request_messages(&self, message: &Content) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.instruction.clone())
                .build()?
                .into(),
        ];
        for content in self.history.iter().chain(std::iter::once(message)) {
            match content.role {
                Role::User => messages.push(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(content.text())
                        .build()?
                        .into(),
                ),
                Role::Model => messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(content.text())
                        .build()?
                        .into(),
                ),
            }
        }
        Ok(messages)
    }
}

/// The generative dialogue capability the interview depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueService: Send + Sync {
    /// Submits `message` to the given context and streams back the reply.
    async fn send_message_stream(&self, chat: ChatContext, message: Content) -> Result<LLMStream>;
}

/// Accumulates the fragments of one in-flight reply.
#[derive(Debug, Default)]
pub struct StreamedReply {
    text: String,
    fragments: usize,
}

impl StreamedReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.fragments += 1;
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Drains `stream` in arrival order until it closes. The first failed item
    /// aborts the drain and the partial reply is dropped.
    pub async fn collect(mut stream: LLMStream) -> Result<Self> {
        let mut reply = Self::new();
        while let Some(event) = stream.next().await {
            let LLMStreamEvent::TextChunk(chunk) = event?;
            reply.push(&chunk);
        }
        Ok(reply)
    }

    /// The finished reply, trimmed of surrounding whitespace.
    pub fn finish(self) -> String {
        self.text.trim().to_string()
    }
}

/// An implementation of `DialogueService` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gemini-2.0-flash").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl DialogueService for OpenAICompatibleClient {
    async fn send_message_stream(&self, chat: ChatContext, message: Content) -> Result<LLMStream> {
        let messages = chat.to_request_messages(&message.normalized())?;
        debug!(model = %self.model, messages = messages.len(), "Submitting streamed chat request");

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .stream(true)
            .build()?;

        let stream = self.client.chat().create_stream(request).await?;

        Ok(Box::pin(stream.filter_map(|result| async {
            match result {
                Ok(response) => response
                    .choices
                    .first()
                    .and_then(|choice| choice.delta.content.clone())
                    .filter(|content| !content.is_empty())
                    .map(|content| Ok(LLMStreamEvent::TextChunk(content))),
                Err(e) => Some(Err(anyhow::Error::from(e))),
            }
        })))
    }
}
