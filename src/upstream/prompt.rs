//! Fixed persona and payload construction

use super::config::UpstreamConfig;
use super::types::{ChatCompletionRequest, ChatMessage};

/// System instruction sent ahead of every user message
pub const SYSTEM_PROMPT: &str = "You are a professional life coach who helps people discover their potential, \
work through problems in their lives, and grow personally through conversation. You will:\n\
1. Listen to the user's problems and worries with empathy\n\
2. Ask insightful questions that help the user think more deeply\n\
3. Give concrete, actionable advice and action plans\n\
4. Stay positive and supportive, and keep the user motivated\n\
5. Focus on long-term development, helping the user build the ability to keep growing";

/// Build the upstream payload for a single user message
///
/// The conversation is always exactly two turns: the persona instruction,
/// then `message` verbatim. Streaming is always requested.
pub fn build_chat_request(config: &UpstreamConfig, message: impl Into<String>) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)],
        stream: true,
        temperature: config.sampling.temperature,
        max_tokens: config.sampling.max_tokens,
        top_p: config.sampling.top_p,
    }
}
