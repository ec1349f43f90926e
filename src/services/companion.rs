//! Chat turn handling: crisis shortcut, one completion attempt, canned
//! fallback, then the chat log write.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::db::WellbeingStore;
use crate::error::{AppError, AppResult};
use crate::models::chat::NewChatTurn;
use crate::services::completion::CompletionClient;
use crate::services::{crisis, fallback};

pub const SYSTEM_PROMPT: &str = r#"You are MindMate, a compassionate mental wellbeing companion designed to support young adults.

Core Principles:
- Respond with empathy, kindness, and genuine care
- Offer practical coping strategies and emotional support
- Never provide medical advice or diagnose conditions
- If someone mentions crisis, self-harm, or suicidal thoughts, immediately suggest emergency resources
- Keep responses warm, supportive, and age-appropriate for young adults
- Encourage healthy habits like journaling, breathing exercises, and self-care

Emergency Resources to Share When Needed:
- Crisis Text Line: Text HOME to 741741
- National Suicide Prevention Lifeline: 988
- International Association for Suicide Prevention: https://www.iasp.info/resources/Crisis_Centres/

Your responses should be:
- Supportive and validating
- 2-3 short paragraphs maximum
- Include actionable suggestions when appropriate
- Encourage the user's strengths and resilience"#;

/// Used when the completion service answers with blank text.
pub const EMPTY_COMPLETION_REPLY: &str = "I'm here to listen. Please tell me more.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationResult {
    pub reply: String,
    pub conversation_id: String,
    pub is_crisis: bool,
}

#[derive(Clone)]
pub struct Companion {
    completion: Arc<dyn CompletionClient>,
    store: WellbeingStore,
}

impl Companion {
    pub fn new(completion: Arc<dyn CompletionClient>, store: WellbeingStore) -> Self {
        Self { completion, store }
    }

    pub async fn handle(
        &self,
        message: &str,
        conversation_id: Option<String>,
    ) -> AppResult<ConversationResult> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::InvalidInput("Message cannot be empty".into()));
        }

        let conversation_id = conversation_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let is_crisis = crisis::classify(message);
        let reply = if is_crisis {
            tracing::info!(conversation_id = %conversation_id, "Crisis language detected, sending emergency resources");
            crisis::CRISIS_REPLY.to_string()
        } else {
            self.generate_reply(message, &conversation_id).await
        };

        let turn = NewChatTurn {
            user_message: message.to_string(),
            ai_response: reply.clone(),
            conversation_id: conversation_id.clone(),
            is_crisis,
        };
        if let Err(e) = self.store.log_chat_turn(&turn).await {
            tracing::error!(error = %e, conversation_id = %conversation_id, "Failed to log chat turn");
        }

        Ok(ConversationResult {
            reply,
            conversation_id,
            is_crisis,
        })
    }

    async fn generate_reply(&self, message: &str, conversation_id: &str) -> String {
        match self.completion.complete(SYSTEM_PROMPT, message).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    EMPTY_COMPLETION_REPLY.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, conversation_id = %conversation_id, "Completion unavailable, using fallback reply");
                fallback::fallback(message).to_string()
            }
        }
    }
}
