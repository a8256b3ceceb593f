//! ProcessTurn command handler.
//!
//! Runs one conversational turn end to end: classify the channel, analyze
//! the history with the BANT framework, call the LLM (with tools), and
//! persist the recomputed per-contact state.
//!
//! Only the LLM call itself can fail a turn. Tool failures are fed back to
//! the model, and state-store failures are logged and swallowed so a reply
//! is always delivered.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::contact_locks::ContactLocks;
use crate::application::prompt::{
    assistant_prompt, sales_prompt, LLM_NOT_CONFIGURED_MESSAGE, TOOLS_ONLY_FALLBACK_ANSWER,
};
use crate::domain::bant::{
    stage_template, ActionTag, BantAnalysis, BantFramework, QualificationTier, Stage,
};
use crate::domain::conversation::{
    ChannelKind, ConversationPath, ConversationTurn, EnhancedState, HistoryScope, ResponseMode,
    TurnFacts,
};
use crate::domain::foundation::{ContactId, RequestId, Timestamp, ValidationError};
use crate::domain::tools::ToolRegistry;
use crate::ports::{
    AIError, CompletionRequest, CompletionResponse, LlmProvider, Message, RequestMetadata,
    ResponseCache, StateStore,
};

/// Command to process one inbound message.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    /// The new message.
    pub text: String,
    /// Prior turns, oldest first, not including `text`.
    pub history: Vec<ConversationTurn>,
    pub channel: ChannelKind,
    /// Required on the sales path; state is keyed by it.
    pub contact_id: Option<String>,
}

impl ProcessTurnCommand {
    pub fn new(text: impl Into<String>, channel: ChannelKind) -> Self {
        Self {
            text: text.into(),
            history: Vec::new(),
            channel,
            contact_id: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_contact(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }
}

/// Result of a turn, returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub answer: String,
    /// `None` on the assistant path.
    pub stage: Option<Stage>,
    pub qualification_score: Option<u8>,
    pub qualification_tier: Option<QualificationTier>,
    /// `None` on the assistant path and during opening.
    pub next_action: Option<ActionTag>,
    /// Names of the tools run this turn, in call order.
    pub tools_used: Vec<String>,
}

impl TurnOutcome {
    fn unconfigured() -> Self {
        Self {
            answer: LLM_NOT_CONFIGURED_MESSAGE.to_string(),
            stage: None,
            qualification_score: None,
            qualification_tier: None,
            next_action: None,
            tools_used: Vec::new(),
        }
    }
}

/// Errors that fail a turn.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    #[error("Validation error: message text cannot be empty")]
    EmptyMessage,

    #[error("Validation error: contact id is required on the sales path")]
    MissingContact,

    #[error("Validation error: {0}")]
    InvalidContact(#[from] ValidationError),

    #[error("LLM completion failed: {0}")]
    Completion(#[from] AIError),

    #[error("LLM completion timed out after {0:?}")]
    Timeout(Duration),
}

/// What the LLM step produced.
struct Completion {
    answer: String,
    tools_used: Vec<String>,
}

/// Handler for ProcessTurn commands.
pub struct ProcessTurnHandler {
    /// `None` when no credential is configured.
    provider: Option<Arc<dyn LlmProvider>>,
    state_store: Arc<dyn StateStore>,
    tools: Arc<ToolRegistry>,
    cache: Arc<dyn ResponseCache>,
    framework: BantFramework,
    locks: ContactLocks,
    persona: String,
    completion_timeout: Duration,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ProcessTurnHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        state_store: Arc<dyn StateStore>,
        tools: Arc<ToolRegistry>,
        cache: Arc<dyn ResponseCache>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            state_store,
            tools,
            cache,
            framework: BantFramework::new(),
            locks: ContactLocks::new(),
            persona: persona.into(),
            completion_timeout: Duration::from_secs(120),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Upper bound on one LLM completion, retries included.
    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    /// Which turns the BANT analysis reads; every turn by default.
    pub fn with_history_scope(mut self, scope: HistoryScope) -> Self {
        self.framework = BantFramework::with_scope(scope);
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = Some(temperature);
        self.max_tokens = Some(max_tokens);
        self
    }

    /// False when turns will only get the "not configured" answer.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Handles a process turn command.
    pub async fn handle(&self, cmd: ProcessTurnCommand) -> Result<TurnOutcome, TurnError> {
        let text = cmd.text.trim();
        if text.is_empty() {
            return Err(TurnError::EmptyMessage);
        }

        let path = cmd.channel.path();
        let contact = match (path, cmd.contact_id.as_deref()) {
            (ConversationPath::Sales, None) => return Err(TurnError::MissingContact),
            (_, Some(id)) => Some(ContactId::new(id)?),
            (ConversationPath::Assistant, None) => None,
        };

        let Some(provider) = self.provider.as_deref() else {
            warn!(channel = %cmd.channel, "LLM provider not configured");
            return Ok(TurnOutcome::unconfigured());
        };

        let mut turns = cmd.history;
        turns.push(ConversationTurn::user(text));

        match (path, contact) {
            (ConversationPath::Sales, Some(contact)) => {
                self.sales_turn(provider, &contact, &turns).await
            }
            (_, contact) => self.assistant_turn(provider, contact, &turns).await,
        }
    }

    async fn sales_turn(
        &self,
        provider: &dyn LlmProvider,
        contact: &ContactId,
        turns: &[ConversationTurn],
    ) -> Result<TurnOutcome, TurnError> {
        let _turn = self.locks.acquire(contact).await;

        let previous = match self.state_store.get(contact).await {
            Ok(state) => state,
            Err(e) => {
                warn!(contact_id = %contact, error = %e, "Failed to load state, starting fresh");
                None
            }
        };

        let analysis = self.framework.analyze(turns);
        debug!(
            contact_id = %contact,
            stage = %analysis.stage,
            score = analysis.score,
            completeness = analysis.completeness.count(),
            "Analyzed conversation"
        );

        let system_prompt = sales_prompt(&self.persona, &self.framework, &analysis);
        let request = self
            .request(Some(contact.clone()), system_prompt, turns)
            .with_tools(self.tool_definitions(ConversationPath::Sales));

        let completion = self
            .complete_with_tools(provider, request, ConversationPath::Sales)
            .await?;
        warn_on_blocked_phrases(contact, &analysis, &completion.answer);

        let response_mode = if completion.tools_used.is_empty() {
            ResponseMode::Text
        } else {
            ResponseMode::ToolAssisted
        };
        let state = EnhancedState::record_turn(
            previous.as_ref(),
            &analysis,
            TurnFacts {
                lead_message: turns.last().map(|t| t.content.as_str()).unwrap_or_default(),
                message_count: u32::try_from(turns.len() + 1).unwrap_or(u32::MAX),
                response_mode,
                at: Timestamp::now(),
            },
        );

        if let Err(e) = self.state_store.set(contact, &state).await {
            warn!(contact_id = %contact, error = %e, "Failed to persist state");
        }

        info!(
            contact_id = %contact,
            stage = %analysis.stage,
            score = analysis.score,
            tier = ?analysis.tier(),
            next_action = ?analysis.next_action,
            tools = completion.tools_used.len(),
            "Sales turn completed"
        );

        Ok(TurnOutcome {
            answer: completion.answer,
            stage: Some(analysis.stage),
            qualification_score: Some(analysis.score),
            qualification_tier: Some(analysis.tier()),
            next_action: analysis.next_action,
            tools_used: completion.tools_used,
        })
    }

    async fn assistant_turn(
        &self,
        provider: &dyn LlmProvider,
        contact: Option<ContactId>,
        turns: &[ConversationTurn],
    ) -> Result<TurnOutcome, TurnError> {
        let text = turns.last().map(|t| t.content.as_str()).unwrap_or_default();

        if let Some(answer) = self.cache.lookup(text).await {
            debug!("Assistant answer served from cache");
            return Ok(TurnOutcome {
                answer,
                stage: None,
                qualification_score: None,
                qualification_tier: None,
                next_action: None,
                tools_used: Vec::new(),
            });
        }

        let request = self
            .request(contact, assistant_prompt(&self.persona), turns)
            .with_tools(self.tool_definitions(ConversationPath::Assistant));
        let completion = self
            .complete_with_tools(provider, request, ConversationPath::Assistant)
            .await?;

        // Tool answers reflect side effects and must not be replayed.
        if completion.tools_used.is_empty() {
            self.cache.store(text, &completion.answer).await;
        }

        info!(tools = completion.tools_used.len(), "Assistant turn completed");

        Ok(TurnOutcome {
            answer: completion.answer,
            stage: None,
            qualification_score: None,
            qualification_tier: None,
            next_action: None,
            tools_used: completion.tools_used,
        })
    }

    fn request(
        &self,
        contact: Option<ContactId>,
        system_prompt: String,
        turns: &[ConversationTurn],
    ) -> CompletionRequest {
        let mut request = CompletionRequest::new(RequestMetadata::new(RequestId::new(), contact))
            .with_system_prompt(system_prompt)
            .with_history(turns);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }

    fn tool_definitions(&self, path: ConversationPath) -> Vec<crate::domain::tools::ToolDefinition> {
        self.tools.tools_for(path).into_iter().cloned().collect()
    }

    /// Calls the LLM; if it asks for tools, runs them and makes one
    /// follow-up completion with the results.
    async fn complete_with_tools(
        &self,
        provider: &dyn LlmProvider,
        request: CompletionRequest,
        path: ConversationPath,
    ) -> Result<Completion, TurnError> {
        let first = self.complete(provider, request.clone()).await?;
        if !first.has_tool_calls() {
            return Ok(Completion {
                answer: first.content,
                tools_used: Vec::new(),
            });
        }

        let mut follow_up = request.with_message(Message::assistant_tool_calls(
            first.content.clone(),
            first.tool_calls.clone(),
        ));
        let mut tools_used = Vec::with_capacity(first.tool_calls.len());
        for call in &first.tool_calls {
            let response = self.tools.dispatch(call, path).await;
            debug!(tool = %call.name, success = response.success, "Tool call finished");
            tools_used.push(call.name.clone());
            follow_up = follow_up.with_message(Message::tool_result(&response));
        }

        let second = self.complete(provider, follow_up).await?;
        if second.has_tool_calls() {
            warn!(
                requested = second.tool_calls.len(),
                "Ignoring tool calls requested in follow-up completion"
            );
        }

        let answer = if second.content.trim().is_empty() {
            TOOLS_ONLY_FALLBACK_ANSWER.to_string()
        } else {
            second.content
        };

        Ok(Completion { answer, tools_used })
    }

    async fn complete(
        &self,
        provider: &dyn LlmProvider,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, TurnError> {
        match tokio::time::timeout(self.completion_timeout, provider.complete(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                warn!(provider = %provider.provider_info().name, error = %e, "LLM completion failed");
                Err(TurnError::Completion(e))
            }
            Err(_) => {
                warn!(timeout = ?self.completion_timeout, "LLM completion timed out");
                Err(TurnError::Timeout(self.completion_timeout))
            }
        }
    }
}

fn warn_on_blocked_phrases(contact: &ContactId, analysis: &BantAnalysis, answer: &str) {
    let answer = answer.to_lowercase();
    for phrase in stage_template(analysis.stage).blocked_signal_phrases {
        if answer.contains(&phrase.to_lowercase()) {
            warn!(
                contact_id = %contact,
                stage = %analysis.stage,
                phrase = %phrase,
                "Answer contains a phrase blocked for this stage"
            );
        }
    }
}
