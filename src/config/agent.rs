//! Agent persona configuration

use serde::Deserialize;

use crate::domain::conversation::HistoryScope;

/// Who the agent speaks as
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Name the agent introduces itself with
    #[serde(default = "default_name")]
    pub name: String,

    /// Company the agent represents
    #[serde(default = "default_company")]
    pub company: String,

    /// Extra persona instructions appended to the base prompt
    pub persona: Option<String>,

    /// Turns the BANT analysis reads: `full` (default) or `lead_only`
    #[serde(default)]
    pub history_scope: HistoryScope,
}

impl AgentConfig {
    /// Base persona prompt shared by both conversation paths.
    pub fn persona_prompt(&self) -> String {
        let mut prompt = format!(
            "Você é {}, SDR da {}. Responda em português do Brasil, \
             com mensagens curtas e naturais, uma pergunta por vez.",
            self.name, self.company
        );
        if let Some(extra) = self.persona.as_deref().filter(|p| !p.trim().is_empty()) {
            prompt.push('\n');
            prompt.push_str(extra.trim());
        }
        prompt
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            company: default_company(),
            persona: None,
            history_scope: HistoryScope::default(),
        }
    }
}

fn default_name() -> String {
    "Sofia".to_string()
}

fn default_company() -> String {
    "Acme".to_string()
}
