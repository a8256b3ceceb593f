//! System prompt assembly for both conversation paths.

use crate::domain::bant::{BantAnalysis, BantFramework};

/// Instructive answer returned when no LLM credential is configured.
pub const LLM_NOT_CONFIGURED_MESSAGE: &str = "O assistente ainda não está configurado: \
defina a chave da API do modelo de linguagem (SALES_AGENT__AI__API_KEY) e reinicie o serviço.";

/// Used when the model returns no text after running tools.
pub const TOOLS_ONLY_FALLBACK_ANSWER: &str = "Pronto, já cuidei disso por aqui.";

/// Persona + stage instructions + the "already collected" block.
pub fn sales_prompt(persona: &str, framework: &BantFramework, analysis: &BantAnalysis) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(persona);
    prompt.push_str("\n\n## Etapa atual: ");
    prompt.push_str(analysis.stage.as_str());
    prompt.push('\n');
    prompt.push_str(&framework.build_prompt(analysis));

    let collected = analysis.info.collected();
    if !collected.is_empty() {
        prompt.push_str("\n\n## Informações já coletadas (não pergunte de novo)\n");
        for (signal, value) in collected {
            prompt.push_str(&format!("- {}: {}\n", signal.label(), value));
        }
        prompt.push_str(
            "Use essas informações naturalmente na conversa em vez de perguntar novamente.",
        );
    }

    prompt
}

/// Minimal operator-facing prompt: no BANT logic.
pub fn assistant_prompt(persona: &str) -> String {
    format!(
        "{}\n\nVocê está atendendo um operador interno, não um lead. \
         Seja objetivo e use as ferramentas disponíveis quando fizer sentido.",
        persona
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationTurn;

    const PERSONA: &str = "Você é Sofia, SDR da Acme.";

    #[test]
    fn sales_prompt_lists_collected_signals_once() {
        let framework = BantFramework::new();
        let history = vec![
            ConversationTurn::assistant("Isso acontece aí também?"),
            ConversationTurn::user("sim, gastamos r$5000 por mês"),
        ];
        let analysis = framework.analyze(&history);

        let prompt = sales_prompt(PERSONA, &framework, &analysis);

        assert!(prompt.starts_with(PERSONA));
        assert!(prompt.contains("## Etapa atual: authority"));
        assert!(prompt.contains("não pergunte de novo"));
        assert!(prompt.contains("- Orçamento: r$5000"));
        assert!(!prompt.contains("- Autoridade:"));
    }

    #[test]
    fn opening_prompt_has_no_collected_block() {
        let framework = BantFramework::new();
        let analysis = framework.analyze(&[ConversationTurn::user("oi")]);

        let prompt = sales_prompt(PERSONA, &framework, &analysis);

        assert!(prompt.contains("## Etapa atual: opening"));
        assert!(!prompt.contains("não pergunte de novo"));
    }

    #[test]
    fn assistant_prompt_keeps_persona() {
        assert!(assistant_prompt(PERSONA).starts_with(PERSONA));
    }
}
