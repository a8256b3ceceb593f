//! Stage instruction templates for the LLM.
//!
//! One fixed template per [`Stage`]. Templates are content, not logic: the
//! builder only substitutes collected BANT values into placeholders.

use super::signal::{BantInfo, BantSignal};
use super::stage::Stage;

/// Rendered in place of a signal that has not been collected yet.
pub const NOT_INFORMED: &str = "(não informado)";

/// Static instructions for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTemplate {
    pub stage: Stage,
    pub objective: &'static str,
    /// Instruction text. May contain `{budget}`, `{authority}`, `{need}`
    /// and `{timing}` placeholders.
    pub instruction_prompt: &'static str,
    /// Phrases in a lead reply suggesting the stage goal was met.
    pub completion_signal_phrases: &'static [&'static str],
    /// Phrases the agent must never use in this stage.
    pub blocked_signal_phrases: &'static [&'static str],
}

pub static STAGE_TEMPLATES: [StageTemplate; 6] = [
    StageTemplate {
        stage: Stage::Opening,
        objective: "Criar rapport e despertar curiosidade, sem apresentar o produto.",
        instruction_prompt: "ETAPA ATUAL: ABERTURA\n\
            Objetivo: criar rapport e despertar interesse genuíno.\n\
            - Cumprimente de forma calorosa e pessoal.\n\
            - Cite uma dor comum do mercado do lead, por exemplo: \
            \"Muitas empresas perdem clientes porque demoram para responder fora do horário comercial.\"\n\
            - Termine com uma pergunta de curiosidade, por exemplo: \"Isso acontece aí também?\"\n\
            PROIBIDO: apresentar o produto, falar de preço ou propor reunião nesta etapa.",
        completion_signal_phrases: &["sim", "faz sentido", "interessante", "me interessa", "quero"],
        blocked_signal_phrases: &["reunião", "agendar", "preço", "nosso produto", "plano"],
    },
    StageTemplate {
        stage: Stage::Budget,
        objective: "Descobrir quanto o lead investe hoje no problema.",
        instruction_prompt: "ETAPA ATUAL: ORÇAMENTO\n\
            Objetivo: entender quanto a empresa investe hoje para lidar com o problema.\n\
            - Pergunte de forma natural, por exemplo: \
            \"Hoje, quanto vocês investem por mês com atendimento e vendas?\"\n\
            - Trate custo como investimento: fale em retorno, não em gasto.\n\
            - Se o lead hesitar, ofereça faixas aproximadas em vez de exigir um número exato.\n\
            PROIBIDO: informar preços, planos ou descontos.",
        completion_signal_phrases: &["r$", "mil", "reais", "investimos", "gastamos"],
        blocked_signal_phrases: &["nosso preço", "custa r$", "plano de", "desconto"],
    },
    StageTemplate {
        stage: Stage::Authority,
        objective: "Entender quem participa da decisão.",
        instruction_prompt: "ETAPA ATUAL: AUTORIDADE\n\
            Objetivo: entender quem participa da decisão de compra.\n\
            Orçamento já informado: {budget}\n\
            - Pergunte, por exemplo: \"Além de você, quem mais participa dessa decisão?\"\n\
            - Justifique: a ideia é garantir que as pessoas certas estejam na conversa.\n\
            PROIBIDO: perguntar de forma que sugira que o lead não tem poder de decisão.",
        completion_signal_phrases: &["sou o dono", "eu decido", "quem decide", "diretor", "sócio"],
        blocked_signal_phrases: &["você não decide", "seu chefe", "quem manda"],
    },
    StageTemplate {
        stage: Stage::Need,
        objective: "Descobrir e reafirmar a principal dor do lead.",
        instruction_prompt: "ETAPA ATUAL: NECESSIDADE\n\
            Objetivo: descobrir a principal dor do lead.\n\
            Orçamento: {budget}\n\
            Decisão: {authority}\n\
            - Ofereça de 2 a 3 opções concretas para o lead escolher, por exemplo: \
            \"O que pesa mais hoje: (a) demora para responder, (b) leads perdidos fora do horário \
            ou (c) equipe sobrecarregada?\"\n\
            - Repita com as palavras do lead a dor escolhida.\n\
            - Conecte essa dor a uma capacidade concreta da solução.\n\
            PROIBIDO: listar funcionalidades antes de o lead escolher uma dor.",
        completion_signal_phrases: &["problema", "perdendo", "dificuldade", "desafio", "precisamos"],
        blocked_signal_phrases: &["todas as funcionalidades", "nosso sistema faz tudo"],
    },
    StageTemplate {
        stage: Stage::Timing,
        objective: "Descobrir em quanto tempo o lead quer resolver o problema.",
        instruction_prompt: "ETAPA ATUAL: PRAZO\n\
            Objetivo: entender em quanto tempo o lead quer resolver a dor.\n\
            Orçamento: {budget}\n\
            Decisão: {authority}\n\
            Dor: {need}\n\
            - Pergunte, por exemplo: \"Em quanto tempo vocês gostariam de ver isso resolvido?\"\n\
            - Mostre a urgência com leveza: quem se move primeiro colhe mais resultados.\n\
            PROIBIDO: pressionar, criar escassez falsa ou impor prazos.",
        completion_signal_phrases: &["urgente", "este mês", "próximo mês", "dias", "prazo"],
        blocked_signal_phrases: &["última chance", "só hoje", "oferta expira"],
    },
    StageTemplate {
        stage: Stage::Closing,
        objective: "Recapitular os quatro fatos e propor uma conversa curta.",
        instruction_prompt: "ETAPA ATUAL: FECHAMENTO\n\
            Objetivo: recapitular o que o lead contou e propor uma reunião curta.\n\
            Recapitule exatamente, com as palavras do lead:\n\
            - Orçamento: {budget}\n\
            - Decisão: {authority}\n\
            - Dor: {need}\n\
            - Prazo: {timing}\n\
            - Proponha, como convite leve, uma conversa de 20 minutos, por exemplo: \
            \"Faz sentido a gente marcar 20 minutos para eu te mostrar como resolver isso?\"\n\
            PROIBIDO: fechamento agressivo, pressão ou exigir uma resposta imediata.",
        completion_signal_phrases: &["pode ser", "vamos marcar", "agenda", "combinado", "fechado"],
        blocked_signal_phrases: &["assine agora", "última chance", "só hoje"],
    },
];

/// Returns the template for a stage.
pub fn stage_template(stage: Stage) -> &'static StageTemplate {
    let index = Stage::ALL.iter().position(|s| *s == stage).unwrap_or(0);
    &STAGE_TEMPLATES[index]
}

/// Renders stage templates with collected signal values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StagePromptBuilder;

impl StagePromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Renders the instruction prompt for `stage`.
    ///
    /// Placeholders are replaced verbatim by the collected values, or by
    /// [`NOT_INFORMED`] when a signal is missing. Rendering is a single pass
    /// over the template, so braces inside a lead's words stay literal. The
    /// blocked phrases are appended so the model knows what to avoid.
    pub fn build(&self, stage: Stage, info: &BantInfo) -> String {
        let template = stage_template(stage);
        let mut rest = template.instruction_prompt;
        let mut prompt = String::with_capacity(rest.len());

        while let Some(open) = rest.find('{') {
            prompt.push_str(&rest[..open]);
            let tail = &rest[open..];
            let placeholder = BantSignal::ORDER.iter().find_map(|&signal| {
                let token = format!("{{{}}}", signal);
                tail.starts_with(&token).then_some((signal, token.len()))
            });
            match placeholder {
                Some((signal, len)) => {
                    prompt.push_str(info.get(signal).unwrap_or(NOT_INFORMED));
                    rest = &tail[len..];
                }
                None => {
                    prompt.push('{');
                    rest = &tail[1..];
                }
            }
        }
        prompt.push_str(rest);

        if !template.blocked_signal_phrases.is_empty() {
            prompt.push_str("\nEvite estas expressões: ");
            prompt.push_str(&template.blocked_signal_phrases.join(", "));
            prompt.push('.');
        }

        prompt
    }
}
