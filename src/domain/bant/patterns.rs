//! Pattern and phrase tables for BANT signal detection.
//!
//! All patterns run against lowercased Portuguese text. Patterns for a
//! signal are tried in the listed order; within a pattern, matches are
//! tried left to right. A candidate is discarded when any negation phrase
//! for the same signal appears inside its context window.
//!
//! Window sizes and phrase lists are behavior, not tuning knobs: changing
//! them changes which leads qualify.

/// Characters of context inspected before a candidate match.
pub const NEGATION_WINDOW_BEFORE: usize = 60;

/// Characters of context inspected after a candidate match.
pub const NEGATION_WINDOW_AFTER: usize = 40;

// ════════════════════════════════════════════════════════════════════════════════
// Budget
// ════════════════════════════════════════════════════════════════════════════════

pub const BUDGET_PATTERNS: &[&str] = &[
    r"r\$\s?\d+(?:[.,]\d+)*(?:\s?(?:mil|k)\b)?",
    r"\b\d+(?:[.,]\d+)*\s?(?:mil|k)\b(?:\s?reais)?",
    r"\b\d+(?:[.,]\d+)*\s?reais\b",
    r"\b(?:gastamos|investimos|pagamos|gasto|investimento)\b[^.!?\n]{0,30}?\d+(?:[.,]\d+)*",
    r"\b(?:temos|tenho|há|existe|reservamos|separamos)\s(?:um\s)?(?:orçamento|verba|budget)\b[^.!?\n]{0,30}",
    r"\b(?:orçamento|verba|budget)\s(?:de|é|seria|previsto|disponível|aprovado)\b[^.!?\n]{0,30}",
];

pub const BUDGET_NEGATIONS: &[&str] = &[
    "não tenho",
    "não temos",
    "sem orçamento",
    "sem verba",
    "muito caro",
    "não há orçamento",
    "não cabe no orçamento",
    "fora do orçamento",
    "não posso pagar",
    "não podemos pagar",
    "sem dinheiro",
];

// ════════════════════════════════════════════════════════════════════════════════
// Authority
// ════════════════════════════════════════════════════════════════════════════════

pub const AUTHORITY_PATTERNS: &[&str] = &[
    r"\b(?:eu\s)?sou\s(?:o\s|a\s)?(?:dono|dona|sócio|sócia|diretor|diretora|ceo|fundador|fundadora|gerente|gestor|gestora|responsável|decisor|decisora|proprietário|proprietária)\b",
    r"\b(?:quem decide|quem aprova|eu decido|eu que decido|decido eu|tomo a decisão|a decisão é minha|a decisão fica com)\b[^.!?\n]{0,40}",
    r"\b(?:meu|minha|o|a|nosso|nossa)\s(?:sócio|sócia|diretor|diretora|ceo|chefe|dono|dona)\b",
];

pub const AUTHORITY_NEGATIONS: &[&str] = &[
    "não sou",
    "preciso consultar",
    "não decido",
    "não sou eu",
    "não tenho autonomia",
    "tenho que falar com",
    "preciso falar com",
    "não cabe a mim",
    "não depende de mim",
];

// ════════════════════════════════════════════════════════════════════════════════
// Need
// ════════════════════════════════════════════════════════════════════════════════

pub const NEED_PATTERNS: &[&str] = &[
    r"\b(?:estamos|estou|estão)\sperdendo\b[^.!?\n]{0,50}",
    r"\bperdendo\s(?:leads|clientes|vendas|dinheiro|tempo|oportunidades)\b[^.!?\n]{0,40}",
    r"\b(?:nosso|meu|o)\s(?:maior\s|principal\s)?(?:problema|desafio|gargalo|dificuldade)\b[^.!?\n]{0,60}",
    r"\b(?:temos|tenho|enfrentamos)\s(?:um\s|uma\s|muito\s|muita\s|muitos\s|muitas\s)?(?:problemas?|dificuldades?|desafios?|gargalos?)\b[^.!?\n]{0,60}",
    r"\b(?:precisamos|preciso|queremos|quero|gostaríamos de)\s(?:melhorar|aumentar|reduzir|resolver|automatizar|organizar|escalar)\b[^.!?\n]{0,60}",
    r"\b(?:demoramos|demoro|não conseguimos|não consigo)\s(?:responder|atender|acompanhar)\b[^.!?\n]{0,50}",
];

pub const NEED_NEGATIONS: &[&str] = &[
    "não tenho problema",
    "não temos problema",
    "está tudo bem",
    "tá tudo bem",
    "tudo certo",
    "sem problemas",
    "funciona bem",
    "não preciso",
    "não precisamos",
    "estamos satisfeitos",
];

// ════════════════════════════════════════════════════════════════════════════════
// Timing
// ════════════════════════════════════════════════════════════════════════════════

pub const TIMING_PATTERNS: &[&str] = &[
    r"\b(?:urgente|urgência|o quanto antes|o mais rápido possível|imediatamente|pra ontem|para ontem|agora mesmo)\b",
    r"\b(?:este|esse|neste|nesse|próximo|até o fim do|até o final do)\s(?:mês|trimestre|semestre|ano)\b",
    r"\b(?:em|dentro de|nos próximos|até)\s\d+\s(?:dias?|semanas?|meses|mês)\b",
    r"\b(?:prazo|deadline)\b[^.!?\n]{0,40}",
    r"\bano que vem\b",
];

pub const TIMING_NEGATIONS: &[&str] = &[
    "sem pressa",
    "talvez ano que vem",
    "não tenho pressa",
    "não temos pressa",
    "não é urgente",
    "não é prioridade",
    "mais pra frente",
    "sem prazo",
    "não há prazo",
    "não tem prazo",
];

// ════════════════════════════════════════════════════════════════════════════════
// Stage detection
// ════════════════════════════════════════════════════════════════════════════════

/// Phrases showing the lead accepted the opening hook.
///
/// Matched as plain substrings of the scanned history text.
pub const AFFIRMATIVE_PHRASES: &[&str] = &["sim", "faz sentido", "interessante", "me interessa", "quero"];

/// Minimum number of turns (any role) before the opening can be complete.
pub const MIN_TURNS_FOR_OPENING: usize = 2;

// ════════════════════════════════════════════════════════════════════════════════
// Scoring
// ════════════════════════════════════════════════════════════════════════════════

pub const BUDGET_WEIGHT: u32 = 30;
pub const AUTHORITY_WEIGHT: u32 = 25;
pub const NEED_WEIGHT: u32 = 30;
pub const TIMING_WEIGHT: u32 = 15;

/// Bonus for a high-confidence sub-pattern inside a signal value.
pub const CONFIDENCE_BONUS: u32 = 5;

/// A budget value carrying a number or currency marker earns the bonus.
pub const BUDGET_NUMERIC_PATTERN: &str = r"r\$|\d";

pub const DECISION_MAKER_KEYWORDS: &[&str] = &["decisor", "dono", "diretor"];

/// A need description longer than this (in characters) earns the bonus.
pub const NEED_DETAIL_MIN_CHARS: usize = 50;

pub const URGENCY_KEYWORDS: &[&str] = &["urgente", "agora", "logo"];

pub const MAX_SCORE: u32 = 100;
