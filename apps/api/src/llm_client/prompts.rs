// Shared prompt fragments. Each service that needs completion calls defines
// its own prompts.rs alongside it; this file only holds cross-cutting pieces.

/// Appended to every system directive so replies are bare JSON objects.
pub const JSON_ONLY_EN: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

pub const JSON_ONLY_FR: &str = "Tu DOIS répondre uniquement avec un objet JSON valide. \
    N'ajoute AUCUN texte en dehors de l'objet JSON. \
    N'utilise PAS de blocs de code markdown. \
    N'ajoute ni explication ni excuse.";
