// Résumé extraction prompt templates, one pair per supported language.
// `{text}` is replaced with the normalized document text.

pub const EXTRACT_SYSTEM_EN: &str = "\
You are a precise résumé data extractor. \
Read the résumé text you are given and return its content as structured JSON. \
Copy facts as written; never invent employers, dates, degrees or skills. \
Leave a field as an empty string when the résumé does not state it.";

pub const EXTRACT_SYSTEM_FR: &str = "\
Tu es un extracteur précis de données de CV. \
Lis le texte du CV fourni et renvoie son contenu sous forme de JSON structuré. \
Recopie les faits tels qu'écrits ; n'invente jamais d'employeur, de date, de diplôme ni de compétence. \
Laisse un champ vide (chaîne vide) quand le CV ne le précise pas.";

pub const EXTRACT_PROMPT_EN: &str = r#"Extract the structured data from the following résumé.

RÉSUMÉ TEXT:
{text}

OUTPUT SCHEMA (return exactly this structure):
{
  "personalInfo": {"firstName": "string", "lastName": "string", "email": "string", "phone": "string", "address": "string", "summary": "string"},
  "workExperience": [{"position": "string", "company": "string", "startDate": "string", "endDate": "string", "current": boolean, "description": "string"}],
  "education": [{"school": "string", "degree": "string", "field": "string", "startDate": "string", "endDate": "string", "current": boolean, "description": "string"}],
  "skills": {"technical": [{"name": "string", "level": "beginner" | "intermediate" | "advanced" | "expert"}], "soft": [{"name": "string", "level": "string"}], "tools": [{"name": "string", "level": "string"}]},
  "projects": [{"name": "string", "description": "string", "technologies": ["string"], "startDate": "string", "endDate": "string", "link": "string"}]
}

RULES:
1. "current" is true only when the résumé says the position or course is ongoing (present, current, now).
2. Keep dates as written in the résumé (e.g. "Jan 2020", "2019").
3. Every skill goes under exactly one of "technical", "soft" or "tools".
4. Return ONLY the JSON object."#;

pub const EXTRACT_PROMPT_FR: &str = r#"Extrais les données structurées du CV suivant.

TEXTE DU CV :
{text}

SCHÉMA DE SORTIE (renvoie exactement cette structure, clés en anglais) :
{
  "personalInfo": {"firstName": "string", "lastName": "string", "email": "string", "phone": "string", "address": "string", "summary": "string"},
  "workExperience": [{"position": "string", "company": "string", "startDate": "string", "endDate": "string", "current": boolean, "description": "string"}],
  "education": [{"school": "string", "degree": "string", "field": "string", "startDate": "string", "endDate": "string", "current": boolean, "description": "string"}],
  "skills": {"technical": [{"name": "string", "level": "beginner" | "intermediate" | "advanced" | "expert"}], "soft": [{"name": "string", "level": "string"}], "tools": [{"name": "string", "level": "string"}]},
  "projects": [{"name": "string", "description": "string", "technologies": ["string"], "startDate": "string", "endDate": "string", "link": "string"}]
}

RÈGLES :
1. "current" vaut true uniquement si le CV indique que le poste ou la formation est en cours (présent, en cours, actuel).
2. Conserve les dates telles qu'écrites dans le CV (ex. "janvier 2020", "2019").
3. Chaque compétence va dans une seule catégorie : "technical", "soft" ou "tools".
4. Renvoie UNIQUEMENT l'objet JSON."#;
