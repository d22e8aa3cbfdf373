//! Maps free-text role labels onto canonical position names.

/// Known role labels (lowercase) and the canonical name each maps to.
///
/// Aliases that should collapse onto an existing category, such as
/// platform-specific mobile roles, live here too.
pub const SYNONYMS: &[(&str, &str)] = &[
    ("frontend engineer", "Frontend Engineer"),
    ("backend engineer", "Backend Engineer"),
    ("fullstack engineer", "Fullstack Engineer"),
    ("mobile engineer", "Mobile Engineer"),
    ("infrastructure engineer", "Infrastructure Engineer"),
    ("devops engineer", "DevOps Engineer"),
    ("cloud engineer", "Cloud Engineer"),
    ("data engineer", "Data Engineer"),
    ("ai/ml engineer", "AI/ML Engineer"),
    ("security engineer", "Security Engineer"),
    ("qa engineer", "QA Engineer"),
    ("game engineer", "Game Engineer"),
    ("graphics engineer", "Graphics Engineer"),
    ("database engineer", "Database Engineer"),
    ("solutions architect", "Solutions Architect"),
    ("android developer", "Mobile Engineer"),
    ("ios developer", "Mobile Engineer"),
    ("ruby developer", "Backend Engineer"),
    ("python developer", "Backend Engineer"),
];

/// Looks up a lowercase label in [`SYNONYMS`].
pub fn lookup(lowercase: &str) -> Option<&'static str> {
    SYNONYMS
        .iter()
        .find(|(label, _)| *label == lowercase)
        .map(|(_, canonical)| *canonical)
}

/// Canonicalizes a raw role label.
///
/// 1. exact synonym match on the lowercased label
/// 2. synonym match after rewriting "developer" to "engineer"
/// 3. title-case of the rewritten label
///
/// Total and deterministic. Unseen synonyms produce new canonical names
/// rather than being merged, so "Rust Developer" becomes "Rust Engineer".
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if let Some(canonical) = lookup(&lower) {
        return canonical.to_string();
    }

    let rewritten = lower.replace("developer", "engineer");
    if let Some(canonical) = lookup(&rewritten) {
        return canonical.to_string();
    }

    title_case(&rewritten)
}

/// Uppercases the first character of every whitespace-separated word and
/// joins the words with single spaces.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
