/// Collapses raw answer text into its comparable form.
///
/// Strips every whitespace character plus the periods and commas a dictation
/// engine likes to insert, then lowercases the rest. Voice transcripts and
/// typed input go through this same function, and targets are normalized
/// with it before comparison, so `"R o c k e t."` and `"rocket"` meet in the
/// middle.
///
/// Idempotent: normalizing an already-normalized string is a no-op.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != ',')
        .flat_map(char::to_lowercase)
        .collect()
}
