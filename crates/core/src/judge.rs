use crate::model::WordEntry;
use crate::normalize::normalize_answer;

/// Verdict for a submitted spelling. There is no error case: every input
/// resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    Correct,
    Wrong,
}

impl Judgment {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Judgment::Correct)
    }
}

/// Compares a raw submission against the target word.
///
/// The submission is correct when its normalized form equals the normalized
/// word text, or the normalized alternate spelling when the entry carries
/// one. Plain equality only, no edit-distance tolerance.
#[must_use]
pub fn judge(raw_input: &str, entry: &WordEntry) -> Judgment {
    let input = normalize_answer(raw_input);
    if input == normalize_answer(entry.word()) {
        return Judgment::Correct;
    }
    if entry
        .alternate()
        .is_some_and(|alt| input == normalize_answer(alt))
    {
        return Judgment::Correct;
    }
    Judgment::Wrong
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn word(text: &str, alternate: Option<&str>) -> WordEntry {
        WordEntry::new(
            text,
            "",
            "",
            "",
            "",
            "noun",
            Difficulty::TwoBee,
            alternate.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn judging_is_case_insensitive() {
        let rocket = word("Rocket", None);
        assert_eq!(judge("rocket", &rocket), Judgment::Correct);
        assert_eq!(judge("ROCKET", &rocket), Judgment::Correct);
    }

    #[test]
    fn judging_ignores_whitespace_and_punctuation() {
        let rocket = word("Rocket", None);
        assert_eq!(judge("r o c k e t", &rocket), Judgment::Correct);
        assert_eq!(judge("Rocket.", &rocket), Judgment::Correct);
        assert_eq!(judge("r,o,c,k,e,t", &rocket), Judgment::Correct);
    }

    #[test]
    fn alternate_spelling_is_accepted() {
        let theater = word("theater", Some("theatre"));
        assert_eq!(judge("theater", &theater), Judgment::Correct);
        assert_eq!(judge("Theatre.", &theater), Judgment::Correct);
        assert_eq!(judge("teater", &theater), Judgment::Wrong);
    }

    #[test]
    fn near_misses_are_wrong() {
        let jogging = word("Jogging", None);
        assert_eq!(judge("joging", &jogging), Judgment::Wrong);
        assert_eq!(judge("joggings", &jogging), Judgment::Wrong);
        assert_eq!(judge("", &jogging), Judgment::Wrong);
    }
}
