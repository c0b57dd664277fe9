use thiserror::Error;

use crate::model::word::{Difficulty, WordEntry, WordError};

/// Errors produced while parsing a tab-separated word list.
///
/// Line numbers are 1-based and refer to the input as given, including
/// skipped blank and comment lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordListError {
    #[error("line {line}: expected at least 7 tab-separated columns, found {found}")]
    MissingColumns { line: usize, found: usize },
    #[error("line {line}: unknown difficulty tier {label:?}")]
    UnknownTier { line: usize, label: String },
    #[error("line {line}: invalid word entry")]
    InvalidWord {
        line: usize,
        #[source]
        source: WordError,
    },
}

/// Parses a word list in tab-separated form.
///
/// Each row carries, in order: word, pronunciation, definition, origin,
/// example sentence, part of speech, difficulty tier label, and an optional
/// alternate accepted spelling. Blank lines and lines starting with `#` are
/// skipped. Extra columns past the eighth are ignored.
pub fn parse_word_list(text: &str) -> Result<Vec<WordEntry>, WordListError> {
    let mut entries = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let row = raw_line.trim_end_matches('\r');
        if row.trim().is_empty() || row.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = row.split('\t').collect();
        if columns.len() < 7 {
            return Err(WordListError::MissingColumns {
                line,
                found: columns.len(),
            });
        }

        let label = columns[6].trim();
        let difficulty = Difficulty::from_label(label).ok_or_else(|| {
            WordListError::UnknownTier {
                line,
                label: label.to_owned(),
            }
        })?;
        let alternate = columns.get(7).map(|alt| (*alt).to_string());

        let entry = WordEntry::new(
            columns[0],
            columns[1],
            columns[2],
            columns[3],
            columns[4],
            columns[5],
            difficulty,
            alternate,
        )
        .map_err(|source| WordListError::InvalidWord { line, source })?;
        entries.push(entry);
    }

    Ok(entries)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# practice list
jogging\tJOG-ing\tRunning at a steady pace\tEnglish\tShe went jogging.\tverb\tOne Bee

theater\tTHEE-uh-ter\tA playhouse\tGreek\tWe sat in the theater.\tnoun\tTwo Bee\ttheatre
";

    #[test]
    fn parses_rows_and_skips_blanks_and_comments() {
        let entries = parse_word_list(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word(), "jogging");
        assert_eq!(entries[0].difficulty(), Difficulty::OneBee);
        assert_eq!(entries[0].alternate(), None);
        assert_eq!(entries[1].alternate(), Some("theatre"));
    }

    #[test]
    fn missing_columns_report_the_line_number() {
        let err = parse_word_list("jogging\tJOG-ing\tdef\n").unwrap_err();
        match err {
            WordListError::MissingColumns { line, found } => {
                assert_eq!(line, 1);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_tier_reports_the_label() {
        let row = "word\tp\td\to\ts\tnoun\tFour Bee\n";
        let err = parse_word_list(row).unwrap_err();
        match err {
            WordListError::UnknownTier { line, label } => {
                assert_eq!(line, 1);
                assert_eq!(label, "Four Bee");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_word_column_is_invalid() {
        let row = "   \tp\td\to\ts\tnoun\tOne Bee\n";
        let err = parse_word_list(row).unwrap_err();
        assert!(matches!(err, WordListError::InvalidWord { line: 1, .. }));
    }

    #[test]
    fn windows_line_endings_are_tolerated() {
        let text = "jogging\tp\td\to\ts\tverb\tOne Bee\r\n";
        let entries = parse_word_list(text).unwrap();
        assert_eq!(entries[0].word(), "jogging");
    }

    #[test]
    fn empty_input_yields_an_empty_list() {
        assert!(parse_word_list("").unwrap().is_empty());
        assert!(parse_word_list("\n\n# only comments\n").unwrap().is_empty());
    }
}
