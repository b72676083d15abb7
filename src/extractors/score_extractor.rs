//! Full-time and half-time score lines
//!
//! A score sits next to a `<small>` label inside the same parent, e.g.
//! `<div><small>Lõppseis</small> 2 : 0</div>`.

use scraper::{ElementRef, Html};

use super::dom;
use super::text_normalizer::{normalize_text, FINAL_SCORE_LABEL, HALFTIME_SCORE_LABEL};
use crate::error::{ProtocolError, Result};
use crate::model::Score;

/// All `<small>` nodes whose text is exactly `label`, in document order
pub fn score_labels<'a>(document: &'a Html, label: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = dom::selector("small")?;
    Ok(document
        .select(&sel)
        .filter(|el| dom::text(*el) == label)
        .collect())
}

/// Parse the score next to the first label in `labels`.
///
/// With no label present this is `Ok(None)` when `allow_missing` is set and
/// `ScoreNotFound` otherwise.
pub fn parse_score(labels: &[ElementRef<'_>], allow_missing: bool) -> Result<Option<(Score, Score)>> {
    let container = labels
        .first()
        .and_then(|label| label.parent())
        .and_then(ElementRef::wrap);

    let Some(container) = container else {
        if allow_missing {
            return Ok(None);
        }
        return Err(ProtocolError::ScoreNotFound);
    };

    split_score_line(&dom::raw_text(container)).map(Some)
}

/// Split `"2:0"` or `"1 - 0"` into its two halves.
///
/// `:` wins over `-` so that symbolic results such as `"+:-"` survive.
pub fn split_score_line(text: &str) -> Result<(Score, Score)> {
    let line = normalize_text(text);
    let separator = if line.contains(':') { ':' } else { '-' };
    let parts: Vec<&str> = line.split(separator).map(str::trim).collect();

    let [home, away] = parts.as_slice() else {
        return Err(ProtocolError::MalformedScore(line));
    };

    match (Score::parse(home), Score::parse(away)) {
        (Some(home), Some(away)) => Ok((home, away)),
        _ => Err(ProtocolError::MalformedScore(line)),
    }
}

/// Mandatory full-time result
pub fn final_score(document: &Html) -> Result<(Score, Score)> {
    let labels = score_labels(document, FINAL_SCORE_LABEL)?;
    parse_score(&labels, false)?.ok_or(ProtocolError::ScoreNotFound)
}

/// Half-time result, absent on protocols without a half-time line
pub fn halftime_score(document: &Html) -> Result<Option<(Score, Score)>> {
    let labels = score_labels(document, HALFTIME_SCORE_LABEL)?;
    parse_score(&labels, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolicScore;

    #[test]
    fn test_split_score_line() {
        assert_eq!(
            split_score_line("2:0").unwrap(),
            (Score::Goals(2), Score::Goals(0))
        );
        assert_eq!(
            split_score_line("1 - 0").unwrap(),
            (Score::Goals(1), Score::Goals(0))
        );
        assert_eq!(
            split_score_line("+:-").unwrap(),
            (
                Score::Symbolic(SymbolicScore::Plus),
                Score::Symbolic(SymbolicScore::Minus)
            )
        );
        assert_eq!(
            split_score_line("-").unwrap(),
            (
                Score::Symbolic(SymbolicScore::Blank),
                Score::Symbolic(SymbolicScore::Blank)
            )
        );
    }

    #[test]
    fn test_malformed_score() {
        assert!(matches!(
            split_score_line("2:0:1"),
            Err(ProtocolError::MalformedScore(s)) if s == "2:0:1"
        ));
        assert!(matches!(
            split_score_line("two:0"),
            Err(ProtocolError::MalformedScore(_))
        ));
        assert!(matches!(
            split_score_line("20"),
            Err(ProtocolError::MalformedScore(_))
        ));
    }

    #[test]
    fn test_score_reparses_from_display() {
        for (home, away) in [(0, 0), (2, 0), (3, 11)] {
            let parsed = split_score_line(&format!("{}:{}", home, away)).unwrap();
            let rendered = format!("{}:{}", parsed.0, parsed.1);
            assert_eq!(split_score_line(&rendered).unwrap(), parsed);
            assert_eq!(parsed.0.goals(), Some(home));
        }
    }

    #[test]
    fn test_scores_from_document() {
        let html = r#"
        <div class="score">
            <div><small>Lõppseis</small> 2 : 0</div>
            <div><small>Vaheajaseis</small> 1 : 0</div>
        </div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            final_score(&document).unwrap(),
            (Score::Goals(2), Score::Goals(0))
        );
        assert_eq!(
            halftime_score(&document).unwrap(),
            Some((Score::Goals(1), Score::Goals(0)))
        );
    }

    #[test]
    fn test_missing_scores() {
        let document = Html::parse_document("<div><small>Muu</small> 1:1</div>");

        assert!(matches!(
            final_score(&document),
            Err(ProtocolError::ScoreNotFound)
        ));
        assert_eq!(halftime_score(&document).unwrap(), None);
        assert!(parse_score(&[], true).unwrap().is_none());
    }
}
