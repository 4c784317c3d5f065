//! Content classification for the `optimal` width strategy.

use crate::element::Element;

/// Share of cells that must agree before a column counts as numeric or text.
const MAJORITY: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    /// Text whose words average more than ten characters.
    LongText,
    Text,
    Mixed,
}

impl ColumnKind {
    /// Classify a column from the header and body cells' text.
    pub fn of<'a>(cells: impl IntoIterator<Item = &'a Element>) -> Self {
        let texts: Vec<String> = cells
            .into_iter()
            .map(|c| c.text_content().trim().to_string())
            .collect();
        if texts.is_empty() {
            return Self::Mixed;
        }

        let total = texts.len() as f32;
        let numeric = texts
            .iter()
            .filter(|t| !t.is_empty() && is_numeric(t))
            .count() as f32;
        let text = texts
            .iter()
            .filter(|t| !t.is_empty() && !is_numeric(t))
            .count() as f32;

        if numeric / total > MAJORITY {
            Self::Numeric
        } else if text / total > MAJORITY {
            if average_word_length(&texts) > 10.0 {
                Self::LongText
            } else {
                Self::Text
            }
        } else {
            Self::Mixed
        }
    }

    /// Cap a measured content width for this kind of column.
    pub fn cap(self, content_width: u32) -> u32 {
        match self {
            Self::Numeric => content_width.min(120),
            Self::LongText => 200,
            Self::Text => content_width.min(300),
            Self::Mixed => content_width.min(200),
        }
    }
}

fn is_numeric(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(|n| n.is_finite())
}

fn average_word_length(texts: &[String]) -> f32 {
    let (chars, words) = texts
        .iter()
        .flat_map(|t| t.split_whitespace())
        .fold((0usize, 0usize), |(c, w), word| (c + word.chars().count(), w + 1));
    if words == 0 {
        0.0
    } else {
        chars as f32 / words as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(texts: &[&str]) -> Vec<Element> {
        texts.iter().map(|t| Element::div().content(*t)).collect()
    }

    #[test]
    fn test_numeric_column() {
        let c = cells(&["Spend", "12.5", "300", "1e3", "-4"]);
        assert_eq!(ColumnKind::of(&c), ColumnKind::Numeric);
        assert_eq!(ColumnKind::Numeric.cap(180), 120);
    }

    #[test]
    fn test_long_text_column() {
        let c = cells(&["Description", "internationalization", "misconfiguration"]);
        assert_eq!(ColumnKind::of(&c), ColumnKind::LongText);
        assert_eq!(ColumnKind::LongText.cap(90), 200);
    }

    #[test]
    fn test_mixed_column() {
        let c = cells(&["Status", "1", "ok", "", "2"]);
        assert_eq!(ColumnKind::of(&c), ColumnKind::Mixed);
    }
}
