//! Labeled URL records read from the input dataset

use crate::error::PipelineError;
use std::fmt;

/// Binary class of a URL, used both for ground truth and for verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Label::Phishing
        } else {
            Label::Legitimate
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }

    /// Coerce a raw label cell to 0/1.
    ///
    /// Accepts integer text and its float spelling (`"1"`, `" 0 "`, `"1.0"`).
    /// `line` is only used to build the error.
    pub fn parse_cell(value: &str, line: u64) -> Result<Self, PipelineError> {
        let trimmed = value.trim();
        let numeric = trimmed
            .parse::<i64>()
            .ok()
            .or_else(|| match trimmed.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 => Some(f as i64),
                _ => None,
            });

        match numeric {
            Some(0) => Ok(Label::Legitimate),
            Some(1) => Ok(Label::Phishing),
            _ => Err(PipelineError::InvalidLabel {
                line,
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One input row: a URL and its ground-truth label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// 1-based data line (header excluded)
    pub line: u64,
    /// Raw URL text; `None` when the cell was empty or missing
    pub url: Option<String>,
    pub label: Label,
}

impl UrlRecord {
    pub fn new(url: impl Into<String>, label: Label) -> Self {
        Self {
            line: 0,
            url: Some(url.into()),
            label,
        }
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// URL text as written to the output (empty for a missing cell).
    pub fn url_text(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_coercion() {
        assert_eq!(Label::parse_cell("1", 1).unwrap(), Label::Phishing);
        assert_eq!(Label::parse_cell(" 0 ", 1).unwrap(), Label::Legitimate);
        assert_eq!(Label::parse_cell("1.0", 1).unwrap(), Label::Phishing);
    }

    #[test]
    fn test_label_rejects_non_binary() {
        for bad in ["2", "", "bad", "0.5", "-1"] {
            match Label::parse_cell(bad, 7) {
                Err(PipelineError::InvalidLabel { line, value }) => {
                    assert_eq!(line, 7);
                    assert_eq!(value, bad);
                }
                other => panic!("expected InvalidLabel for {bad:?}, got {other:?}"),
            }
        }
    }
}
