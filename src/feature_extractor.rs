//! Heuristic feature extraction for batch URL verification.
//!
//! Six binary indicators are computed from a single URL with plain string and
//! host predicates. No indicator looks at any other record, so every record
//! can be scored independently and re-scoring is deterministic.

use crate::config::HeuristicsConfig;
use crate::error::ExtractionFailed;
use crate::types::outcome::VerificationStatus;
use crate::types::record::{Label, UrlRecord};
use tracing::debug;
use url::Host;

/// The six heuristic indicators for one URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicFeatures {
    /// A dot-separated segment of the host is purely numeric
    pub has_ip: bool,
    /// URL is longer than the configured threshold
    pub long_url: bool,
    /// Scheme is `https`
    pub uses_https: bool,
    /// URL contains a literal `@`
    pub has_at_symbol: bool,
    /// Host contains a suspicious keyword
    pub suspicious_words: bool,
    /// Host ends in an abused top-level domain
    pub suspicious_tld: bool,
}

impl HeuristicFeatures {
    /// Binary verdict: phishing when any suspicion indicator fires.
    ///
    /// `uses_https` is informational and never flags a URL on its own.
    pub fn verdict(&self) -> Label {
        Label::from_flag(
            self.has_ip
                || self.long_url
                || self.has_at_symbol
                || self.suspicious_words
                || self.suspicious_tld,
        )
    }

    /// Indicator values in output column order.
    pub fn to_vector(&self) -> [u8; 6] {
        [
            self.has_ip as u8,
            self.long_url as u8,
            self.uses_https as u8,
            self.has_at_symbol as u8,
            self.suspicious_words as u8,
            self.suspicious_tld as u8,
        ]
    }
}

/// Scored record: indicators, verdict and comparison against the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub features: HeuristicFeatures,
    pub verdict: Label,
    pub status: VerificationStatus,
}

/// Heuristic extractor configured with thresholds and keyword lists.
pub struct HeuristicExtractor {
    long_url_threshold: usize,
    suspicious_keywords: Vec<String>,
    suspicious_tlds: Vec<String>,
}

impl HeuristicExtractor {
    /// Create an extractor with the default parameters.
    pub fn new() -> Self {
        Self::from_config(&HeuristicsConfig::default())
    }

    /// Create an extractor from configuration. Keywords and TLDs are matched
    /// against the lowercased host, so they are lowercased here.
    pub fn from_config(config: &HeuristicsConfig) -> Self {
        Self {
            long_url_threshold: config.long_url_threshold,
            suspicious_keywords: config
                .suspicious_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            suspicious_tlds: config
                .suspicious_tlds
                .iter()
                .map(|t| t.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Extract the six indicators from a URL.
    pub fn extract(&self, url: &str) -> Result<HeuristicFeatures, ExtractionFailed> {
        if url.is_empty() {
            return Err(ExtractionFailed::new("empty url"));
        }

        let (scheme, host) = network_location(url)?;
        let tld = host.rsplit('.').next().unwrap_or("");

        Ok(HeuristicFeatures {
            has_ip: host
                .split('.')
                .any(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit())),
            long_url: url.chars().count() > self.long_url_threshold,
            uses_https: scheme == "https",
            has_at_symbol: url.contains('@'),
            suspicious_words: self
                .suspicious_keywords
                .iter()
                .any(|word| host.contains(word.as_str())),
            suspicious_tld: self.suspicious_tlds.iter().any(|t| t == tld),
        })
    }

    /// Score a record and compare the verdict with its label.
    ///
    /// Extraction failures degrade to all-zero indicators, a legitimate
    /// verdict and the `ExtractionError` status.
    pub fn evaluate(&self, record: &UrlRecord) -> Evaluation {
        let extracted = match record.url.as_deref() {
            Some(url) => self.extract(url),
            None => Err(ExtractionFailed::new("missing url")),
        };

        match extracted {
            Ok(features) => {
                let verdict = features.verdict();
                Evaluation {
                    features,
                    verdict,
                    status: VerificationStatus::compare(verdict, record.label),
                }
            }
            Err(e) => {
                debug!(line = record.line, url = %record.url_text(), error = %e, "Extraction failed");
                Evaluation {
                    features: HeuristicFeatures::default(),
                    verdict: Label::Legitimate,
                    status: VerificationStatus::ExtractionError,
                }
            }
        }
    }

    /// Get the number of indicators produced.
    pub fn feature_count(&self) -> usize {
        6
    }

    /// Get indicator names in output column order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "has_ip",
            "long_url",
            "uses_https",
            "has_at_symbol",
            "suspicious_words",
            "suspicious_tld",
        ]
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a URL into its lowercased scheme and raw network location.
///
/// The network location is the text between `scheme://` and the first `/`,
/// `?` or `#`, lowercased and otherwise untouched: userinfo, ports and
/// percent-escapes are kept as written. A URL without a scheme, or whose
/// scheme is not followed by `//`, has an empty network location.
fn network_location(url: &str) -> Result<(String, String), ExtractionFailed> {
    let (scheme, rest) = match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => (scheme.to_ascii_lowercase(), rest),
        _ => (String::new(), url),
    };

    let netloc = match rest.strip_prefix("//") {
        Some(authority) => {
            let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
            authority[..end].to_lowercase()
        }
        None => String::new(),
    };

    check_brackets(&netloc)?;
    Ok((scheme, netloc))
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// An address literal must be closed and hold a valid IPv6 address.
fn check_brackets(netloc: &str) -> Result<(), ExtractionFailed> {
    match (netloc.find('['), netloc.find(']')) {
        (None, None) => Ok(()),
        (Some(open), Some(close)) if open < close => {
            Host::parse(&netloc[open..=close])
                .map(|_| ())
                .map_err(|e| ExtractionFailed::new(format!("invalid address literal: {e}")))
        }
        _ => Err(ExtractionFailed::new("unbalanced brackets in host")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_of_len(len: usize) -> String {
        let base = "http://example.com/";
        format!("{}{}", base, "a".repeat(len - base.len()))
    }

    #[test]
    fn test_suspicious_host_scenario() {
        let extractor = HeuristicExtractor::new();
        let record = UrlRecord::new("http://secure-login.tk/account", Label::Phishing);

        let eval = extractor.evaluate(&record);

        assert_eq!(eval.features.to_vector(), [0, 0, 0, 0, 1, 1]);
        assert_eq!(eval.verdict, Label::Phishing);
        assert_eq!(eval.status, VerificationStatus::Match);
    }

    #[test]
    fn test_clean_https_is_false_negative() {
        let extractor = HeuristicExtractor::new();
        let record = UrlRecord::new("https://example.com", Label::Phishing);

        let eval = extractor.evaluate(&record);

        assert!(!eval.features.has_ip);
        assert!(!eval.features.long_url);
        assert!(!eval.features.has_at_symbol);
        assert!(!eval.features.suspicious_words);
        assert!(!eval.features.suspicious_tld);
        assert_eq!(eval.verdict, Label::Legitimate);
        assert_eq!(eval.status, VerificationStatus::FalseNegative);
    }

    #[test]
    fn test_userinfo_address_is_false_positive() {
        let extractor = HeuristicExtractor::new();
        let record = UrlRecord::new("http://192.0.2.1@example.com", Label::Legitimate);

        let eval = extractor.evaluate(&record);

        assert!(eval.features.has_ip);
        assert!(eval.features.has_at_symbol);
        assert_eq!(eval.verdict, Label::Phishing);
        assert_eq!(eval.status, VerificationStatus::FalsePositive);
    }

    #[test]
    fn test_address_literal_host() {
        let extractor = HeuristicExtractor::new();
        assert!(extractor.extract("http://192.168.0.1/").unwrap().has_ip);
        assert!(!extractor.extract("http://example.com/").unwrap().has_ip);
    }

    #[test]
    fn test_length_boundary() {
        let extractor = HeuristicExtractor::new();
        assert!(!extractor.extract(&url_of_len(75)).unwrap().long_url);
        assert!(extractor.extract(&url_of_len(76)).unwrap().long_url);
    }

    #[test]
    fn test_malformed_url_is_extraction_error() {
        let extractor = HeuristicExtractor::new();
        for url in ["http://[invalid", "http://a]b/", "http://[not-an-address]/", ""] {
            let eval = extractor.evaluate(&UrlRecord::new(url, Label::Phishing));
            assert_eq!(eval.features, HeuristicFeatures::default(), "{url}");
            assert_eq!(eval.verdict, Label::Legitimate);
            assert_eq!(eval.status, VerificationStatus::ExtractionError);
        }
    }

    #[test]
    fn test_port_is_kept_in_host() {
        let extractor = HeuristicExtractor::new();
        let features = extractor.extract("https://login.tk:443/").unwrap();

        assert!(features.uses_https);
        assert!(features.suspicious_words);
        assert!(!features.suspicious_tld);
        assert!(extractor.extract("http://[::1]:8080/").is_ok());
    }

    #[test]
    fn test_host_is_not_decoded_or_normalized() {
        let extractor = HeuristicExtractor::new();

        assert!(!extractor.extract("http://log%69n.com/").unwrap().suspicious_words);
        assert!(!extractor.extract("http://0x7f000001/").unwrap().has_ip);

        let spaced = extractor.extract("http://secure login.com/").unwrap();
        assert!(spaced.suspicious_words);
        assert_eq!(spaced.verdict(), Label::Phishing);
    }

    #[test]
    fn test_loose_authorities_are_scored() {
        let extractor = HeuristicExtractor::new();

        let userinfo_only = extractor.evaluate(&UrlRecord::new("http://user@", Label::Legitimate));
        assert!(userinfo_only.features.has_at_symbol);
        assert_eq!(userinfo_only.verdict, Label::Phishing);
        assert_eq!(userinfo_only.status, VerificationStatus::FalsePositive);

        let bare = extractor.evaluate(&UrlRecord::new("http://", Label::Legitimate));
        assert_eq!(bare.status, VerificationStatus::Match);
    }

    #[test]
    fn test_missing_url_cell_is_extraction_error() {
        let extractor = HeuristicExtractor::new();
        let record = UrlRecord {
            line: 3,
            url: None,
            label: Label::Legitimate,
        };
        assert_eq!(extractor.evaluate(&record).status, VerificationStatus::ExtractionError);
    }

    #[test]
    fn test_schemeless_url_has_no_host_indicators() {
        let extractor = HeuristicExtractor::new();
        let features = extractor.extract("secure-login.tk/account@home").unwrap();

        assert!(!features.suspicious_words);
        assert!(!features.suspicious_tld);
        assert!(features.has_at_symbol);
    }

    #[test]
    fn test_host_is_lowercased() {
        let extractor = HeuristicExtractor::new();
        let features = extractor.extract("HTTP://Verify-Account.XYZ/").unwrap();
        assert!(features.suspicious_words);
        assert!(features.suspicious_tld);
    }

    #[test]
    fn test_custom_lists() {
        let config = HeuristicsConfig {
            long_url_threshold: 10,
            suspicious_keywords: vec!["Bank".to_string()],
            suspicious_tlds: vec![".ZIP".to_string()],
        };
        let extractor = HeuristicExtractor::from_config(&config);
        let features = extractor.extract("http://mybank.zip").unwrap();

        assert!(features.long_url);
        assert!(features.suspicious_words);
        assert!(features.suspicious_tld);
    }

    #[test]
    fn test_feature_count() {
        let extractor = HeuristicExtractor::new();
        assert_eq!(extractor.feature_count(), 6);
        assert_eq!(extractor.feature_names().len(), 6);
    }
}
