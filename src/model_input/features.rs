//! 13-field URL feature vector in the order the trained classifier expects.

use once_cell::sync::Lazy;
use regex::Regex;

static IP_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://\d+\.\d+\.\d+\.\d+").expect("IP prefix pattern is valid")
});

const SUSPICIOUS_WORDS: [&str; 5] = ["login", "verify", "update", "bank", "secure"];
const SHORTENERS: [&str; 4] = ["bit.ly", "tinyurl", "goo.gl", "t.co"];
const SUSPICIOUS_SUFFIXES: [&str; 6] = [".tk", ".ml", ".ga", ".cf", ".gq", ".xyz"];

/// Model-input features for one URL. Field order is the training order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelFeatures {
    pub url_length: u32,
    pub num_dots: u32,
    pub num_hyphens: u32,
    pub num_slashes: u32,
    pub has_https: u8,
    pub has_ip: u8,
    pub has_at_symbol: u8,
    pub has_suspicious_word: u8,
    pub count_digits: u32,
    pub is_shortened: u8,
    pub suspicious_tld: u8,
    /// Dots in the authority minus one; -1 for a dotless host
    pub subdomain_count: i32,
    pub contains_double_slash_redirect: u8,
}

impl ModelFeatures {
    /// Feature vector in training order.
    pub fn to_vector(&self) -> Vec<f32> {
        vec![
            self.url_length as f32,
            self.num_dots as f32,
            self.num_hyphens as f32,
            self.num_slashes as f32,
            self.has_https as f32,
            self.has_ip as f32,
            self.has_at_symbol as f32,
            self.has_suspicious_word as f32,
            self.count_digits as f32,
            self.is_shortened as f32,
            self.suspicious_tld as f32,
            self.subdomain_count as f32,
            self.contains_double_slash_redirect as f32,
        ]
    }
}

/// Feature extractor matching the trainer's preprocessing field-for-field.
pub struct ModelFeatureExtractor;

impl ModelFeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the 13 model-input features. Never fails.
    pub fn extract(&self, url: &str) -> ModelFeatures {
        let lower = url.to_lowercase();
        let count = |c: char| url.matches(c).count() as u32;

        let authority = url
            .rsplit("//")
            .next()
            .and_then(|rest| rest.split('/').next())
            .unwrap_or("");

        let after_scheme: String = url.chars().skip(8).collect();

        ModelFeatures {
            url_length: url.chars().count() as u32,
            num_dots: count('.'),
            num_hyphens: count('-'),
            num_slashes: count('/'),
            has_https: url.starts_with("https") as u8,
            has_ip: IP_PREFIX.is_match(url) as u8,
            has_at_symbol: url.contains('@') as u8,
            has_suspicious_word: SUSPICIOUS_WORDS.iter().any(|w| lower.contains(w)) as u8,
            // Any Unicode numeral counts, not just ASCII digits
            count_digits: url.chars().filter(|c| c.is_numeric()).count() as u32,
            is_shortened: SHORTENERS.iter().any(|s| lower.contains(s)) as u8,
            suspicious_tld: SUSPICIOUS_SUFFIXES.iter().any(|s| url.ends_with(s)) as u8,
            subdomain_count: authority.matches('.').count() as i32 - 1,
            contains_double_slash_redirect: after_scheme.contains("//") as u8,
        }
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        13
    }

    /// Get feature names (training order).
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "url_length",
            "num_dots",
            "num_hyphens",
            "num_slashes",
            "has_https",
            "has_ip",
            "has_at_symbol",
            "has_suspicious_word",
            "count_digits",
            "is_shortened",
            "suspicious_tld",
            "subdomain_count",
            "contains_double_slash_redirect",
        ]
    }
}

impl Default for ModelFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
