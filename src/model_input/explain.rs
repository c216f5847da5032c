//! Plain-language reasons a URL looks suspicious.

use super::features::ModelFeatures;

/// Human-readable reasons, in feature order. Empty when nothing stands out.
pub fn explain(f: &ModelFeatures) -> Vec<String> {
    let mut reasons = Vec::new();

    if f.url_length > 50 {
        reasons.push(format!("The URL is very long ({} characters)", f.url_length));
    }
    if f.num_dots > 3 {
        reasons.push(format!("The URL has too many dots ({} dots)", f.num_dots));
    }
    if f.num_hyphens > 2 {
        reasons.push(format!("The URL has too many hyphens ({} hyphens)", f.num_hyphens));
    }
    if f.num_slashes > 5 {
        reasons.push(format!("The URL has too many slashes ({} slashes)", f.num_slashes));
    }
    if f.has_https == 0 {
        reasons.push("The URL doesn't use HTTPS (not secure)".to_string());
    }
    if f.has_ip == 1 {
        reasons.push("The URL uses an IP address instead of a domain name".to_string());
    }
    if f.has_at_symbol == 1 {
        reasons.push("The URL contains an @ symbol".to_string());
    }
    if f.has_suspicious_word == 1 {
        reasons.push("The URL contains words like 'login' or 'bank'".to_string());
    }
    if f.count_digits > 10 {
        reasons.push(format!("The URL has too many numbers ({} digits)", f.count_digits));
    }
    if f.is_shortened == 1 {
        reasons.push("The URL is shortened (like bit.ly or tinyurl)".to_string());
    }
    if f.suspicious_tld == 1 {
        reasons.push("The URL uses an unusual domain ending (like .tk or .xyz)".to_string());
    }
    if f.subdomain_count > 1 {
        reasons.push(format!(
            "The URL has multiple subdomains ({} subdomains)",
            f.subdomain_count
        ));
    }
    if f.contains_double_slash_redirect == 1 {
        reasons.push("The URL has a redirect pattern (double slashes)".to_string());
    }

    reasons
}

/// One line per feature describing its value in plain words.
pub fn describe(f: &ModelFeatures) -> Vec<String> {
    let yes_no = |flag: u8| if flag == 1 { "Yes" } else { "No" };

    vec![
        format!("Length of the URL: {} characters", f.url_length),
        format!("Number of dots: {}", f.num_dots),
        format!("Number of hyphens: {}", f.num_hyphens),
        format!("Number of slashes: {}", f.num_slashes),
        format!("Uses HTTPS (secure): {}", yes_no(f.has_https)),
        format!("Uses an IP address: {}", yes_no(f.has_ip)),
        format!("Contains @ symbol: {}", yes_no(f.has_at_symbol)),
        format!("Has words like 'login' or 'bank': {}", yes_no(f.has_suspicious_word)),
        format!("Number of digits: {}", f.count_digits),
        format!("Is a shortened URL: {}", yes_no(f.is_shortened)),
        format!("Has unusual domain ending: {}", yes_no(f.suspicious_tld)),
        format!("Number of subdomains: {}", f.subdomain_count),
        format!("Has redirect pattern: {}", yes_no(f.contains_double_slash_redirect)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_input::ModelFeatureExtractor;

    #[test]
    fn test_clean_url_has_no_reasons() {
        let f = ModelFeatureExtractor::new().extract("https://example.com");
        assert!(explain(&f).is_empty());
    }

    #[test]
    fn test_reasons_follow_feature_order() {
        let f = ModelFeatureExtractor::new().extract("http://1.2.3.4@login.tk");
        let reasons = explain(&f);

        assert_eq!(
            reasons,
            vec![
                "The URL has too many dots (4 dots)",
                "The URL doesn't use HTTPS (not secure)",
                "The URL uses an IP address instead of a domain name",
                "The URL contains an @ symbol",
                "The URL contains words like 'login' or 'bank'",
                "The URL uses an unusual domain ending (like .tk or .xyz)",
                "The URL has multiple subdomains (3 subdomains)",
            ]
        );
    }

    #[test]
    fn test_describe_covers_every_feature() {
        let f = ModelFeatureExtractor::new().extract("https://example.com");
        let lines = describe(&f);
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[4], "Uses HTTPS (secure): Yes");
    }
}
