//! Single-URL checker
//!
//! Terminal counterpart of the desktop checker: prints the heuristic verdict,
//! the model-input feature details and the reasons a URL looks suspicious.

use phishing_detection_pipeline::{
    model_input::{describe, explain},
    HeuristicExtractor, Label, ModelFeatureExtractor,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("check_url=info".parse()?),
        )
        .init();

    let urls: Vec<String> = std::env::args()
        .skip(1)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if urls.is_empty() {
        println!("Please enter a URL to check.");
        println!("usage: check_url <URL> [URL...]");
        return Ok(());
    }

    let heuristics = HeuristicExtractor::new();
    let model_input = ModelFeatureExtractor::new();

    for url in &urls {
        for line in report_lines(&heuristics, &model_input, url) {
            println!("{line}");
        }
        println!();
    }

    Ok(())
}

/// Verdict, indicators and details for one URL. Reasons are listed only
/// when the heuristic verdict is phishing.
fn report_lines(
    heuristics: &HeuristicExtractor,
    model_input: &ModelFeatureExtractor,
    url: &str,
) -> Vec<String> {
    let mut lines = vec![format!("URL: {url}")];
    let features = model_input.extract(url);

    match heuristics.extract(url) {
        Ok(indicators) => {
            let phishing = indicators.verdict() == Label::Phishing;
            if phishing {
                lines.push("Warning: This URL might be a phishing scam!".to_string());
            } else {
                lines.push("Good news: This URL seems safe!".to_string());
            }
            let flags: Vec<String> = heuristics
                .feature_names()
                .iter()
                .zip(indicators.to_vector())
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            lines.push(format!("Indicators: {}", flags.join(" ")));

            if phishing {
                lines.push(String::new());
                lines.push("Why it looks suspicious:".to_string());
                let reasons = explain(&features);
                if reasons.is_empty() {
                    lines.push(
                        "- It looks suspicious, but no specific issues were found.".to_string(),
                    );
                }
                lines.extend(reasons.into_iter().map(|reason| format!("- {reason}")));
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Heuristic extraction failed");
            lines.push(format!("Oops, something went wrong: {e}"));
        }
    }

    lines.push(String::new());
    lines.push("Details about the URL:".to_string());
    lines.extend(describe(&features).into_iter().map(|line| format!("- {line}")));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(url: &str) -> Vec<String> {
        report_lines(&HeuristicExtractor::new(), &ModelFeatureExtractor::new(), url)
    }

    #[test]
    fn test_safe_verdict_hides_reasons() {
        let lines = report("https://example.com/secure-update");

        assert!(lines.contains(&"Good news: This URL seems safe!".to_string()));
        assert!(!lines.iter().any(|l| l == "Why it looks suspicious:"));
        assert!(lines.iter().any(|l| l == "Details about the URL:"));
    }

    #[test]
    fn test_phishing_verdict_lists_reasons() {
        let lines = report("http://secure-login.tk/account");

        assert!(lines.contains(&"Warning: This URL might be a phishing scam!".to_string()));
        let at = lines.iter().position(|l| l == "Why it looks suspicious:").unwrap();
        assert!(lines[at + 1].starts_with("- "));
    }

    #[test]
    fn test_failed_extraction_hides_reasons() {
        let lines = report("http://[broken");

        assert!(lines[1].starts_with("Oops, something went wrong"));
        assert!(!lines.iter().any(|l| l == "Why it looks suspicious:"));
    }
}
