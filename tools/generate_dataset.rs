//! Synthetic Dataset Generator
//!
//! Writes a labeled `URL,label` CSV for exercising the verification pipeline
//! without the full production dataset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

const WORDS: [&str; 10] = [
    "news", "shop", "garden", "travel", "music", "photo", "recipes", "sports", "books", "weather",
];
const TLDS: [&str; 5] = ["com", "org", "net", "io", "de"];
const BAIT: [&str; 6] = ["secure", "login", "verify", "account", "update", "bank"];
const ABUSED_TLDS: [&str; 4] = ["tk", "xyz", "gq", "ml"];

/// URL generator for testing
struct UrlGenerator {
    rng: StdRng,
}

impl UrlGenerator {
    fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        }
    }

    /// Generate a plausible legitimate URL
    fn generate_legitimate(&mut self) -> String {
        let scheme = if self.rng.gen_bool(0.8) { "https" } else { "http" };
        let site = self.random_choice(&WORDS);
        let tld = self.random_choice(&TLDS);
        let page = self.random_choice(&WORDS);
        format!("{scheme}://www.{site}.{tld}/{page}/{}", self.rng.gen_range(1..500))
    }

    /// Generate a phishing-style URL
    fn generate_suspicious(&mut self) -> String {
        let bait = self.random_choice(&BAIT);
        let site = self.random_choice(&WORDS);
        match self.rng.gen_range(0..5) {
            0 => format!(
                "http://{}.{}.{}.{}/{bait}",
                self.rng.gen_range(1..255),
                self.rng.gen_range(0..255),
                self.rng.gen_range(0..255),
                self.rng.gen_range(1..255)
            ),
            1 => format!("http://{site}.com@{bait}-{site}.net/"),
            2 => format!("http://{bait}-{site}.{}/account", self.random_choice(&ABUSED_TLDS)),
            3 => format!(
                "http://{site}.com/{bait}/{}",
                "x".repeat(self.rng.gen_range(60..120))
            ),
            // Looks clean to the heuristics
            _ => format!("https://{site}-support.com/{bait}"),
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

/// Phishing share from the command line, clamped to [0, 1] (default 0.3)
fn parse_rate(arg: Option<&str>) -> f64 {
    arg.and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.3)
        .clamp(0.0, 1.0)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_dataset=info".parse()?),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let output = args.get(1).map(|s| s.as_str()).unwrap_or("synthetic_urls.csv");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1000);
    let phish_rate = parse_rate(args.get(3).map(|s| s.as_str()));
    let seed: Option<u64> = args.get(4).and_then(|s| s.parse().ok());

    info!(output = %output, count, phish_rate, seed = ?seed, "Configuration loaded");

    let mut generator = UrlGenerator::new(seed);
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(["URL", "label"])?;

    let mut phishing = 0u64;
    for i in 0..count {
        let (url, label) = if generator.rng.gen_bool(phish_rate) {
            phishing += 1;
            (generator.generate_suspicious(), "1")
        } else {
            (generator.generate_legitimate(), "0")
        };
        writer.write_record([url.as_str(), label])?;

        if (i + 1) % 100_000 == 0 {
            info!("Generated {}/{} URLs", i + 1, count);
        }
    }
    writer.flush()?;

    info!(
        "Completed! Wrote {} URLs ({} legitimate, {} phishing) to {}",
        count,
        count - phishing,
        phishing,
        output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate(None), 0.3);
        assert_eq!(parse_rate(Some("0.5")), 0.5);
        assert_eq!(parse_rate(Some("7")), 1.0);
        assert_eq!(parse_rate(Some("-1")), 0.0);
        assert_eq!(parse_rate(Some("lots")), 0.3);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = UrlGenerator::new(Some(7));
        let mut b = UrlGenerator::new(Some(7));
        for _ in 0..20 {
            assert_eq!(a.generate_suspicious(), b.generate_suspicious());
            assert_eq!(a.generate_legitimate(), b.generate_legitimate());
        }
    }
}
