//! Sample assets shown to guests on first use.

use chrono::{DateTime, Duration, Utc};
use promptvault_core::{Asset, AssetKind};

/// The two starter assets, timestamped relative to `now`.
#[must_use]
pub fn sample_assets(now: DateTime<Utc>) -> Vec<Asset> {
    let translator_at = now - Duration::milliseconds(10_000_000);
    let mut translator = Asset::create(
        "P-001",
        AssetKind::Prompt,
        "You are a professional translator specializing in academic papers. \
         Translate the following text into fluent, academic English...",
        "Initial version",
        translator_at,
    );
    translator.title = "English Translator Professional".to_string();
    translator.category = "Writing Assistant".to_string();
    translator.tags = vec![
        "#Translation".to_string(),
        "#V1".to_string(),
        "#Professional".to_string(),
    ];

    let generator_at = now - Duration::milliseconds(5_000_000);
    let mut generator = Asset::create(
        "I-001",
        AssetKind::Idea,
        "Need a prompt that takes a JSON description of props and returns a functional \
         React component with Typescript interfaces.",
        "Initial thought",
        generator_at,
    );
    generator.title = "React Component Generator".to_string();
    generator.category = "Coding".to_string();
    generator.tags = vec!["#React".to_string(), "#Frontend".to_string()];

    vec![translator, generator]
}
