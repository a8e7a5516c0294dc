//! Passport name resolution.
//!
//! The visible name line is often garbled by OCR while the machine-readable
//! zone keeps its fixed-width structure, so the MRZ is tried first and a
//! capitalized-word heuristic is used only when no MRZ is present.

use tracing::debug;

use super::rules::patterns::{CAPS_WORD, MRZ_NAME};

/// Labels whose next word is never a holder name.
const EXCLUDED_PRECEDING_LABELS: &[&str] = &[
    "Valid",
    "Signature",
    "Authority",
    "Place",
    "Date",
    "Passport",
    "No",
];

/// Country and document boilerplate that follows non-name capitals.
const EXCLUDED_FOLLOWING_TOKENS: &[&str] = &["INDIA", "PASSPORT", "REPUBLIC"];

/// Name parts read from an MRZ name line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzMatch {
    /// Three-letter issuing country code.
    pub country: String,
    pub surname: String,
    pub given_names: String,
}

impl MrzMatch {
    /// Find the first MRZ name line in normalized text.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = MRZ_NAME.captures(text)?;

        Some(Self {
            country: caps[1].to_string(),
            surname: unfill(&caps[2]),
            given_names: unfill(&caps[3]),
        })
    }

    /// `"<surname> <given names>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.given_names)
            .trim()
            .to_string()
    }
}

fn unfill(block: &str) -> String {
    block.replace('<', " ").trim().to_string()
}

/// One way of finding the holder name in passport text.
pub trait NameResolver: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Resolve a name from normalized text.
    fn resolve(&self, text: &str) -> Option<String>;
}

/// Reads the name from the MRZ name line.
#[derive(Debug, Default, Clone, Copy)]
pub struct MrzNameResolver;

impl NameResolver for MrzNameResolver {
    fn name(&self) -> &'static str {
        "mrz"
    }

    fn resolve(&self, text: &str) -> Option<String> {
        MrzMatch::parse(text)
            .map(|m| m.full_name())
            .filter(|name| !name.is_empty())
    }
}

/// Takes the first run of two or three all-caps words that is not next to a
/// known label or country boilerplate.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizedNameResolver;

impl NameResolver for CapitalizedNameResolver {
    fn name(&self) -> &'static str {
        "capitalized-words"
    }

    fn resolve(&self, text: &str) -> Option<String> {
        let words: Vec<_> = CAPS_WORD.find_iter(text).collect();

        for start in 0..words.len() {
            if preceded_by_label(&text[..words[start].start()]) {
                continue;
            }

            // Longer runs win at the same start.
            for count in [3, 2] {
                let Some(run) = words.get(start..start + count) else {
                    continue;
                };
                let separated_by_spaces = run.windows(2).all(|pair| {
                    let gap = &text[pair[0].end()..pair[1].start()];
                    !gap.is_empty() && gap.chars().all(char::is_whitespace)
                });
                if !separated_by_spaces {
                    continue;
                }

                let end = run[count - 1].end();
                if followed_by_boilerplate(&text[end..]) {
                    continue;
                }

                return Some(text[run[0].start()..end].to_string());
            }
        }

        None
    }
}

fn preceded_by_label(before: &str) -> bool {
    let trimmed = before.trim_end();
    trimmed.len() < before.len()
        && EXCLUDED_PRECEDING_LABELS
            .iter()
            .any(|label| trimmed.ends_with(label))
}

fn followed_by_boilerplate(after: &str) -> bool {
    let trimmed = after.trim_start();
    trimmed.len() < after.len()
        && EXCLUDED_FOLLOWING_TOKENS
            .iter()
            .any(|token| trimmed.starts_with(token))
}

/// The default passport chain: MRZ, then capitalized words.
pub fn default_resolvers() -> Vec<Box<dyn NameResolver>> {
    vec![Box::new(MrzNameResolver), Box::new(CapitalizedNameResolver)]
}

/// Try resolvers in order; the first that yields a name wins.
pub fn resolve_name(resolvers: &[Box<dyn NameResolver>], text: &str) -> Option<String> {
    resolvers.iter().find_map(|resolver| {
        let name = resolver.resolve(text);
        match &name {
            Some(_) => debug!("Passport name resolved by {}", resolver.name()),
            None => debug!("Passport name resolver {} found nothing", resolver.name()),
        }
        name
    })
}
