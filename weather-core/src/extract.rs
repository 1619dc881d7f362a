//! Best-effort city extraction from free-text chat messages.
//!
//! This is a heuristic, not a correctness-bearing algorithm: it tries a
//! small ordered set of phrasing patterns, then falls back to scanning
//! tokens for capitalized words or well-known city names. Callers must
//! treat `None` as "ask the user", never as an error.

use std::sync::LazyLock;

use regex::Regex;

/// Phrasing patterns, most specific first. The first capturing group is the
/// city candidate.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "weather in X", "forecast for X", "temperature at X"
        r"(?i)\b(?:weather|forecast|temperature)\s+(?:like\s+)?(?:in|for|at)\s+([\w\s'-]+)",
        // "how's it in X", "how is the weather in X"
        r"(?i)\bhow(?:'s| is)\s+(?:it|the\s+weather)\s+in\s+([\w\s'-]+)",
        // "X weather" / "X forecast" with a capitalized city up front
        r"^([A-Z][\w'-]*(?:\s+[A-Z][\w'-]*)*)\s+(?:[Ww]eather|[Ff]orecast)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static city pattern"))
    .collect()
});

/// Words that end a city candidate: time qualifiers and connectives that
/// follow the city in common phrasings.
const TRAILING_STOPWORDS: &[&str] = &[
    "today", "tomorrow", "tonight", "now", "please", "right", "this", "next", "week", "currently",
    "for", "in", "on", "at", "over", "during", "the", "a", "an",
];

/// Message tokens that are capitalized in ordinary questions but are never
/// city names.
const CAPITALIZED_NOISE: &[&str] = &[
    "what", "whats", "what's", "the", "is", "it", "weather", "forecast", "tell", "me", "please",
    "how", "hows", "how's", "in", "for", "at", "give", "show", "will", "be", "like", "today",
    "tomorrow", "can", "you", "i", "need",
];

/// Lowercase fallback vocabulary for messages with no capitalization.
const KNOWN_CITIES: &[&str] = &[
    "london", "paris", "tokyo", "delhi", "mumbai", "kolkata", "chennai", "bengaluru", "new york",
    "los angeles", "chicago", "sydney", "singapore", "berlin", "madrid", "moscow", "dubai",
    "toronto", "amsterdam", "istanbul", "seoul",
];

/// Extract a best-guess city name from a natural-language message.
pub fn extract_city(message: &str) -> Option<String> {
    for pattern in PATTERNS.iter() {
        if let Some(city) =
            pattern.captures(message).and_then(|caps| clean_candidate(caps.get(1)?.as_str()))
        {
            return Some(city);
        }
    }
    fallback_scan(message)
}

/// Trim a raw capture down to the city words: skip leading articles, cut at
/// the first stopword, strip punctuation.
fn clean_candidate(candidate: &str) -> Option<String> {
    let mut words: Vec<&str> = Vec::new();
    for word in candidate.split_whitespace() {
        let bare = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-');
        if bare.is_empty() {
            break;
        }
        let lower = bare.to_lowercase();
        if words.is_empty() && matches!(lower.as_str(), "the" | "a" | "an") {
            continue;
        }
        if TRAILING_STOPWORDS.contains(&lower.as_str()) {
            break;
        }
        words.push(bare);
    }

    if words.is_empty() { None } else { Some(words.join(" ")) }
}

/// Token scan: known city names first (covers all-lowercase messages), then
/// the first capitalized token that is not question noise.
fn fallback_scan(message: &str) -> Option<String> {
    let tokens: Vec<&str> = message
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|w| !w.is_empty())
        .collect();

    // Two-token window first so "new york" beats "york".
    for window in tokens.windows(2) {
        let joined = format!("{} {}", window[0], window[1]).to_lowercase();
        if KNOWN_CITIES.contains(&joined.as_str()) {
            return Some(title_case_words(&joined));
        }
    }
    for token in &tokens {
        if KNOWN_CITIES.contains(&token.to_lowercase().as_str()) {
            return Some(title_case_words(token));
        }
    }

    tokens
        .iter()
        .find(|t| {
            t.chars().next().is_some_and(char::is_uppercase)
                && !CAPITALIZED_NOISE.contains(&t.to_lowercase().as_str())
        })
        .map(|t| title_case_words(t))
}

fn title_case_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_weather_in_phrasing() {
        assert_eq!(extract_city("what's the weather like in Paris?"), Some("Paris".into()));
        assert_eq!(extract_city("weather in New York today"), Some("New York".into()));
        assert_eq!(extract_city("forecast for Tokyo"), Some("Tokyo".into()));
    }

    #[test]
    fn extracts_from_city_first_phrasing() {
        assert_eq!(extract_city("London weather"), Some("London".into()));
        assert_eq!(extract_city("New York forecast please"), Some("New York".into()));
    }

    #[test]
    fn extracts_from_how_is_it_phrasing() {
        assert_eq!(extract_city("how's it in Berlin?"), Some("Berlin".into()));
    }

    #[test]
    fn regex_captures_are_trimmed_not_recased() {
        // The pattern path reports what the user typed.
        assert_eq!(extract_city("weather in paris"), Some("paris".into()));
    }

    #[test]
    fn lowercase_known_cities_are_title_cased() {
        assert_eq!(extract_city("give me mumbai conditions"), Some("Mumbai".into()));
        assert_eq!(extract_city("is it raining in new york right now"), Some("New York".into()));
    }

    #[test]
    fn capitalized_token_fallback_skips_question_noise() {
        assert_eq!(extract_city("Will it rain in Reykjavik"), Some("Reykjavik".into()));
    }

    #[test]
    fn no_city_yields_none() {
        assert_eq!(extract_city("weather"), None);
        assert_eq!(extract_city("what's the weather"), None);
        assert_eq!(extract_city("is it raining"), None);
        assert_eq!(extract_city(""), None);
    }

    #[test]
    fn trailing_words_are_cut_at_stopwords() {
        assert_eq!(extract_city("weather in Paris tomorrow please"), Some("Paris".into()));
        assert_eq!(
            extract_city("weather in Paris for the next few days"),
            Some("Paris".into())
        );
    }
}
