//! Rephraser: turns a third-person verse into a first-person address.
//!
//! Applies a fixed, ordered sequence of whole-word, case-insensitive
//! substitutions converting divine references to first person, softens
//! audience phrasing, and prepends a randomly chosen greeting.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::verses::VerseRecord;

/// A verse together with its first-person rendering.
///
/// `reference` and `text` are carried through unmodified: the notification
/// payload needs the original and the recency tracker records the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RephrasedMessage {
    pub reference: String,
    pub text: String,
    pub rephrased: String,
}

/// Greeting prefixes, chosen uniformly at random.
pub const GREETINGS: [&str; 5] = [
    "My beloved child, ",
    "Dear one, ",
    "My precious child, ",
    "Beloved, ",
    "My dear one, ",
];

lazy_static! {
    /// Substitution rules in priority order. Later patterns must not re-match
    /// text produced by earlier ones, so first-person output ("I", "me",
    /// "my") is never a source word.
    static ref RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bGod\b").unwrap(), "I"),
        (Regex::new(r"(?i)\bthe Lord\b").unwrap(), "I"),
        (Regex::new(r"(?i)\bhe\b").unwrap(), "I"),
        (Regex::new(r"(?i)\bhim\b").unwrap(), "me"),
        (Regex::new(r"(?i)\bhis\b").unwrap(), "my"),
        (Regex::new(r"(?i)\bthose who\b").unwrap(), "you who"),
        (Regex::new(r"(?i)\bwhoever\b").unwrap(), "you who"),
    ];
}

/// Rephrase a verse as a direct first-person message.
///
/// Deterministic apart from the greeting choice, which comes from `rng`.
pub fn rephrase<R: Rng>(verse: &VerseRecord, rng: &mut R) -> RephrasedMessage {
    let mut body = verse.text.clone();
    for (pattern, replacement) in RULES.iter() {
        body = pattern.replace_all(&body, *replacement).into_owned();
    }

    // Upper-case the first character of the body, then prepend the greeting
    let mut chars = body.chars();
    if let Some(first) = chars.next() {
        body = first.to_uppercase().collect::<String>() + chars.as_str();
    }

    let greeting = GREETINGS[rng.gen_range(0..GREETINGS.len())];

    RephrasedMessage {
        reference: verse.reference.clone(),
        text: verse.text.clone(),
        rephrased: format!("{greeting}{body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn verse(reference: &str, text: &str) -> VerseRecord {
        VerseRecord {
            reference: reference.to_string(),
            text: text.to_string(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn body_of(msg: &RephrasedMessage) -> &str {
        GREETINGS
            .iter()
            .find_map(|g| msg.rephrased.strip_prefix(g))
            .expect("rephrased text must start with a greeting")
    }

    #[test]
    fn test_original_fields_preserved() {
        let v = verse("1 John 4:19", "We love because he first loved us.");
        let msg = rephrase(&v, &mut rng());
        assert_eq!(msg.reference, v.reference);
        assert_eq!(msg.text, v.text);
    }

    #[test]
    fn test_greeting_prefix_and_capitalization() {
        let v = verse("1 John 4:19", "we love because he first loved us.");
        let msg = rephrase(&v, &mut rng());
        let body = body_of(&msg);
        assert!(body.starts_with('W'), "body should be capitalized: {body}");
    }

    #[test]
    fn test_third_person_substitutions() {
        let v = verse(
            "John 3:16",
            "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life.",
        );
        let msg = rephrase(&v, &mut rng());
        let body = body_of(&msg);
        assert_eq!(
            body,
            "For I so loved the world that I gave my one and only Son, that you who believes in me shall not perish but have eternal life."
        );
    }

    #[test]
    fn test_the_lord_becomes_first_person() {
        let v = verse(
            "Nehemiah 8:10",
            "Do not grieve, for the joy of the Lord is your strength.",
        );
        let msg = rephrase(&v, &mut rng());
        assert_eq!(body_of(&msg), "Do not grieve, for the joy of I is your strength.");
    }

    #[test]
    fn test_those_who_softened() {
        let v = verse(
            "Isaiah 26:3",
            "You will keep in perfect peace those whose minds are steadfast.",
        );
        // "those whose" must not match the "those who" rule
        let msg = rephrase(&v, &mut rng());
        assert_eq!(
            body_of(&msg),
            "You will keep in perfect peace those whose minds are steadfast."
        );

        let v = verse("Isaiah 40:31", "But those who hope in the Lord will renew their strength.");
        let msg = rephrase(&v, &mut rng());
        assert_eq!(body_of(&msg), "But you who hope in I will renew their strength.");
    }

    #[test]
    fn test_no_standalone_third_person_words_remain() {
        let v = verse(
            "John 3:16",
            "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish.",
        );
        let msg = rephrase(&v, &mut rng());
        let body = body_of(&msg);
        for word in ["God", "Lord", "he", "him", "his", "whoever"] {
            let standalone = Regex::new(&format!(r"(?i)\b{word}\b")).unwrap();
            assert!(
                !standalone.is_match(body),
                "standalone '{word}' remained in: {body}"
            );
        }
    }

    #[test]
    fn test_words_inside_other_words_unaffected() {
        let v = verse("Test 1:1", "Theodore hears the shepherd and this history.");
        let msg = rephrase(&v, &mut rng());
        let body = body_of(&msg);
        assert!(body.contains("Theodore"));
        assert!(body.contains("shepherd"));
        assert!(body.contains("history"));
    }

    #[test]
    fn test_deterministic_given_seed() {
        let v = verse("Psalm 46:1", "God is our refuge and strength.");
        let a = rephrase(&v, &mut StdRng::seed_from_u64(9));
        let b = rephrase(&v, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_insensitive_match_at_sentence_start() {
        let v = verse("Psalm 46:1", "He is our refuge. THE LORD is with us.");
        let msg = rephrase(&v, &mut rng());
        assert_eq!(body_of(&msg), "I is our refuge. I is with us.");
    }
}
