//! Static content table mapping topic keywords to verse records.
//!
//! The table is compiled in; there is no Bible-text API. Lookup is
//! case-insensitive and unknown topics fall back to the default topic.

use rand::Rng;

/// A single verse: scripture reference plus NIV text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub reference: String,
    pub text: String,
}

struct TopicVerses {
    topic: &'static str,
    verses: &'static [(&'static str, &'static str)],
}

static VERSE_TABLE: &[TopicVerses] = &[
    TopicVerses {
        topic: "love",
        verses: &[
            (
                "John 3:16",
                "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life.",
            ),
            (
                "1 Corinthians 13:4-5",
                "Love is patient, love is kind. It does not envy, it does not boast, it is not proud. It does not dishonor others, it is not self-seeking, it is not easily angered, it keeps no record of wrongs.",
            ),
            ("1 John 4:19", "We love because he first loved us."),
            (
                "Romans 8:38-39",
                "For I am convinced that neither death nor life, neither angels nor demons, neither the present nor the future, nor any powers, neither height nor depth, nor anything else in all creation, will be able to separate us from the love of God that is in Christ Jesus our Lord.",
            ),
        ],
    },
    TopicVerses {
        topic: "peace",
        verses: &[
            (
                "Philippians 4:6-7",
                "Do not be anxious about anything, but in every situation, by prayer and petition, with thanksgiving, present your requests to God. And the peace of God, which transcends all understanding, will guard your hearts and your minds in Christ Jesus.",
            ),
            (
                "John 14:27",
                "Peace I leave with you; my peace I give you. I do not give to you as the world gives. Do not let your hearts be troubled and do not be afraid.",
            ),
            (
                "Isaiah 26:3",
                "You will keep in perfect peace those whose minds are steadfast, because they trust in you.",
            ),
            (
                "Romans 15:13",
                "May the God of hope fill you with all joy and peace as you trust in him, so that you may overflow with hope by the power of the Holy Spirit.",
            ),
        ],
    },
    TopicVerses {
        topic: "strength",
        verses: &[
            (
                "Philippians 4:13",
                "I can do all this through him who gives me strength.",
            ),
            (
                "Isaiah 40:31",
                "But those who hope in the Lord will renew their strength. They will soar on wings like eagles; they will run and not grow weary, they will walk and not be faint.",
            ),
            (
                "Psalm 46:1",
                "God is our refuge and strength, an ever-present help in trouble.",
            ),
            (
                "2 Corinthians 12:9",
                "But he said to me, \"My grace is sufficient for you, for my power is made perfect in weakness.\" Therefore I will boast all the more gladly about my weaknesses, so that Christ's power may rest on me.",
            ),
        ],
    },
    TopicVerses {
        topic: "hope",
        verses: &[
            (
                "Jeremiah 29:11",
                "For I know the plans I have for you, declares the Lord, plans to prosper you and not to harm you, plans to give you hope and a future.",
            ),
            (
                "Romans 15:13",
                "May the God of hope fill you with all joy and peace as you trust in him, so that you may overflow with hope by the power of the Holy Spirit.",
            ),
            (
                "Psalm 42:5",
                "Why, my soul, are you downcast? Why so disturbed within me? Put your hope in God, for I will yet praise him, my Savior and my God.",
            ),
            (
                "Hebrews 11:1",
                "Now faith is confidence in what we hope for and assurance about what we do not see.",
            ),
        ],
    },
    TopicVerses {
        topic: "faith",
        verses: &[
            (
                "Hebrews 11:1",
                "Now faith is confidence in what we hope for and assurance about what we do not see.",
            ),
            (
                "Matthew 17:20",
                "He replied, \"Because you have so little faith. Truly I tell you, if you have faith as small as a mustard seed, you can say to this mountain, 'Move from here to there,' and it will move. Nothing will be impossible for you.\"",
            ),
            (
                "Proverbs 3:5-6",
                "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight.",
            ),
            (
                "Romans 10:17",
                "Consequently, faith comes from hearing the message, and the message is heard through the word about Christ.",
            ),
        ],
    },
    TopicVerses {
        topic: "joy",
        verses: &[
            (
                "Nehemiah 8:10",
                "Do not grieve, for the joy of the Lord is your strength.",
            ),
            (
                "Psalm 16:11",
                "You make known to me the path of life; you will fill me with joy in your presence, with eternal pleasures at your right hand.",
            ),
            (
                "John 15:11",
                "I have told you this so that my joy may be in you and that your joy may be complete.",
            ),
            (
                "Romans 15:13",
                "May the God of hope fill you with all joy and peace as you trust in him, so that you may overflow with hope by the power of the Holy Spirit.",
            ),
        ],
    },
    TopicVerses {
        topic: "guidance",
        verses: &[
            (
                "Proverbs 3:5-6",
                "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight.",
            ),
            (
                "Psalm 32:8",
                "I will instruct you and teach you in the way you should go; I will counsel you with my loving eye on you.",
            ),
            (
                "James 1:5",
                "If any of you lacks wisdom, you should ask God, who gives generously to all without finding fault, and it will be given to you.",
            ),
            (
                "Isaiah 30:21",
                "Whether you turn to the right or to the left, your ears will hear a voice behind you, saying, \"This is the way; walk in it.\"",
            ),
        ],
    },
    TopicVerses {
        topic: "comfort",
        verses: &[
            (
                "2 Corinthians 1:3-4",
                "Praise be to the God and Father of our Lord Jesus Christ, the Father of compassion and the God of all comfort, who comforts us in all our troubles, so that we can comfort those in any trouble with the comfort we ourselves receive from God.",
            ),
            (
                "Psalm 23:4",
                "Even though I walk through the darkest valley, I will fear no evil, for you are with me; your rod and your staff, they comfort me.",
            ),
            (
                "Matthew 11:28",
                "Come to me, all you who are weary and burdened, and I will give you rest.",
            ),
            (
                "Isaiah 41:10",
                "So do not fear, for I am with you; do not be dismayed, for I am your God. I will strengthen you and help you; I will uphold you with my righteous right hand.",
            ),
        ],
    },
];

/// Look up the verse list for a topic, case-insensitively.
/// Unknown topics fall back to `fallback`'s list, then to the first entry.
fn verses_for(topic: &str, fallback: &str) -> &'static [(&'static str, &'static str)] {
    VERSE_TABLE
        .iter()
        .find(|t| t.topic.eq_ignore_ascii_case(topic))
        .or_else(|| {
            VERSE_TABLE
                .iter()
                .find(|t| t.topic.eq_ignore_ascii_case(fallback))
        })
        .or_else(|| VERSE_TABLE.first())
        .map(|t| t.verses)
        .unwrap_or(&[])
}

/// Select one verse for a topic, avoiding the given references when possible.
///
/// Unknown topics use the built-in default topic's list; see
/// [`select_verse_with_fallback`] for a configurable fallback.
pub fn select_verse<R: Rng>(topic: &str, excluding: &[String], rng: &mut R) -> VerseRecord {
    select_verse_with_fallback(topic, manna_core::constants::DEFAULT_TOPIC, excluding, rng)
}

/// Select one verse for a topic, falling back to `fallback`'s list when the
/// topic is unknown.
///
/// If every verse of the topic is excluded, the exclusion is ignored for this
/// call and selection degrades to a uniform pick over the full list. Never
/// fails: an unknown fallback degrades to the first topic in the table.
pub fn select_verse_with_fallback<R: Rng>(
    topic: &str,
    fallback: &str,
    excluding: &[String],
    rng: &mut R,
) -> VerseRecord {
    let all = verses_for(topic, fallback);
    let available: Vec<&(&str, &str)> = all
        .iter()
        .filter(|(reference, _)| !excluding.iter().any(|e| e == reference))
        .collect();

    let pool: Vec<&(&str, &str)> = if available.is_empty() {
        all.iter().collect()
    } else {
        available
    };

    // pool is never empty: the table has no empty topic lists
    let (reference, text) = *pool[rng.gen_range(0..pool.len())];
    VerseRecord {
        reference: reference.to_string(),
        text: text.to_string(),
    }
}

/// All available topic keywords, capitalized for display.
pub fn available_topics() -> Vec<String> {
    VERSE_TABLE
        .iter()
        .map(|t| {
            let mut chars = t.topic.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Number of verses available for a topic (after the default-topic fallback).
pub fn verse_count(topic: &str) -> usize {
    verses_for(topic, manna_core::constants::DEFAULT_TOPIC).len()
}

/// References of every verse for a topic, for exclusion bookkeeping and tests.
pub fn references_for(topic: &str) -> Vec<String> {
    verses_for(topic, manna_core::constants::DEFAULT_TOPIC)
        .iter()
        .map(|(reference, _)| reference.to_string())
        .collect()
}
