use std::sync::LazyLock;

use regex::Regex;

const MARK: &str = "**";

// Applied in order. Each pass sees the output of the previous one.
static METRIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Percentages: 60%, 12.5%
        r"\b[0-9]{1,3}(?:[.,][0-9]+)?%",
        // Years: 1999, 2024
        r"\b(?:19|20)[0-9]{2}\b",
        // Counts with a plus: 200+, 1,000+
        r"\b[0-9][0-9,]*\+",
        // Durations: 5 minutes, 5-7 mins, 2 hours
        r"(?i)\b[0-9]+(?:[–-][0-9]+)?\s?(?:mins?|minutes?|hours?)\b",
        // Other large numbers: 30000
        r"\b[0-9]{4,}\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("metric pattern"))
    .collect()
});

/// Wraps bare metrics of a reply in Markdown bold markers.
///
/// A match already touching `**` on either side is left alone. Passes are
/// repeated until nothing changes, so the transform is idempotent.
pub fn emphasize_metrics(text: &str) -> String {
    let mut text = text.to_owned();
    // Each pass only inserts markers, and a wrapped match is skipped from
    // then on, so this reaches a fixed point.
    loop {
        let next = emphasize_once(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn emphasize_once(text: &str) -> String {
    METRIC_PATTERNS
        .iter()
        .fold(text.to_owned(), |text, pattern| wrap_matches(pattern, &text))
}

fn wrap_matches(pattern: &Regex, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let emphasized = text[..m.start()].ends_with(MARK)
            || text[m.end()..].starts_with(MARK);
        if emphasized {
            out.push_str(m.as_str());
        } else {
            out.push_str(MARK);
            out.push_str(m.as_str());
            out.push_str(MARK);
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SAMPLES: &[&str] = &[
        "I grew the user base by 200+ in 2024",
        "About 60% of founders, 11 out of 15, and 12.5% more.",
        "Onboarding took 5-7 minutes, sometimes 5–7 mins or 2 hours.",
        "30,000+ students, 30000 visits, 1,000 views, since 1999.",
        "Already **200+** and **2024** here, plus 2024%.",
        "Edge cases: 1,2024+ 2024-25 hours 20245 a2024 **2024** 2024**",
        "**2024**1,00019,200+",
        "",
        "No numbers at all.",
    ];

    #[test]
    fn test_example_sentence() {
        let once = emphasize_metrics("I grew the user base by 200+ in 2024");
        assert_eq!(once, "I grew the user base by **200+** in **2024**");
        assert_eq!(emphasize_metrics(&once), once);
    }

    #[test]
    fn test_patterns() {
        assert_eq!(
            emphasize_metrics("About 60% of founders"),
            "About **60%** of founders"
        );
        assert_eq!(
            emphasize_metrics("spent 5-7 minutes in onboarding"),
            "spent **5-7 minutes** in onboarding"
        );
        assert_eq!(
            emphasize_metrics("helping 30,000+ students"),
            "helping **30,000+** students"
        );
        assert_eq!(
            emphasize_metrics("a 5-day feature took 3 days"),
            "a 5-day feature took 3 days"
        );
        assert_eq!(emphasize_metrics("over 12345 visits"), "over **12345** visits");
    }

    #[test]
    fn test_skips_emphasized_spans() {
        let text = "FounderMatch launched in **April 2024** with **200+** users";
        assert_eq!(emphasize_metrics(text), text);
    }

    #[test]
    fn test_run_together_numbers() {
        assert_eq!(
            emphasize_metrics("**2024**1,00019,200+"),
            "**2024**1,**00019**,**200+**"
        );
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = emphasize_metrics(sample);
            assert_eq!(emphasize_metrics(&once), once, "sample: {sample:?}");
        }
    }

    const WORDS: &[&str] = &[
        "2024", "1999", "(2023)", "200+", "1,000+", "60%", "12.5%", "5-7",
        "5–7", "5", "minutes", "mins", "hours", "**2024**", "**200+**",
        "30000", "3,500", "users", "grew", "by", "in", "a",
    ];

    proptest! {
        #[test]
        fn test_idempotent_on_word_sequences(
            words in prop::collection::vec(prop::sample::select(WORDS), 0..12),
        ) {
            let text = words.join(" ");
            let once = emphasize_metrics(&text);
            prop_assert_eq!(emphasize_metrics(&once), once);
        }

        #[test]
        fn test_idempotent_on_arbitrary_text(text in "[0-9,+% *a-z.–-]{0,32}") {
            let once = emphasize_metrics(&text);
            prop_assert_eq!(emphasize_metrics(&once), once);
        }
    }
}
