/// Code point ranges (inclusive) treated as emoji in place names: emoticons,
/// pictographs, transport, regional-indicator flags, miscellaneous symbols,
/// dingbats, variation selectors, and a handful of standalone symbols
/// (©, ®, ™, ⭐, ...).
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F1E0, 0x1F1FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0x1F900, 0x1F9FF),
    (0x1FA70, 0x1FAFF),
    (0xFE00, 0xFE0F),
    (0x1F004, 0x1F004),
    (0x1F0CF, 0x1F0CF),
    (0x1F18E, 0x1F18E),
    (0x3030, 0x3030),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x2B1B, 0x2B1C),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x303D, 0x303D),
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x2122, 0x2122),
    (0x23F3, 0x23F3),
    (0x24C2, 0x24C2),
    (0x23E9, 0x23EF),
    (0x25B6, 0x25B6),
    (0x23F8, 0x23FA),
];

fn is_emoji(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Whether `text` contains any code point from the emoji block list.
#[must_use]
pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_emoji() {
        assert!(contains_emoji("☕ Joe's Cafe"));
        assert!(contains_emoji("Pizza 🍕"));
        assert!(contains_emoji("Taco Shop 🌮🌮"));
        assert!(contains_emoji("🇺🇸 Diner"));
        assert!(contains_emoji("Best Burgers ⭐"));
    }

    #[test]
    fn detects_trademark_symbols() {
        assert!(contains_emoji("Acme™ Hardware"));
        assert!(contains_emoji("Acme® Hardware"));
    }

    #[test]
    fn plain_and_accented_text_is_clean() {
        assert!(!contains_emoji("Joe's Cafe"));
        assert!(!contains_emoji("Café Crème & Co."));
        assert!(!contains_emoji("東京ラーメン"));
        assert!(!contains_emoji(""));
    }
}
