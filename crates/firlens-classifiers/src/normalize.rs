//! Text normalization: lowercasing, ASCII word extraction, stopword removal
//! and light suffix stemming.

/// Closed stopword list applied before stemming
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "on", "in", "at", "to", "from",
    "by", "for", "of", "with", "without", "about", "as", "into", "like", "through", "over",
    "after", "before", "between", "under", "above", "not", "no", "nor", "be", "is", "are", "was",
    "were", "am", "been", "being", "do", "does", "did", "doing", "have", "has", "had", "having",
    "can", "could", "should", "would", "may", "might", "must", "will", "shall", "you", "your",
    "yours", "me", "my", "mine", "we", "our", "ours", "they", "their", "theirs", "he", "she",
    "it", "this", "that", "these", "those",
];

/// Normalize free text into an ordered token sequence.
///
/// Order and duplicates are preserved. Anything that is not an ASCII letter
/// separates words and is otherwise discarded.
pub fn preprocess(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    lower
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|word| !word.is_empty() && !is_stopword(word))
        .map(stem)
        .collect()
}

/// Check a lowercase word against the stopword list
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Strip a single suffix; the first matching rule wins.
pub fn stem(word: &str) -> String {
    let len = word.len();

    if word.ends_with("ing") && len > 5 {
        word[..len - 3].to_string()
    } else if word.ends_with("ed") && len > 4 {
        word[..len - 2].to_string()
    } else if word.ends_with("ly") && len > 4 {
        word[..len - 2].to_string()
    } else if word.ends_with("ies") && len > 5 {
        format!("{}y", &word[..len - 3])
    } else if word.ends_with("es") && len > 4 {
        word[..len - 2].to_string()
    } else if word.ends_with('s') && len > 3 {
        word[..len - 1].to_string()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_removes_stopwords() {
        assert_eq!(
            preprocess("My phone was stolen from the bus"),
            vec!["phone", "stolen", "bus"]
        );
    }

    #[test]
    fn test_preprocess_drops_digits_and_punctuation() {
        assert_eq!(
            preprocess("Car#2 theft, 11pm!!"),
            vec!["car", "theft", "pm"]
        );
        assert!(preprocess("").is_empty());
        assert!(preprocess("123 -- 456").is_empty());
    }

    #[test]
    fn test_preprocess_non_ascii_is_separator() {
        assert_eq!(preprocess("café theft"), vec!["caf", "theft"]);
    }

    #[test]
    fn test_preprocess_keeps_duplicates_in_order() {
        assert_eq!(
            preprocess("theft theft robbery"),
            vec!["theft", "theft", "robbery"]
        );
    }

    #[test]
    fn test_stem_rule_priority() {
        assert_eq!(stem("searching"), "search");
        assert_eq!(stem("thing"), "thing");
        assert_eq!(stem("threatened"), "threaten");
        assert_eq!(stem("used"), "used");
        assert_eq!(stem("apply"), "app");
        assert_eq!(stem("only"), "only");
        assert_eq!(stem("injuries"), "injury");
        assert_eq!(stem("ties"), "tie");
        assert_eq!(stem("boxes"), "box");
        assert_eq!(stem("goes"), "goe");
        assert_eq!(stem("calls"), "call");
        assert_eq!(stem("bus"), "bus");
        assert_eq!(stem("address"), "addres");
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let text = "Pickpocketing incident reported near the market";
        assert_eq!(preprocess(text), preprocess(text));
        assert_eq!(
            preprocess(text),
            vec!["pickpocket", "incident", "report", "near", "market"]
        );
    }
}
