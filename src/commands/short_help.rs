//! One-line summaries of help text

/// Marks the start of a preformatted block that must not be reflowed
pub const RAW_BLOCK_MARKER: char = '\u{8}';

/// Default width of a derived summary
pub const SHORT_HELP_LIMIT: usize = 45;

const ELLIPSIS: &str = "...";

/// Summarize `help` in at most `max_length` characters.
///
/// Only the first paragraph is considered. The summary ends after the first
/// sentence if that fits, otherwise words are dropped until the text and a
/// trailing `...` fit.
#[must_use]
pub fn default_short_help(help: &str, max_length: usize) -> String {
    let paragraph = help.find("\n\n").map_or(help, |end| &help[..end]);
    let mut words: Vec<&str> = paragraph.split_whitespace().collect();
    if words
        .first()
        .is_some_and(|w| w.len() == 1 && w.starts_with(RAW_BLOCK_MARKER))
    {
        words.remove(0);
    }
    if words.is_empty() {
        return String::new();
    }

    let last_index = words.len() - 1;
    let mut total_length = 0;
    let mut cut = None;
    for (i, word) in words.iter().enumerate() {
        total_length += word.chars().count() + usize::from(i > 0);
        if total_length > max_length {
            cut = Some(i);
            break;
        }
        if word.ends_with('.') {
            return words[..=i].join(" ");
        }
        if total_length == max_length && i != last_index {
            cut = Some(i);
            break;
        }
    }
    let Some(mut i) = cut else {
        return words.join(" ");
    };

    total_length += ELLIPSIS.len();
    while i > 0 {
        total_length -= words[i].chars().count() + usize::from(i > 0);
        if total_length <= max_length {
            break;
        }
        i -= 1;
    }
    format!("{}{ELLIPSIS}", words[..i].join(" "))
}

/// Summary line for a node: the explicit short help if declared, else one
/// derived from the full help.
#[must_use]
pub fn summary(short_help: Option<&str>, help: Option<&str>, deprecated: bool) -> String {
    let text = match (short_help, help) {
        (Some(short), _) => short.trim().to_string(),
        (None, Some(help)) => default_short_help(help, SHORT_HELP_LIMIT),
        (None, None) => String::new(),
    };
    if deprecated {
        format!("(Deprecated) {text}").trim().to_string()
    } else {
        text
    }
}

/// Cut `text` at the first raw block marker
#[must_use]
pub fn strip_raw_block(text: &str) -> &str {
    text.split(RAW_BLOCK_MARKER).next().unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentence_ends_summary() {
        assert_eq!(
            default_short_help("Process a folder. Then more words follow.", 45),
            "Process a folder."
        );
    }

    #[test]
    fn test_short_help_without_period_is_kept_whole() {
        assert_eq!(
            default_short_help("Command with text and number inputs", 45),
            "Command with text and number inputs"
        );
    }

    #[test]
    fn test_long_help_is_cut_with_ellipsis() {
        let help = "Just print unicode message\nThis helptext contains html and <b>should \
                    be escaped</b> so the actual tag should be showing.\n\n\u{8}\nThis is a \
                    help block";
        assert_eq!(
            default_short_help(help, 45),
            "Just print unicode message This helptext..."
        );
    }

    #[test]
    fn test_only_first_paragraph_counts() {
        assert_eq!(default_short_help("A sub group\n\nMore.", 45), "A sub group");
    }

    #[test]
    fn test_leading_marker_word_dropped() {
        assert_eq!(
            default_short_help("\u{8}\nkeep this layout", 45),
            "keep this layout"
        );
        assert_eq!(default_short_help("\u{8}", 45), "");
        assert_eq!(default_short_help("   ", 45), "");
    }

    #[test]
    fn test_exact_limit_with_more_words() {
        // "aaaa bbbb" is 9 chars; a following word forces the ellipsis
        assert_eq!(default_short_help("aaaa bbbb cccc", 9), "aaaa...");
        assert_eq!(default_short_help("aaaa bbbb", 9), "aaaa bbbb");
    }

    #[test]
    fn test_summary_prefers_explicit_short_help() {
        assert_eq!(
            summary(Some("  Short one  "), Some("Long help. With more."), false),
            "Short one"
        );
        assert_eq!(summary(None, Some("Long help. With more."), false), "Long help.");
        assert_eq!(summary(None, None, false), "");
    }

    #[test]
    fn test_summary_marks_deprecated() {
        assert_eq!(summary(None, Some("Old stuff"), true), "(Deprecated) Old stuff");
        assert_eq!(summary(None, None, true), "(Deprecated)");
    }

    #[test]
    fn test_strip_raw_block() {
        assert_eq!(
            strip_raw_block("Prints rows.\u{8}Detailed block follows"),
            "Prints rows."
        );
        assert_eq!(strip_raw_block("No marker here"), "No marker here");
        assert_eq!(strip_raw_block("\u{8}all raw"), "");
    }
}
