use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Lowercased, de-duplicated tokens of a selector or header.
pub type TokenSet = BTreeSet<String>;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Split on non-alphanumeric runs and camelCase boundaries, then lowercase.
///
/// `#firstName` gives `{first, name}`; `[name="HTTPProxy_port"]` gives
/// `{name, http, proxy, port}`.
pub fn tokenize(input: &str) -> TokenSet {
    SEPARATOR_RE
        .split(input)
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_camel_case)
        .map(|word| word.to_lowercase())
        .collect()
}

fn split_camel_case(chunk: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (idx, current) = chars[i];
        let previous = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);

        let lower_to_upper = current.is_ascii_uppercase()
            && (previous.is_ascii_lowercase() || previous.is_ascii_digit());
        // Last capital of an acronym starts the next word: "HTMLParser".
        let acronym_end = current.is_ascii_uppercase()
            && previous.is_ascii_uppercase()
            && next.is_some_and(|c| c.is_ascii_lowercase());

        if lower_to_upper || acronym_end {
            words.push(&chunk[start..idx]);
            start = idx;
        }
    }

    words.push(&chunk[start..]);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        tokenize(input).into_iter().collect()
    }

    #[test]
    fn test_splits_on_punctuation_and_lowercases() {
        assert_eq!(tokens("First Name"), vec!["first", "name"]);
        assert_eq!(tokens("[name=\"e-mail\"]"), vec!["e", "mail", "name"]);
        assert_eq!(tokens("  --  "), Vec::<String>::new());
    }

    #[test]
    fn test_splits_camel_case() {
        assert_eq!(tokens("#firstName"), vec!["first", "name"]);
        assert_eq!(tokens("HTTPProxyPort"), vec!["http", "port", "proxy"]);
        assert_eq!(tokens("address2Line"), vec!["address2", "line"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(tokens("name_Name NAME"), vec!["name"]);
    }
}
