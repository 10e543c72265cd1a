use crate::error::{LocScanError, Result};
use indexmap::IndexMap;
use regex::Regex;

/// Composite key to literal, in first-seen order.
pub type FileStrings = IndexMap<String, String>;

/// Matcher for call sites such as `L["text"]` or `AL('text')`.
///
/// The opening and closing brackets are matched independently, so
/// `L["text")` is accepted. Literals end at the first matching quote;
/// escaped quotes are not understood.
#[derive(Debug, Clone)]
pub struct LocalizationPattern {
    regex: Regex,
}

impl LocalizationPattern {
    pub fn new<S: AsRef<str>>(identifiers: &[S]) -> Result<Self> {
        if identifiers.is_empty() {
            return Err(LocScanError::config(
                "At least one identifier must be specified",
            ));
        }

        let alternation = identifiers
            .iter()
            .map(|ident| regex::escape(ident.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        // No back-references in `regex`, so each quote style gets its own branch.
        let pattern = format!(
            r#"({})\s*[\[(](?:"([^"\r\n]*)"|'([^'\r\n]*)')[\])]"#,
            alternation
        );

        let regex = Regex::new(&pattern).map_err(|e| {
            LocScanError::config(format!("Invalid identifier pattern: {}", e))
        })?;

        Ok(Self { regex })
    }

    pub fn extract(&self, content: &str) -> FileStrings {
        let mut strings = FileStrings::new();

        for caps in self.regex.captures_iter(content) {
            let ident = &caps[1];
            let literal = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());

            strings.insert(composite_key(ident, literal), literal.to_string());
        }

        strings
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

pub fn composite_key(ident: &str, literal: &str) -> String {
    format!("{}[\"{}\"]", ident, literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_pattern() -> LocalizationPattern {
        LocalizationPattern::new(&["L", "AL", "C"]).unwrap()
    }

    fn pairs(strings: &FileStrings) -> Vec<(&str, &str)> {
        strings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_mixed_bracket_and_quote_styles() {
        let strings = default_pattern().extract(r#"print(L["Hello"]) print(AL('World'))"#);

        assert_eq!(
            pairs(&strings),
            vec![(r#"L["Hello"]"#, "Hello"), (r#"AL["World"]"#, "World")]
        );
    }

    #[test]
    fn test_duplicates_collapse_in_first_position() {
        let content = r#"L["a"] L["b"] L('a') C["a"]"#;
        let strings = default_pattern().extract(content);

        assert_eq!(
            pairs(&strings),
            vec![(r#"L["a"]"#, "a"), (r#"L["b"]"#, "b"), (r#"C["a"]"#, "a")]
        );
    }

    #[test]
    fn test_whitespace_and_unpaired_brackets() {
        let content = "L  [\"spaced\"] L(\"mixed\"] C[\"x\")";
        let strings = default_pattern().extract(content);

        assert_eq!(
            pairs(&strings),
            vec![
                (r#"L["spaced"]"#, "spaced"),
                (r#"L["mixed"]"#, "mixed"),
                (r#"C["x"]"#, "x"),
            ]
        );
    }

    #[test]
    fn test_quote_must_match() {
        let strings = default_pattern().extract(r#"L["it's fine"] L['say "hi"'] L["bad']"#);

        assert_eq!(
            pairs(&strings),
            vec![
                (r#"L["it's fine"]"#, "it's fine"),
                (r#"L["say "hi""]"#, r#"say "hi""#),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_ends_literal() {
        let strings = default_pattern().extract(r#"L["say \"hi\""]"#);
        assert!(strings.is_empty());
    }

    #[test]
    fn test_literal_does_not_span_lines() {
        let strings = default_pattern().extract("L[\"first\nsecond\"]");
        assert!(strings.is_empty());
    }

    #[test]
    fn test_empty_literal_and_no_matches() {
        let strings = default_pattern().extract(r#"L[""]"#);
        assert_eq!(pairs(&strings), vec![(r#"L[""]"#, "")]);

        let strings = default_pattern().extract("local x = T[\"nope\"]\nprint(L.key)");
        assert!(strings.is_empty());
    }

    #[test]
    fn test_identifier_without_word_boundary() {
        // Call sites are not anchored, so `XL[...]` is seen as `L[...]`.
        let strings = default_pattern().extract(r#"XL["tail"]"#);
        assert_eq!(pairs(&strings), vec![(r#"L["tail"]"#, "tail")]);
    }

    #[test]
    fn test_identifiers_are_escaped() {
        let pattern = LocalizationPattern::new(&["ns.L"]).unwrap();
        let strings = pattern.extract(r#"ns.L["dot"] nsxL["no"]"#);
        assert_eq!(pairs(&strings), vec![(r#"ns.L["dot"]"#, "dot")]);
    }

    #[test]
    fn test_empty_identifier_list_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(LocalizationPattern::new(&empty).is_err());
    }
}
