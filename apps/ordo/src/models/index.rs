//! Index schema: lists the rules that bind file patterns to ordering policies.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
/// Top-level index configuration.
pub struct Index {
    #[serde(default)]
    pub rules: Vec<RuleIndex>,
}

#[derive(Deserialize, Debug, Clone)]
/// A lint/format rule entry from the index.
pub struct RuleIndex {
    pub id: String,
    pub patterns: Vec<String>,
    /// Policy TOML path, relative to the index file.
    pub policy: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_parses_rules() {
        let ix: Index = toml::from_str(
            r#"
[[rules]]
id = "classes"
patterns = ["sequences/**/*.json"]
policy = "policies/classes.toml"
"#,
        )
        .unwrap();
        assert_eq!(ix.rules.len(), 1);
        assert_eq!(ix.rules[0].policy, "policies/classes.toml");
        let empty: Index = toml::from_str("").unwrap();
        assert!(empty.rules.is_empty());
    }
}
