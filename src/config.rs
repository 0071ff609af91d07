//! Presentation settings for serialized chains.

/// Configuration for pretty-printing an [`Output`](crate::Output).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrettyConfig {
    /// Written at the start of every line after the first.
    /// Default: empty
    pub prefix: String,

    /// Written once per nesting level.
    /// Default: two spaces
    pub indent: String,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            indent: "  ".to_string(),
        }
    }
}

impl PrettyConfig {
    /// Indent with the given string and no prefix.
    pub fn indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            ..Default::default()
        }
    }

    /// Set the line prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_two_spaces() {
        let config = PrettyConfig::default();
        assert_eq!(config.indent, "  ");
        assert!(config.prefix.is_empty());
    }

    #[test]
    fn test_builders() {
        let config = PrettyConfig::indent("\t").with_prefix("> ");
        assert_eq!(config.indent, "\t");
        assert_eq!(config.prefix, "> ");
    }
}
