use regex::Regex;

/// Selects the part of the resolved node name that ends up in the Pod name.
///
/// The `Pattern` variant keeps the first capture group of the expression,
/// or the whole match when the expression has no groups. It is only active
/// when explicitly configured; the default passes node names through.
#[derive(Clone, Debug, Default)]
pub enum NodeNameFilter {
    #[default]
    Identity,
    Pattern(Regex),
}

impl NodeNameFilter {
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(NodeNameFilter::Pattern)
    }

    /// Returns `None` when the pattern does not select a non-empty part of
    /// `node_name`, including when the first group of a matching pattern
    /// did not take part in the match.
    pub fn apply<'a>(&self, node_name: &'a str) -> Option<&'a str> {
        match self {
            NodeNameFilter::Identity => Some(node_name),
            NodeNameFilter::Pattern(regex) => {
                let captures = regex.captures(node_name)?;
                // Group 0 is the whole match.
                let group = if regex.captures_len() > 1 { 1 } else { 0 };
                captures
                    .get(group)
                    .map(|selected| selected.as_str())
                    .filter(|selected| !selected.is_empty())
            }
        }
    }
}
