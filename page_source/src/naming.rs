//! File naming convention for numbered page images.

use serde::Deserialize;

/// Name patterns and extensions tried, in order, for every page number.
///
/// A pattern contains one `{n}` placeholder, optionally zero-padded as
/// `{n:02}` or `{n:03}`. Every pattern is combined with every extension, so
/// the default scheme probes `page-7.jpg`, `page-7.jpeg`, ... `page-007.webp`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingScheme {
    pub patterns: Vec<String>,
    pub extensions: Vec<String>,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            patterns: vec![
                "page-{n}".to_string(),
                "page-{n:02}".to_string(),
                "page-{n:03}".to_string(),
            ],
            extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl NamingScheme {
    /// All candidate file names for `page`, in probe order, without duplicates.
    pub fn file_names(&self, page: usize) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for pattern in &self.patterns {
            let stem = expand_pattern(pattern, page);
            for ext in &self.extensions {
                let name = format!("{}.{}", stem, ext.trim_start_matches('.'));
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Replace the `{n}` / `{n:0W}` placeholder in `pattern` with `page`.
/// Patterns without a placeholder are returned unchanged.
fn expand_pattern(pattern: &str, page: usize) -> String {
    let Some(open) = pattern.find("{n") else {
        return pattern.to_string();
    };
    let Some(close) = pattern[open..].find('}').map(|c| open + c) else {
        return pattern.to_string();
    };

    let spec = &pattern[open + 2..close];
    let number = match spec.strip_prefix(':') {
        Some(width) => {
            let width: usize = width.trim_start_matches('0').parse().unwrap_or(0);
            format!("{:0width$}", page, width = width)
        }
        None => page.to_string(),
    };

    format!("{}{}{}", &pattern[..open], number, &pattern[close + 1..])
}
