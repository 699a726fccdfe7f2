use regex::Regex;

/// Numeric-looking tokens: optional leading dollar sign, digit groups with
/// optional comma separators, optional decimal fraction, optional trailing
/// percent sign. Currency amounts, percentages, and plain counts are one
/// category; the consuming audit step works on the verbatim strings.
const NUMBER_PATTERN: &str = r"\$?[\d,]+\.?\d*%?";

/// Scans slide text for numeric tokens, preserving surface formatting.
#[derive(Debug, Clone)]
pub struct NumberScanner {
    pattern: Regex,
}

impl NumberScanner {
    pub fn new() -> Self {
        Self {
            // The pattern is a fixed literal; compilation cannot fail.
            pattern: Regex::new(NUMBER_PATTERN).expect("valid number pattern"),
        }
    }

    /// Every non-overlapping match, verbatim and in text order.
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for NumberScanner {
    fn default() -> Self {
        Self::new()
    }
}
