use regex::Regex;

/// Loose RFC 822 address after the bounce marker, with or without angle
/// brackets. Group 1 holds the address.
const FINAL_RECIPIENT_PATTERN: &str =
    r"(?i)Final-Recipient:\s*rfc822;\s*<?\s*([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})\s*>?";

/// RFC 5322 folded header continuation: a line break followed by leading
/// whitespace belongs to the previous header line.
const FOLDED_LINE_PATTERN: &str = r"\r?\n[ \t]+";

pub struct AddressExtractor {
    recipient: Regex,
    folded_line: Regex,
}

impl AddressExtractor {
    pub fn new() -> Self {
        Self {
            recipient: Regex::new(FINAL_RECIPIENT_PATTERN)
                .expect("final recipient regex should compile"),
            folded_line: Regex::new(FOLDED_LINE_PATTERN)
                .expect("folded line regex should compile"),
        }
    }

    /// Collapse folded header lines so a wrapped Final-Recipient header
    /// matches as a single line.
    pub fn unfold_headers(&self, text: &str) -> String {
        self.folded_line.replace_all(text, " ").into_owned()
    }

    /// All addresses reported after a Final-Recipient marker, in document
    /// order, duplicates included.
    pub fn extract_addresses(&self, text: &str) -> Vec<String> {
        let unfolded = self.unfold_headers(text);
        self.recipient
            .captures_iter(&unfolded)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}
