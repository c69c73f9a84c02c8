use crate::text::TextNormalizer;

impl TextNormalizer {
    /// Splits already-normalized text on non-alphanumeric boundaries and
    /// drops stop-words. Purely numeric tokens are always kept, since they
    /// may be house numbers or codes.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|ch: char| !ch.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .filter(|token| is_numeric(token) || !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    /// Street name without the via-type prefix: `Calle Mayor` and
    /// `Avenida Mayor` both reduce to `MAYOR`.
    pub fn street_core(&self, raw_street: &str) -> String {
        self.tokenize(&self.normalize(raw_street))
            .into_iter()
            .filter(|token| !self.via_words.contains(&token.to_uppercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(&token.to_uppercase())
    }
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(|ch| ch.is_ascii_digit())
}
