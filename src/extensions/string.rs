pub trait TokenPrefix {
    /// If `self` begins with the whole token `head` (followed by whitespace or
    /// nothing), returns what comes after it.
    fn strip_token(&self, head: &str) -> Option<&str>;

    /// Non-empty and free of whitespace, so it survives a whitespace split.
    fn is_single_token(&self) -> bool;
}

impl TokenPrefix for str {
    fn strip_token(&self, head: &str) -> Option<&str> {
        let rest = self.strip_prefix(head)?;
        match rest.chars().next() {
            None => Some(rest),
            Some(c) if c.is_whitespace() => Some(rest),
            Some(_) => None,
        }
    }

    fn is_single_token(&self) -> bool {
        !self.is_empty() && !self.chars().any(char::is_whitespace)
    }
}

impl TokenPrefix for String {
    fn strip_token(&self, head: &str) -> Option<&str> {
        self.as_str().strip_token(head)
    }

    fn is_single_token(&self) -> bool {
        self.as_str().is_single_token()
    }
}
