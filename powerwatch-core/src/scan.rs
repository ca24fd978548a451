//! A small cursor for walking marker positions in unstructured text.
//!
//! Every movement either succeeds and advances, or reports "not found" and
//! leaves the cursor where it was. Callers compose these steps into the
//! section and fragment grammars in `extract`.

#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Absolute offset of the next `marker` at or after the cursor.
    pub fn find(&self, marker: &str) -> Option<usize> {
        self.rest().find(marker).map(|i| self.pos + i)
    }

    /// Move just past the next `marker`, returning where the marker started.
    pub fn skip_past(&mut self, marker: &str) -> Option<usize> {
        let at = self.find(marker)?;
        self.pos = at + marker.len();
        Some(at)
    }

    /// Consume `literal` if the cursor sits right on it.
    pub fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume ASCII whitespace, returning how many bytes were skipped.
    pub fn eat_whitespace(&mut self) -> usize {
        self.eat_while(|c| c.is_ascii_whitespace()).len()
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume exactly `n` characters.
    pub fn take_chars(&mut self, n: usize) -> Option<&'a str> {
        let rest = self.rest();
        let mut end = 0;
        let mut chars = rest.char_indices();
        for _ in 0..n {
            let (i, c) = chars.next()?;
            end = i + c.len_utf8();
        }
        self.pos += end;
        Some(&rest[..end])
    }

    /// Consume up to and including the next `terminator`.
    pub fn take_through(&mut self, terminator: char) -> Option<&'a str> {
        let rest = self.rest();
        let i = rest.find(terminator)?;
        let end = i + terminator.len_utf8();
        self.pos += end;
        Some(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_moves_keep_position() {
        let mut sc = Scanner::new("abc. def");
        assert!(sc.skip_past("xyz").is_none());
        assert!(!sc.eat("b"));
        assert!(sc.take_through('!').is_none());
        assert_eq!(sc.position(), 0);
    }

    #[test]
    fn take_through_includes_terminator() {
        let mut sc = Scanner::new("Група 6.1. Світла немає. Далі");
        assert_eq!(sc.skip_past("Група 6.1"), Some(0));
        assert_eq!(sc.take_through('.'), Some("."));
        assert_eq!(sc.eat_whitespace(), 1);
        assert_eq!(sc.take_through('.'), Some("Світла немає."));
        assert_eq!(sc.rest(), " Далі");
        assert!(sc.take_through('.').is_none());
    }

    #[test]
    fn take_chars_counts_characters_not_bytes() {
        let mut sc = Scanner::new("на 01.03.2025");
        assert_eq!(sc.take_chars(2), Some("на"));
        sc.eat_whitespace();
        assert_eq!(sc.take_chars(10), Some("01.03.2025"));
        assert!(sc.is_at_end());
        assert!(sc.take_chars(1).is_none());
    }
}
