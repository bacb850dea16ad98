//! Client-side pacing of an answer that is already fully received.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    /// One more word is in the buffer.
    Appended,
    /// All words shown; commit this text as the assistant message.
    Done(String),
}

#[derive(Debug, Clone)]
pub struct TypingReveal {
    full_text: String,
    words: Vec<String>,
    next: usize,
    buffer: String,
}

impl TypingReveal {
    pub fn new(text: impl Into<String>) -> Self {
        let full_text = text.into();
        let words = full_text.split_whitespace().map(str::to_string).collect();
        Self {
            full_text,
            words,
            next: 0,
            buffer: String::new(),
        }
    }

    pub fn tick(&mut self) -> RevealStep {
        match self.words.get(self.next) {
            Some(word) => {
                if !self.buffer.is_empty() {
                    self.buffer.push(' ');
                }
                self.buffer.push_str(word);
                self.next += 1;
                RevealStep::Appended
            }
            None => {
                self.buffer.clear();
                RevealStep::Done(self.full_text.clone())
            }
        }
    }

    /// Text revealed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_word_by_word_then_commits() {
        let mut reveal = TypingReveal::new("Hello world foo");
        assert_eq!(reveal.tick(), RevealStep::Appended);
        assert_eq!(reveal.buffer(), "Hello");
        assert_eq!(reveal.tick(), RevealStep::Appended);
        assert_eq!(reveal.buffer(), "Hello world");
        assert_eq!(reveal.tick(), RevealStep::Appended);
        assert_eq!(reveal.buffer(), "Hello world foo");
        assert_eq!(reveal.tick(), RevealStep::Done("Hello world foo".into()));
        assert_eq!(reveal.buffer(), "");
    }

    #[test]
    fn test_commits_original_text_verbatim() {
        let text = "Line one\n\nLine  two";
        let mut reveal = TypingReveal::new(text);
        let mut ticks = 0;
        let committed = loop {
            ticks += 1;
            if let RevealStep::Done(t) = reveal.tick() {
                break t;
            }
        };
        assert_eq!(committed, text);
        assert_eq!(ticks, 5);
    }

    #[test]
    fn test_empty_answer_finishes_immediately() {
        let mut reveal = TypingReveal::new("");
        assert_eq!(reveal.tick(), RevealStep::Done(String::new()));
        assert_eq!(reveal.buffer(), "");
    }
}
