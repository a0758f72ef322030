//! Header text revealed one character at a time.

use std::time::Duration;

/// Typing effect over a fixed string.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    chars: Vec<char>,
    index: usize,
    typed: String,
    interval: Duration,
}

impl TypingEffect {
    /// Type `text` at one character per `interval`.
    pub fn new(text: &str, interval: Duration) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            typed: String::with_capacity(text.len()),
            interval,
        }
    }

    /// Append every character due by `elapsed` since the effect started.
    ///
    /// The first character is due after one interval.
    pub fn advance(&mut self, elapsed: Duration) {
        let step = self.interval.as_millis().max(1);
        let due = (elapsed.as_millis() / step).min(self.chars.len() as u128) as usize;
        while self.index < due {
            self.typed.push(self.chars[self.index]);
            self.index += 1;
        }
    }

    /// Text typed so far.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.chars.len()
    }
}
