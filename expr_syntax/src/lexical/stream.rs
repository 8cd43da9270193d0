//! Position-tracked character cursor over the source text

/// Forward reader with bounded rewind. The cursor counts characters; byte
/// offsets are derived for token spans.
#[derive(Debug, Clone)]
pub struct CharacterStream<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
}

impl<'a> CharacterStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            position: 0,
        }
    }

    pub fn can_read(&self) -> bool {
        self.position < self.chars.len()
    }

    /// Read one character and advance, or `None` at end of input
    pub fn read_character(&mut self) -> Option<char> {
        let (_, ch) = *self.chars.get(self.position)?;
        self.position += 1;
        Some(ch)
    }

    /// Move back by `amount` characters; a negative amount moves forward.
    /// Leaving `0..=len` is a caller bug; release builds clamp.
    pub fn rewind(&mut self, amount: isize) {
        let target = self.position as isize - amount;
        debug_assert!(
            target >= 0 && target as usize <= self.chars.len(),
            "rewind by {} from {} leaves the stream",
            amount,
            self.position
        );
        self.position = target.clamp(0, self.chars.len() as isize) as usize;
    }

    /// Cursor position in characters
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte offset of the cursor
    pub fn byte_offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.source.len())
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_until_end() {
        let mut stream = CharacterStream::new("ab");
        assert!(stream.can_read());
        assert_eq!(stream.read_character(), Some('a'));
        assert_eq!(stream.read_character(), Some('b'));
        assert!(!stream.can_read());
        assert_eq!(stream.read_character(), None);
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn test_rewind_both_directions() {
        let mut stream = CharacterStream::new("abc");
        stream.read_character();
        stream.read_character();
        stream.rewind(1);
        assert_eq!(stream.read_character(), Some('b'));
        stream.rewind(-1);
        assert_eq!(stream.position(), 3);
        assert!(!stream.can_read());
    }

    #[test]
    fn test_byte_offsets_follow_multibyte_characters() {
        let mut stream = CharacterStream::new("é1");
        assert_eq!(stream.byte_offset(), 0);
        stream.read_character();
        assert_eq!(stream.byte_offset(), 2);
        stream.read_character();
        assert_eq!(stream.byte_offset(), 3);
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_empty_source() {
        let stream = CharacterStream::new("");
        assert!(stream.is_empty());
        assert!(!stream.can_read());
        assert_eq!(stream.byte_offset(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "leaves the stream")]
    fn test_rewind_past_start_is_a_bug() {
        let mut stream = CharacterStream::new("a");
        stream.rewind(1);
    }
}
