use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::operation::CalcOperation;

/// Everything a key press can ask the calculator to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Digit(char),
    Point,
    ToggleSign,
    Backspace,
    ClearEntry,
    ClearAll,
    /// Switch editing between the real and imaginary component.
    ToggleField,
    /// Commit the display and hold a pending binary operator.
    Operator(CalcOperation),
    /// Apply a unary operation to the display immediately.
    Unary(CalcOperation),
    Equals,
    Undo,
    Redo,
    SaveHistory,
    LoadHistory,
    ClearHistory,
    MemoryClear,
    MemoryRecall,
    MemoryStore,
    MemoryAdd,
    CircleArea,
    CircleCircumference,
    TriangleArea,
    TriangleCircumference,
    Quit,
}

/// A one- or two-key sequence, vim style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySequence {
    One(char),
    Two(char, char),
}

/// Maps command key sequences to actions: single letters for history
/// commands, two-key sequences behind the `m` (memory) and `g`
/// (geometry) prefixes. Entry keys (digits, operators, unary functions)
/// stay in `translate_key`.
pub struct CommandTable {
    map: HashMap<KeySequence, KeyAction>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self {
            map: HashMap::from([
                (KeySequence::One('u'), KeyAction::Undo),
                (KeySequence::One('U'), KeyAction::Redo),
                (KeySequence::One('X'), KeyAction::ClearHistory),
                (KeySequence::One('q'), KeyAction::Quit),
                (KeySequence::Two('m', 'c'), KeyAction::MemoryClear),
                (KeySequence::Two('m', 'r'), KeyAction::MemoryRecall),
                (KeySequence::Two('m', 's'), KeyAction::MemoryStore),
                (KeySequence::Two('m', '+'), KeyAction::MemoryAdd),
                (KeySequence::Two('g', 'a'), KeyAction::CircleArea),
                (KeySequence::Two('g', 'c'), KeyAction::CircleCircumference),
                (KeySequence::Two('g', 't'), KeyAction::TriangleArea),
                (KeySequence::Two('g', 'e'), KeyAction::TriangleCircumference),
            ]),
        }
    }
}

impl CommandTable {
    pub fn get(&self, seq: KeySequence) -> Option<KeyAction> {
        self.map.get(&seq).copied()
    }

    /// Is this the first key of any known sequence?
    pub fn is_prefix(&self, c: char) -> bool {
        self.map
            .keys()
            .any(|seq| matches!(seq, KeySequence::Two(first, _) if *first == c))
    }
}

/// Result of feeding one key through the sequence buffer.
pub enum KeyBufferResult {
    /// A sequence matched.
    Action(KeyAction),
    /// The buffer holds a valid prefix, waiting for the next key.
    Pending,
    /// Not part of a sequence; handle the key normally.
    Fallthrough(KeyEvent),
}

/// Accumulates prefix keys for multi-key sequences, with a timeout so a
/// stranded prefix doesn't swallow the next unrelated key.
pub struct KeyBuffer {
    pending: Option<char>,
    last_key_time: Instant,
    timeout: Duration,
}

impl Default for KeyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBuffer {
    pub fn new() -> Self {
        Self {
            pending: None,
            last_key_time: Instant::now(),
            timeout: Duration::from_millis(1000),
        }
    }

    pub fn process(&mut self, key: KeyEvent, table: &CommandTable) -> KeyBufferResult {
        if self.pending.is_some() && self.last_key_time.elapsed() > self.timeout {
            self.pending = None;
        }

        let c = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => c,
            _ => {
                self.pending = None;
                return KeyBufferResult::Fallthrough(key);
            }
        };

        match self.pending.take() {
            None if table.is_prefix(c) => {
                self.pending = Some(c);
                self.last_key_time = Instant::now();
                KeyBufferResult::Pending
            }
            None => match table.get(KeySequence::One(c)) {
                Some(action) => KeyBufferResult::Action(action),
                None => KeyBufferResult::Fallthrough(key),
            },
            Some(prefix) => match table.get(KeySequence::Two(prefix, c)) {
                Some(action) => KeyBufferResult::Action(action),
                None => KeyBufferResult::Fallthrough(key),
            },
        }
    }
}

/// Translate a single key press outside any sequence.
pub fn translate_key(key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(KeyAction::SaveHistory),
            KeyCode::Char('o') => Some(KeyAction::LoadHistory),
            KeyCode::Char('r') => Some(KeyAction::Redo),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(KeyAction::Digit(c)),
        KeyCode::Char('.') => Some(KeyAction::Point),
        KeyCode::Char('~') => Some(KeyAction::ToggleSign),
        KeyCode::Char('+') => Some(KeyAction::Operator(CalcOperation::Addition)),
        KeyCode::Char('-') => Some(KeyAction::Operator(CalcOperation::Subtraction)),
        KeyCode::Char('*') => Some(KeyAction::Operator(CalcOperation::Multiplication)),
        KeyCode::Char('/') => Some(KeyAction::Operator(CalcOperation::Division)),
        KeyCode::Char('=') | KeyCode::Enter => Some(KeyAction::Equals),
        KeyCode::Char('a') => Some(KeyAction::Unary(CalcOperation::AbsoluteValue)),
        KeyCode::Char('c') => Some(KeyAction::Unary(CalcOperation::Conjugate)),
        KeyCode::Char('x') => Some(KeyAction::Unary(CalcOperation::Square)),
        KeyCode::Char('r') => Some(KeyAction::Unary(CalcOperation::Root)),
        KeyCode::Char('v') => Some(KeyAction::Unary(CalcOperation::Inverse)),
        KeyCode::Tab => Some(KeyAction::ToggleField),
        KeyCode::Backspace => Some(KeyAction::Backspace),
        KeyCode::Delete => Some(KeyAction::ClearEntry),
        KeyCode::Esc => Some(KeyAction::ClearAll),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_memory_sequence() {
        let table = CommandTable::default();
        let mut buffer = KeyBuffer::new();

        assert!(matches!(
            buffer.process(key('m'), &table),
            KeyBufferResult::Pending
        ));
        assert!(matches!(
            buffer.process(key('+'), &table),
            KeyBufferResult::Action(KeyAction::MemoryAdd)
        ));
    }

    #[test]
    fn test_shape_sequence() {
        let table = CommandTable::default();
        let mut buffer = KeyBuffer::new();

        buffer.process(key('g'), &table);
        assert!(matches!(
            buffer.process(key('t'), &table),
            KeyBufferResult::Action(KeyAction::TriangleArea)
        ));
    }

    #[test]
    fn test_unmatched_second_key_falls_through() {
        let table = CommandTable::default();
        let mut buffer = KeyBuffer::new();

        buffer.process(key('m'), &table);
        // 'm' followed by '5' is no sequence; the digit must survive.
        match buffer.process(key('5'), &table) {
            KeyBufferResult::Fallthrough(k) => assert_eq!(k.code, KeyCode::Char('5')),
            _ => panic!("expected fallthrough"),
        }
    }

    #[test]
    fn test_non_prefix_falls_through_immediately() {
        let table = CommandTable::default();
        let mut buffer = KeyBuffer::new();

        assert!(matches!(
            buffer.process(key('7'), &table),
            KeyBufferResult::Fallthrough(_)
        ));
    }

    #[test]
    fn test_translate_digits_and_operators() {
        assert_eq!(translate_key(key('7')), Some(KeyAction::Digit('7')));
        assert_eq!(
            translate_key(key('+')),
            Some(KeyAction::Operator(CalcOperation::Addition))
        );
        assert_eq!(
            translate_key(key('/')),
            Some(KeyAction::Operator(CalcOperation::Division))
        );
        assert_eq!(translate_key(key('=')), Some(KeyAction::Equals));
        assert_eq!(
            translate_key(key('r')),
            Some(KeyAction::Unary(CalcOperation::Root))
        );
    }

    #[test]
    fn test_translate_control_chords() {
        assert_eq!(translate_key(ctrl('s')), Some(KeyAction::SaveHistory));
        assert_eq!(translate_key(ctrl('o')), Some(KeyAction::LoadHistory));
        assert_eq!(translate_key(ctrl('r')), Some(KeyAction::Redo));
        assert_eq!(translate_key(ctrl('z')), None);
    }

    #[test]
    fn test_single_key_commands() {
        let table = CommandTable::default();
        let mut buffer = KeyBuffer::new();

        assert!(matches!(
            buffer.process(key('u'), &table),
            KeyBufferResult::Action(KeyAction::Undo)
        ));
        assert!(matches!(
            buffer.process(key('U'), &table),
            KeyBufferResult::Action(KeyAction::Redo)
        ));
        assert!(matches!(
            buffer.process(key('X'), &table),
            KeyBufferResult::Action(KeyAction::ClearHistory)
        ));
        assert!(matches!(
            buffer.process(key('q'), &table),
            KeyBufferResult::Action(KeyAction::Quit)
        ));
    }
}
