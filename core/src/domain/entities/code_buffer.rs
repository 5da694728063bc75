//! Entry buffer entity for the six-box OTP input.

/// Number of code slots in the entry buffer
pub const CODE_LENGTH: usize = 6;

/// Entry buffer backing the six-box OTP input
///
/// Each slot holds at most one decimal digit. The buffer also tracks which
/// slot currently owns focus, so a rendering layer can mirror the form's
/// cursor movement without keeping any input state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuffer {
    /// The six code slots, empty or one digit each
    slots: [Option<char>; CODE_LENGTH],

    /// Index of the slot that currently owns focus (0..=5)
    focus: usize,
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBuffer {
    /// Creates an empty buffer with focus on the first slot
    pub fn new() -> Self {
        Self {
            slots: [None; CODE_LENGTH],
            focus: 0,
        }
    }

    /// Writes a single slot from raw input
    ///
    /// Accepts exactly one decimal digit, or the empty string to clear the
    /// slot. Multi-character input, non-digit characters, and out-of-range
    /// indices are rejected without touching the buffer. Accepting a digit
    /// in any slot but the last advances focus to the next slot.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot to write (0..=5)
    /// * `value` - The raw input for that slot
    ///
    /// # Returns
    ///
    /// `true` if the input was accepted, `false` if it was rejected
    pub fn set_digit(&mut self, index: usize, value: &str) -> bool {
        if index >= CODE_LENGTH {
            return false;
        }

        if value.is_empty() {
            self.slots[index] = None;
            return true;
        }

        let mut chars = value.chars();
        let digit = match chars.next() {
            Some(c) if c.is_ascii_digit() => c,
            _ => return false,
        };
        if chars.next().is_some() {
            return false;
        }

        self.slots[index] = Some(digit);
        if index < CODE_LENGTH - 1 {
            self.focus = index + 1;
        }
        true
    }

    /// Handles a backspace keypress in the given slot
    ///
    /// If the slot is already empty and is not the first one, focus moves to
    /// the previous slot so the next backspace empties it. Otherwise the
    /// slot's content is cleared and focus stays on it.
    ///
    /// # Returns
    ///
    /// `true` if the keypress was applied, `false` for an out-of-range index
    pub fn backspace(&mut self, index: usize) -> bool {
        if index >= CODE_LENGTH {
            return false;
        }

        if self.slots[index].is_none() && index > 0 {
            self.focus = index - 1;
        } else {
            self.slots[index] = None;
            self.focus = index;
        }
        true
    }

    /// Fills the buffer from pasted text
    ///
    /// Strips every non-digit character, keeps at most the first six digits,
    /// and writes them into the slots left to right starting at slot 0.
    /// Slots beyond the pasted digits keep their previous content. Focus
    /// lands on the first empty slot, or the last slot when the buffer is
    /// full.
    ///
    /// # Arguments
    ///
    /// * `text` - The pasted text, digits and noise alike
    ///
    /// # Returns
    ///
    /// The number of digits written into the buffer
    pub fn paste(&mut self, text: &str) -> usize {
        let digits: Vec<char> = text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CODE_LENGTH)
            .collect();

        for (index, digit) in digits.iter().enumerate() {
            self.slots[index] = Some(*digit);
        }

        self.focus = self.first_empty().unwrap_or(CODE_LENGTH - 1);
        digits.len()
    }

    /// Empties every slot and returns focus to the first one
    pub fn clear(&mut self) {
        self.slots = [None; CODE_LENGTH];
        self.focus = 0;
    }

    /// Checks whether every slot holds a digit
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    /// Checks whether no slot holds a digit
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Number of slots currently holding a digit
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// The candidate code as a string
    ///
    /// Concatenates the filled slots in order. Only a complete buffer yields
    /// a six-character code; callers should check [`is_complete`] first.
    ///
    /// [`is_complete`]: Self::is_complete
    pub fn as_string(&self) -> String {
        self.slots.iter().filter_map(|slot| *slot).collect()
    }

    /// Index of the slot that currently owns focus
    pub fn focused_slot(&self) -> usize {
        self.focus
    }

    /// A copy of the slots for read-only rendering
    pub fn slots(&self) -> [Option<char>; CODE_LENGTH] {
        self.slots
    }

    fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty_with_focus_on_first_slot() {
        let buffer = CodeBuffer::new();
        assert!(buffer.is_empty());
        assert!(!buffer.is_complete());
        assert_eq!(buffer.focused_slot(), 0);
        assert_eq!(buffer.filled_count(), 0);
        assert_eq!(buffer.as_string(), "");
    }

    #[test]
    fn test_set_digit_accepts_single_digit_and_advances_focus() {
        let mut buffer = CodeBuffer::new();

        assert!(buffer.set_digit(0, "4"));
        assert_eq!(buffer.slots()[0], Some('4'));
        assert_eq!(buffer.focused_slot(), 1);

        assert!(buffer.set_digit(1, "2"));
        assert_eq!(buffer.focused_slot(), 2);
    }

    #[test]
    fn test_set_digit_on_last_slot_keeps_focus() {
        let mut buffer = CodeBuffer::new();
        assert!(buffer.set_digit(5, "9"));
        assert_eq!(buffer.focused_slot(), 5);
    }

    #[test]
    fn test_set_digit_rejects_bad_input_without_state_change() {
        let mut buffer = CodeBuffer::new();
        buffer.set_digit(0, "1");
        let before = buffer.clone();

        assert!(!buffer.set_digit(1, "ab"));
        assert!(!buffer.set_digit(1, "12"));
        assert!(!buffer.set_digit(1, "x"));
        assert!(!buffer.set_digit(6, "3"));
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_set_digit_empty_string_clears_slot() {
        let mut buffer = CodeBuffer::new();
        buffer.set_digit(0, "7");

        assert!(buffer.set_digit(0, ""));
        assert_eq!(buffer.slots()[0], None);
        // Clearing does not move focus
        assert_eq!(buffer.focused_slot(), 1);
    }

    #[test]
    fn test_backspace_clears_filled_slot_in_place() {
        let mut buffer = CodeBuffer::new();
        buffer.set_digit(0, "1");
        buffer.set_digit(1, "2");

        assert!(buffer.backspace(1));
        assert_eq!(buffer.slots()[1], None);
        assert_eq!(buffer.focused_slot(), 1);
    }

    #[test]
    fn test_backspace_on_empty_slot_moves_focus_back() {
        let mut buffer = CodeBuffer::new();
        buffer.set_digit(0, "1");

        // Slot 1 is empty, so backspace retreats to slot 0
        assert!(buffer.backspace(1));
        assert_eq!(buffer.slots()[0], Some('1'));
        assert_eq!(buffer.focused_slot(), 0);

        // A second backspace empties slot 0
        assert!(buffer.backspace(0));
        assert_eq!(buffer.slots()[0], None);
        assert_eq!(buffer.focused_slot(), 0);
    }

    #[test]
    fn test_backspace_on_empty_first_slot_stays_put() {
        let mut buffer = CodeBuffer::new();
        assert!(buffer.backspace(0));
        assert_eq!(buffer.focused_slot(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_paste_strips_noise_and_caps_at_six_digits() {
        let mut buffer = CodeBuffer::new();

        let applied = buffer.paste("12a3456789");
        assert_eq!(applied, 6);
        assert_eq!(buffer.as_string(), "123456");
        assert!(buffer.is_complete());
        assert_eq!(buffer.focused_slot(), 5);
    }

    #[test]
    fn test_paste_partial_fills_from_front_and_focuses_first_empty() {
        let mut buffer = CodeBuffer::new();

        let applied = buffer.paste("9-8");
        assert_eq!(applied, 2);
        assert_eq!(buffer.slots()[0], Some('9'));
        assert_eq!(buffer.slots()[1], Some('8'));
        assert_eq!(buffer.slots()[2], None);
        assert_eq!(buffer.focused_slot(), 2);
    }

    #[test]
    fn test_paste_overwrites_leading_slots_only() {
        let mut buffer = CodeBuffer::new();
        buffer.paste("111111");

        let applied = buffer.paste("22");
        assert_eq!(applied, 2);
        assert_eq!(buffer.as_string(), "221111");
        // Still complete, so focus lands on the last slot
        assert_eq!(buffer.focused_slot(), 5);
    }

    #[test]
    fn test_paste_without_digits_applies_nothing() {
        let mut buffer = CodeBuffer::new();
        buffer.set_digit(0, "5");

        let applied = buffer.paste("no digits here");
        assert_eq!(applied, 0);
        assert_eq!(buffer.slots()[0], Some('5'));
        assert_eq!(buffer.focused_slot(), 1);
    }

    #[test]
    fn test_clear_resets_slots_and_focus() {
        let mut buffer = CodeBuffer::new();
        buffer.paste("123456");

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.focused_slot(), 0);
    }

    #[test]
    fn test_complete_buffer_round_trip() {
        let mut buffer = CodeBuffer::new();
        for (index, digit) in ["1", "2", "3", "4", "5", "6"].iter().enumerate() {
            assert!(buffer.set_digit(index, digit));
        }

        assert!(buffer.is_complete());
        assert_eq!(buffer.filled_count(), CODE_LENGTH);
        assert_eq!(buffer.as_string(), "123456");
    }
}
