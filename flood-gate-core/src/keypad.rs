//! Keypad symbols and press detection
//!
//! The panel is a 4x4 membrane matrix:
//!
//! ```text
//!   1 2 3 A
//!   4 5 6 B
//!   7 8 9 C
//!   * 0 # D
//! ```
//!
//! The firmware scans the matrix and feeds each scan result into a
//! [`KeyScanner`], which debounces and reports one event per press.

/// Matrix rows
pub const ROWS: usize = 4;

/// Matrix columns
pub const COLS: usize = 4;

/// Symbol printed on each matrix position, row-major
pub const KEYMAP: [[char; COLS]; ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// A key on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Numeric key, 0-9
    Digit(u8),
    /// `A`: switch to simulated distance entry
    Simulate,
    /// `B`: switch back to the ultrasonic sensor
    Real,
    /// `C`: unused
    C,
    /// `D`: unused
    D,
    /// `*`: enter or leave alert level configuration
    Configure,
    /// `#`: confirm the typed value
    Confirm,
}

impl Key {
    /// Key for a keypad symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0'..='9' => Some(Key::Digit(symbol as u8 - b'0')),
            'A' => Some(Key::Simulate),
            'B' => Some(Key::Real),
            'C' => Some(Key::C),
            'D' => Some(Key::D),
            '*' => Some(Key::Configure),
            '#' => Some(Key::Confirm),
            _ => None,
        }
    }

    /// Symbol printed on the key
    pub fn symbol(self) -> char {
        match self {
            Key::Digit(d) => (b'0' + d) as char,
            Key::Simulate => 'A',
            Key::Real => 'B',
            Key::C => 'C',
            Key::D => 'D',
            Key::Configure => '*',
            Key::Confirm => '#',
        }
    }

    /// Key at a matrix position
    pub fn at(row: usize, col: usize) -> Option<Self> {
        KEYMAP
            .get(row)
            .and_then(|keys| keys.get(col))
            .and_then(|&symbol| Self::from_symbol(symbol))
    }
}

/// Debounces raw matrix scans into press events
///
/// A scan result only counts once two consecutive scans agree. An event is
/// reported when the settled key changes to a pressed key; holding a key
/// reports it once, releasing reports nothing.
#[derive(Debug, Default)]
pub struct KeyScanner {
    candidate: Option<Key>,
    settled: Option<Key>,
}

impl KeyScanner {
    /// Scanner with no key held
    pub const fn new() -> Self {
        Self {
            candidate: None,
            settled: None,
        }
    }

    /// Feeds one scan (the key currently held, if any) and returns a new press
    pub fn feed(&mut self, scanned: Option<Key>) -> Option<Key> {
        if scanned != self.candidate {
            self.candidate = scanned;
            return None;
        }

        if scanned == self.settled {
            return None;
        }

        self.settled = scanned;
        scanned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for row in KEYMAP {
            for symbol in row {
                let key = Key::from_symbol(symbol).unwrap();
                assert_eq!(key.symbol(), symbol);
            }
        }
        assert_eq!(Key::from_symbol('x'), None);
    }

    #[test]
    fn test_matrix_positions() {
        assert_eq!(Key::at(0, 0), Some(Key::Digit(1)));
        assert_eq!(Key::at(0, 3), Some(Key::Simulate));
        assert_eq!(Key::at(1, 3), Some(Key::Real));
        assert_eq!(Key::at(3, 0), Some(Key::Configure));
        assert_eq!(Key::at(3, 1), Some(Key::Digit(0)));
        assert_eq!(Key::at(3, 2), Some(Key::Confirm));
        assert_eq!(Key::at(4, 0), None);
        assert_eq!(Key::at(0, 4), None);
    }

    #[test]
    fn test_press_needs_two_scans() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.feed(Some(Key::Digit(5))), None);
        assert_eq!(scanner.feed(Some(Key::Digit(5))), Some(Key::Digit(5)));
    }

    #[test]
    fn test_held_key_reports_once() {
        let mut scanner = KeyScanner::new();
        scanner.feed(Some(Key::Confirm));
        assert_eq!(scanner.feed(Some(Key::Confirm)), Some(Key::Confirm));
        for _ in 0..10 {
            assert_eq!(scanner.feed(Some(Key::Confirm)), None);
        }
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.feed(Some(Key::Digit(1))), None);
        assert_eq!(scanner.feed(None), None);
        assert_eq!(scanner.feed(Some(Key::Digit(1))), None);
        assert_eq!(scanner.feed(None), None);
        assert_eq!(scanner.feed(None), None);
    }

    #[test]
    fn test_repeat_press_after_release() {
        let mut scanner = KeyScanner::new();
        scanner.feed(Some(Key::Digit(7)));
        assert_eq!(scanner.feed(Some(Key::Digit(7))), Some(Key::Digit(7)));
        scanner.feed(None);
        assert_eq!(scanner.feed(None), None);
        scanner.feed(Some(Key::Digit(7)));
        assert_eq!(scanner.feed(Some(Key::Digit(7))), Some(Key::Digit(7)));
    }
}
