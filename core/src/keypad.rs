/// # Keypad
/// The pressed status of the 16 keys of the hex keypad (0..F).
///
/// Only ever written by the host; instructions just read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    /// Set the pressed status of `key`; only its low 4 bits are used
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xF) as usize] = pressed;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest numbered key that is currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&pressed| pressed).map(|key| key as u8)
    }
}

#[cfg(test)]
mod test_keypad {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.set_key(0xE, true);
        assert!(keypad.is_pressed(0xE));
        keypad.set_key(0xE, false);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.set_key(0xB, true);
        keypad.set_key(0x3, true);
        assert_eq!(keypad.first_pressed(), Some(0x3));
    }
}
