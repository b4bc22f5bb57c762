/// Selects one of the two Chip-8 timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Delay,
    Sound,
}

/// # Timers
/// Two 8-bit countdown timers (delay & sound).
///
/// They are ticked by the CPU in place of executing an instruction whenever
/// either of them is running, so a program that sets a timer gives up one
/// cycle per count.
#[derive(Clone, Default)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    pub fn get(&self, timer: Timer) -> u8 {
        match timer {
            Timer::Delay => self.delay,
            Timer::Sound => self.sound,
        }
    }

    pub fn set(&mut self, timer: Timer, value: u8) {
        match timer {
            Timer::Delay => self.delay = value,
            Timer::Sound => self.sound = value,
        }
    }

    /// Whether either timer is still counting down
    pub fn is_busy(&self) -> bool {
        self.delay > 0 || self.sound > 0
    }

    /// Decrement each running timer by one
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}
