//! Edge-triggered, fire-once visibility signal.

/// Latches the first `false -> true` transition of a boolean level.
///
/// Hosts feed it the raw "is the element in the viewport" level as often as
/// they like; [`observe`](Self::observe) reports `true` exactly once. A
/// remounted view builds a new animator, and with it a new trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeTrigger {
    level: bool,
    fired: bool,
}

impl EdgeTrigger {
    /// An armed trigger with a low level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current level. Returns `true` only on the first rising
    /// edge.
    pub fn observe(&mut self, level: bool) -> bool {
        let rising = level && !self.level && !self.fired;
        self.level = level;
        if rising {
            self.fired = true;
        }
        rising
    }
}
