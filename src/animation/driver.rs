//! Single-timer driver: the "schedule after D, cancel pending" capability.
//!
//! A [`Driver`] owns one [`TextAnimator`] and a [`TimerSlot`] holding at most
//! one pending deadline. The host decides what a clock is: it calls
//! [`Driver::poll`] with the current instant from a thread loop, a browser
//! timeout, or a test's virtual clock.
//!
//! One poll fires at most one tick and the next deadline is measured from
//! the poll time, like a `setTimeout` scheduled inside the previous
//! callback. A late host slows the animation down; it never skips a frame
//! the renderer would have shown.

use web_time::{Duration, Instant};

use super::{Frame, TextAnimator};

/// At most one pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSlot {
    deadline: Option<Instant>,
}

impl TimerSlot {
    /// Arm the slot, replacing any pending deadline.
    pub fn arm(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    /// Clear the slot. Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Take the deadline if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(deadline) if deadline <= now => self.deadline.take(),
            _ => None,
        }
    }
}

/// Runs one animator against a host clock with exactly one pending timer.
pub struct Driver<A> {
    animator: A,
    timer: TimerSlot,
    cancelled: bool,
    ticks: u64,
}

impl<A: TextAnimator> Driver<A> {
    /// Wrap an animator. Nothing is scheduled until [`start`](Self::start).
    #[must_use]
    pub fn new(animator: A) -> Self {
        Self {
            animator,
            timer: TimerSlot::default(),
            cancelled: false,
            ticks: 0,
        }
    }

    /// Arm the timer from the animator's next delay.
    pub fn start(&mut self, now: Instant) {
        if !self.cancelled {
            self.rearm(now);
        }
    }

    /// Fire the pending tick if it is due at `now` and arm the next one
    /// from `now`. Returns whether a tick fired; always `false` after
    /// [`cancel`](Self::cancel).
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || self.timer.take_due(now).is_none() {
            return false;
        }
        self.animator.tick();
        self.ticks += 1;
        self.rearm(now);
        true
    }

    /// Forward the visibility level and arm a timer if one became due.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if self.cancelled {
            return;
        }
        self.animator.set_visible(visible);
        if self.timer.deadline().is_none() {
            self.rearm(now);
        }
    }

    /// Swap in a new animator (configuration change). The pending timer of
    /// the old animator is cancelled before the new one is armed.
    pub fn replace(&mut self, animator: A, now: Instant) {
        let _ = self.timer.cancel();
        log::debug!(
            "replacing {} with {}",
            self.animator.name(),
            animator.name()
        );
        self.animator = animator;
        self.ticks = 0;
        if !self.cancelled {
            self.rearm(now);
        }
    }

    /// Tear down: clear the pending timer and ignore all later polls.
    /// Safe to call any number of times.
    pub fn cancel(&mut self) {
        if self.timer.cancel() {
            log::trace!("{}: pending tick cancelled", self.animator.name());
        }
        self.cancelled = true;
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The single pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Ticks fired since start (or the last replace).
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The driven animator.
    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Snapshot the animator's output.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.animator)
    }

    fn rearm(&mut self, from: Instant) {
        self.timer = TimerSlot {
            deadline: self.animator.next_delay().map(|delay| from + delay),
        };
    }
}

impl<A: TextAnimator> std::fmt::Debug for Driver<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("animator", &self.animator.name())
            .field("deadline", &self.timer.deadline())
            .field("cancelled", &self.cancelled)
            .field("ticks", &self.ticks)
            .finish()
    }
}

/// Time until `deadline`, zero if it has passed.
#[must_use]
pub fn time_until(deadline: Instant, now: Instant) -> Duration {
    deadline.saturating_duration_since(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{
        Caret, PhraseSet, Reveal, RevealConfig, StaticText, Typewriter,
        TypewriterConfig, TypewriterTiming,
    };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn typewriter(phrases: &[&str], timing: TypewriterTiming) -> Typewriter {
        Typewriter::new(
            TypewriterConfig::new(
                PhraseSet::new(phrases.iter().copied()).unwrap(),
                timing,
            )
            .unwrap(),
        )
    }

    /// Always ready again immediately.
    struct Spinner(u64);

    impl TextAnimator for Spinner {
        fn text(&self) -> &str {
            ""
        }

        fn caret(&self) -> Caret {
            Caret::Typing
        }

        fn next_delay(&self) -> Option<Duration> {
            Some(Duration::ZERO)
        }

        fn tick(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_ticks_fire_at_deadlines() {
        let t0 = Instant::now();
        let mut d =
            Driver::new(typewriter(&["Hi"], TypewriterTiming::default()));
        assert_eq!(d.next_deadline(), None);

        d.start(t0);
        assert_eq!(d.next_deadline(), Some(t0 + ms(100)));
        assert!(!d.poll(t0 + ms(99)));
        assert_eq!(d.animator().text(), "");

        assert!(d.poll(t0 + ms(100)));
        assert_eq!(d.animator().text(), "H");
        assert_eq!(d.next_deadline(), Some(t0 + ms(200)));
    }

    #[test]
    fn test_late_poll_fires_one_tick() {
        let t0 = Instant::now();
        let mut d =
            Driver::new(typewriter(&["Hello"], TypewriterTiming::default()));
        d.start(t0);

        // Three ticks' worth of time passed, but only one fires and the
        // next is measured from the poll.
        assert!(d.poll(t0 + ms(350)));
        assert_eq!(d.animator().text(), "H");
        assert_eq!(d.next_deadline(), Some(t0 + ms(450)));
        assert!(!d.poll(t0 + ms(350)));

        assert!(d.poll(t0 + ms(450)));
        assert_eq!(d.animator().text(), "He");
        assert_eq!(d.ticks(), 2);
    }

    #[test]
    fn test_zero_pauses_publish_every_frame() {
        let t0 = Instant::now();
        let timing = TypewriterTiming::from_millis(10, 5, 0, 0).unwrap();
        let mut d = Driver::new(typewriter(&["AI", "ML"], timing));
        d.start(t0);

        let mut seen = vec![(0, d.frame().text)];
        let mut now = t0;
        for _ in 0..12 {
            now = d.next_deadline().unwrap();
            assert!(d.poll(now));
            seen.push((d.animator().phrase_index(), d.frame().text));
        }
        let expected = [
            (0, ""),
            (0, "A"),
            (0, "AI"),
            (0, "AI"),
            (0, "A"),
            (0, ""),
            (1, ""),
            (1, "M"),
            (1, "ML"),
            (1, "ML"),
            (1, "M"),
            (1, ""),
            (0, ""),
        ];
        let expected: Vec<(usize, String)> =
            expected.iter().map(|&(i, s)| (i, s.to_owned())).collect();
        assert_eq!(seen, expected);
        assert_eq!(now, t0 + ms(60));
    }

    #[test]
    fn test_zero_delay_fires_once_per_poll() {
        let t0 = Instant::now();
        let mut d = Driver::new(Spinner(0));
        d.start(t0);
        assert!(d.poll(t0));
        assert_eq!(d.animator().0, 1);
        assert_eq!(d.next_deadline(), Some(t0));
        assert!(d.poll(t0));
        assert_eq!(d.animator().0, 2);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut d =
            Driver::new(typewriter(&["Hi"], TypewriterTiming::default()));
        d.start(t0);
        d.cancel();
        d.cancel();
        assert!(d.is_cancelled());
        assert_eq!(d.next_deadline(), None);
        assert!(!d.poll(t0 + ms(10_000)));
        assert_eq!(d.animator().text(), "");

        // Nothing re-arms a cancelled driver.
        d.start(t0);
        d.set_visible(true, t0);
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn test_reveal_waits_for_trigger() {
        let t0 = Instant::now();
        let cfg = RevealConfig::new("Hello", ms(15)).unwrap();
        let mut d = Driver::new(Reveal::new(cfg));
        d.start(t0);
        assert_eq!(d.next_deadline(), None);

        d.set_visible(false, t0);
        assert!(!d.poll(t0 + ms(1000)));
        assert_eq!(d.next_deadline(), None);

        d.set_visible(true, t0 + ms(1000));
        let mut texts = Vec::new();
        while let Some(deadline) = d.next_deadline() {
            assert!(d.poll(deadline));
            texts.push(d.frame().text);
        }
        assert_eq!(texts, ["H", "He", "Hel", "Hell", "Hello"]);
        assert_eq!(d.ticks(), 5);
    }

    #[test]
    fn test_empty_reveal_never_schedules() {
        let t0 = Instant::now();
        let cfg = RevealConfig::new("", ms(15)).unwrap();
        let mut d = Driver::new(Reveal::new(cfg));
        d.start(t0);
        d.set_visible(true, t0);
        assert_eq!(d.next_deadline(), None);
        assert_eq!(d.ticks(), 0);
    }

    #[test]
    fn test_zero_length_cycle_never_schedules() {
        let t0 = Instant::now();
        let timing = TypewriterTiming::from_millis(10, 5, 0, 0).unwrap();
        let mut d = Driver::new(typewriter(&[""], timing));
        d.start(t0);
        assert_eq!(d.next_deadline(), None);
        assert!(!d.poll(t0));
        assert!(!d.poll(t0 + ms(1000)));
        assert_eq!(d.frame().text, "");
    }

    #[test]
    fn test_replace_cancels_pending_timer() {
        let t0 = Instant::now();
        let mut d: Driver<Box<dyn TextAnimator>> = Driver::new(Box::new(
            typewriter(&["Hi"], TypewriterTiming::default()),
        ));
        d.start(t0);
        assert!(d.poll(t0 + ms(100)));

        d.replace(Box::new(StaticText::new("static")), t0 + ms(150));
        assert_eq!(d.next_deadline(), None);
        assert_eq!(d.frame().text, "static");
        assert!(!d.poll(t0 + ms(10_000)));
    }

    #[test]
    fn test_time_until_saturates() {
        let t0 = Instant::now();
        assert_eq!(time_until(t0 + ms(5), t0), ms(5));
        assert_eq!(time_until(t0, t0 + ms(5)), Duration::ZERO);
    }
}
