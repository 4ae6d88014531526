//! Background animation thread.
//!
//! Owns one [`Driver`] on a dedicated thread. The thread sleeps on its
//! control channel until the next deadline, so a control message (new
//! visibility level, new animator, stop) is handled without waiting for the
//! pending tick. Frames are published through a triple buffer; the render
//! side reads the newest one without blocking.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;

use web_time::{Duration, Instant};

use crate::animation::{time_until, Driver, Frame, TextAnimator};
use crate::error::FolioError;

/// Shortest gap between two ticks. Keeps an animator that keeps asking for
/// zero delays from spinning the thread, the way browsers clamp nested
/// timeouts.
const MIN_TICK_SPACING: Duration = Duration::from_millis(1);

/// Messages from the owning view to the animation thread.
enum Control {
    Visible(bool),
    Replace(Box<dyn TextAnimator>),
    Stop,
}

/// Runs one animator on a background thread.
///
/// Dropping the handle shuts the thread down; after [`shutdown`]
/// returns, no tick can mutate state or publish a frame.
///
/// [`shutdown`]: Self::shutdown
pub struct AnimationThread {
    name: &'static str,
    control_tx: mpsc::Sender<Control>,
    frames: triple_buffer::Output<Frame>,
    thread: Option<JoinHandle<()>>,
}

impl AnimationThread {
    /// Spawn the thread and start the animator immediately.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn(animator: Box<dyn TextAnimator>) -> Result<Self, FolioError> {
        let name = animator.name();
        let (control_tx, control_rx) = mpsc::channel::<Control>();
        let (frame_input, frame_output) =
            triple_buffer::triple_buffer(&Frame::capture(&animator));

        let thread = std::thread::Builder::new()
            .name(format!("folio-{name}"))
            .spawn(move || {
                Self::thread_loop(animator, control_rx, frame_input);
            })
            .map_err(FolioError::ThreadSpawn)?;

        log::debug!("spawned {name} animation thread");
        Ok(Self {
            name,
            control_tx,
            frames: frame_output,
            thread: Some(thread),
        })
    }

    /// Most recent published frame.
    pub fn latest(&mut self) -> &Frame {
        self.frames.read()
    }

    /// Forward the viewport visibility level.
    pub fn set_visible(&self, visible: bool) {
        let _ = self.control_tx.send(Control::Visible(visible));
    }

    /// Replace the animator (e.g. after an options change). The old
    /// animator's pending tick is cancelled first.
    pub fn replace(&self, animator: Box<dyn TextAnimator>) {
        let _ = self.control_tx.send(Control::Replace(animator));
    }

    /// Whether the thread has not been shut down yet.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Stop the thread and wait for it to exit. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = self.control_tx.send(Control::Stop);
            if handle.join().is_err() {
                log::error!("{} animation thread panicked", self.name);
            } else {
                log::debug!("{} animation thread stopped", self.name);
            }
        }
    }

    /// Thread main loop: wait for the deadline or a control message,
    /// poll the driver (one tick at most), publish changed frames.
    #[allow(clippy::needless_pass_by_value)]
    fn thread_loop(
        animator: Box<dyn TextAnimator>,
        control_rx: mpsc::Receiver<Control>,
        mut frames: triple_buffer::Input<Frame>,
    ) {
        let mut driver = Driver::new(animator);
        driver.start(Instant::now());
        let mut published = driver.frame();
        let mut last_tick: Option<Instant> = None;

        loop {
            let message = match driver.next_deadline() {
                Some(deadline) => {
                    let now = Instant::now();
                    let mut wait = time_until(deadline, now);
                    if let Some(last) = last_tick {
                        wait = wait
                            .max(time_until(last + MIN_TICK_SPACING, now));
                    }
                    match control_rx.recv_timeout(wait) {
                        Ok(message) => Some(message),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match control_rx.recv() {
                    Ok(message) => Some(message),
                    Err(_) => break,
                },
            };

            match message {
                Some(Control::Stop) => break,
                Some(Control::Visible(visible)) => {
                    driver.set_visible(visible, Instant::now());
                }
                Some(Control::Replace(animator)) => {
                    driver.replace(animator, Instant::now());
                }
                None => {}
            }

            let now = Instant::now();
            let too_soon =
                last_tick.is_some_and(|last| now < last + MIN_TICK_SPACING);
            if !too_soon && driver.poll(now) {
                last_tick = Some(now);
            }
            let frame = driver.frame();
            if frame != published {
                frames.write(frame.clone());
                published = frame;
            }
        }

        driver.cancel();
    }
}

impl Drop for AnimationThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AnimationThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationThread")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
