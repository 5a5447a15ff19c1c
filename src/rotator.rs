//! Cyclic status-message rotator shown while an analysis request is pending.
//!
//! [`MessageRotator`] is a clock-free state machine: callers feed it elapsed
//! time and it reports the frames that became current. Every `interval` the
//! current message fades out; `fade` later the next message fades in. The
//! index wraps over the fixed message sequence.
//!
//! [`spawn_rotation`] drives a rotator on the tokio timer until the returned
//! [`RotationHandle`] is stopped or dropped.
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::messages::STATUS_MESSAGES;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2500);
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// What a renderer should show after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatorFrame {
    pub index: usize,
    pub message: &'static str,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct MessageRotator {
    messages: &'static [&'static str],
    interval: Duration,
    fade: Duration,
    index: usize,
    visible: bool,
    active: bool,
    // Absolute times measured from activation
    elapsed: Duration,
    next_fade_out: Duration,
    pending_fade_in: Option<Duration>,
}

impl Default for MessageRotator {
    fn default() -> Self {
        Self::with_timing(DEFAULT_INTERVAL, DEFAULT_FADE)
    }
}

impl MessageRotator {
    /// Build a rotator over [`STATUS_MESSAGES`]. `interval` is floored at 1ms
    /// and `fade` is kept strictly shorter than `interval`.
    pub fn with_timing(interval: Duration, fade: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let fade = fade.min(interval - Duration::from_nanos(1));
        Self {
            messages: &STATUS_MESSAGES,
            interval,
            fade,
            index: 0,
            visible: false,
            active: false,
            elapsed: Duration::ZERO,
            next_fade_out: interval,
            pending_fade_in: None,
        }
    }

    /// Activate (or restart) at message 0, visible.
    pub fn start(&mut self) -> RotatorFrame {
        self.index = 0;
        self.visible = true;
        self.active = true;
        self.elapsed = Duration::ZERO;
        self.next_fade_out = self.interval;
        self.pending_fade_in = None;
        self.frame()
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.visible = false;
        self.pending_fade_in = None;
    }

    /// Move simulated time forward, returning every frame change in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<RotatorFrame> {
        let mut frames = Vec::new();
        if !self.active {
            return frames;
        }
        let target = self.elapsed + dt;
        while let Some(deadline) = self.next_deadline() {
            if deadline > target {
                break;
            }
            self.elapsed = deadline;
            match self.pending_fade_in {
                Some(at) if at <= self.next_fade_out => {
                    self.index = (self.index + 1) % self.messages.len();
                    self.visible = true;
                    self.pending_fade_in = None;
                }
                _ => {
                    self.visible = false;
                    self.pending_fade_in = Some(self.next_fade_out + self.fade);
                    self.next_fade_out += self.interval;
                }
            }
            frames.push(self.frame());
        }
        self.elapsed = target;
        frames
    }

    /// Time left until the next frame change, `None` when inactive.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline().map(|d| d.saturating_sub(self.elapsed))
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_message(&self) -> &'static str {
        self.messages[self.index]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fade(&self) -> Duration {
        self.fade
    }

    fn next_deadline(&self) -> Option<Duration> {
        if !self.active {
            return None;
        }
        Some(match self.pending_fade_in {
            Some(at) => at.min(self.next_fade_out),
            None => self.next_fade_out,
        })
    }

    fn frame(&self) -> RotatorFrame {
        RotatorFrame {
            index: self.index,
            message: self.current_message(),
            visible: self.visible,
        }
    }
}

/// Cancellation handle for a running rotation. Dropping it cancels the task.
pub struct RotationHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<MessageRotator>>,
}

impl RotationHandle {
    /// Cancel the rotation and wait for the task to finish.
    pub async fn stop(mut self) -> Option<MessageRotator> {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => task.await.ok(),
            None => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }
}

impl Drop for RotationHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Start `rotator` and drive it on the tokio timer, reporting each frame to
/// `on_frame` (the initial frame included).
pub fn spawn_rotation<F>(mut rotator: MessageRotator, mut on_frame: F) -> RotationHandle
where
    F: FnMut(RotatorFrame) + Send + 'static,
{
    let (tx, mut rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        on_frame(rotator.start());
        while let Some(wait) = rotator.time_until_next() {
            tokio::select! {
                _ = &mut rx => break,
                _ = tokio::time::sleep(wait) => {
                    for frame in rotator.advance(wait) {
                        on_frame(frame);
                    }
                }
            }
        }
        rotator.stop();
        tracing::debug!(index = rotator.current_index(), "message rotation stopped");
        rotator
    });
    RotationHandle {
        cancel: Some(tx),
        task: Some(task),
    }
}
