//! Terminal input plus the two clocks the shell runs on: the throbber
//! animation step and the frame cadence.
//!
//! A background task merges crossterm's `EventStream` with both intervals
//! and forwards [`Event`]s over an unbounded channel.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// One throbber frame.
pub const ANIMATION_STEP: Duration = Duration::from_millis(120);

/// Redraw cadence (~30 FPS).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Advance the loading throbber.
    Animate,
    /// Time to draw.
    Frame,
}

/// Map a raw crossterm event. Key releases and repeats are dropped, and so
/// is everything the shell has no use for (mouse, focus, paste).
pub fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        _ => None,
    }
}

fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Handle to the background input task. Stops the task on drop.
pub struct TerminalEvents {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl TerminalEvents {
    pub fn spawn(animation_step: Duration, frame_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let stop = cancel.clone();
        tokio::spawn(async move {
            let mut input = EventStream::new();
            let mut animation = clock(animation_step);
            let mut frames = clock(frame_interval);

            loop {
                let event = tokio::select! {
                    () = stop.cancelled() => break,
                    _ = animation.tick() => Event::Animate,
                    _ = frames.tick() => Event::Frame,
                    Some(Ok(raw)) = input.next() => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next event, or `None` once the task has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for TerminalEvents {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
