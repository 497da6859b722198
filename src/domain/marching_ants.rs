//! Phase counter animating the clipboard range outline.

use std::time::Duration;

use crate::state::Range;
use crate::traits::DocumentId;

/// Number of dash offsets in one animation cycle.
pub const PHASES: u8 = 8;

/// What a timer tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntsTick {
    /// The phase moved; repaint the given clipboard range.
    Advanced(Range),
    /// The clipboard no longer belongs to the shown document; the timer was stopped.
    Stopped,
    /// Nothing to animate right now.
    Idle,
}

#[derive(Debug, Clone)]
pub struct MarchingAnts {
    phase: u8,
    running: bool,
    interval: Duration,
}

impl MarchingAnts {
    pub fn new(interval: Duration) -> Self {
        Self {
            phase: 0,
            running: false,
            interval,
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick period the host timer should use.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Handles one timer tick.
    ///
    /// The phase advances only while the timer runs, the widget is visible
    /// and the clipboard range belongs to `document`.
    pub fn tick(
        &mut self,
        visible: bool,
        document: Option<DocumentId>,
        clipboard: Option<(DocumentId, Range)>,
    ) -> AntsTick {
        if !self.running {
            return AntsTick::Idle;
        }
        match (document, clipboard) {
            (Some(doc), Some((owner, range))) if doc == owner => {
                if !visible {
                    return AntsTick::Idle;
                }
                self.phase = (self.phase + 1) % PHASES;
                tracing::trace!(phase = self.phase, "marching ants");
                AntsTick::Advanced(range)
            }
            _ => {
                self.running = false;
                AntsTick::Stopped
            }
        }
    }
}
