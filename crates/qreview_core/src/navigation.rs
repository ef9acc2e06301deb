//! Prev/next stepping through the selector and swipe detection.

use crate::constants::SWIPE_THRESHOLD_PX;
use crate::models::QuestionId;

/// Position of the current question within the selector list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPosition {
    pub index: Option<usize>,
    pub total: usize,
    pub prev: Option<QuestionId>,
    pub next: Option<QuestionId>,
}

impl NavPosition {
    /// Compute navigation targets for `current` within `ids`.
    ///
    /// An id absent from the list has neither target.
    pub fn compute(ids: &[QuestionId], current: QuestionId) -> Self {
        let index = ids.iter().position(|id| *id == current);
        let prev = index
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| ids.get(i))
            .copied();
        let next = index.and_then(|i| ids.get(i + 1)).copied();
        Self {
            index,
            total: ids.len(),
            prev,
            next,
        }
    }

    /// `"{i+1} / {n}"`; an absent id counts as position 0.
    pub fn count_label(&self) -> String {
        format!("{} / {}", self.index.map(|i| i + 1).unwrap_or(0), self.total)
    }

    /// Progress fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        let done = self.index.map(|i| i + 1).unwrap_or(0);
        done as f32 / self.total as f32
    }
}

/// Direction requested by a gesture or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

/// Tracks one horizontal drag and classifies it on release.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Rightward drags step back, leftward drags step forward.
    pub fn end(&mut self, x: f32) -> Option<NavDirection> {
        let start = self.start_x.take()?;
        let distance = x - start;
        if distance.abs() <= SWIPE_THRESHOLD_PX {
            None
        } else if distance > 0.0 {
            Some(NavDirection::Prev)
        } else {
            Some(NavDirection::Next)
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}
