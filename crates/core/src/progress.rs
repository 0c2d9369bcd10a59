/// Position within a session, for progress bars and "Question 2 of 3" labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current item.
    pub position: usize,
    pub total: usize,
}

impl Progress {
    #[must_use]
    pub fn new(current_index: usize, total: usize) -> Self {
        Self {
            position: current_index + 1,
            total,
        }
    }

    /// `position / total`, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let raw = self.position as f64 / self.total as f64;
        raw.clamp(0.0, 1.0)
    }

    /// Rounded percentage in `0..=100`.
    #[must_use]
    pub fn percent(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (self.fraction() * 100.0).round() as u8;
        pct.min(100)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position >= self.total
    }
}
