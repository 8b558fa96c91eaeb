//! Debounced container-size observation.

use std::time::{Duration, Instant};

/// Measured container size plus the platform device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
}

impl ContainerSize {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Holds back size changes until they stop arriving for `delay`.
///
/// Every observation restarts the quiet period, so a continuous window drag
/// results in a single surface reallocation once the drag settles.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(ContainerSize, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a measured size at `now`, replacing any pending one.
    pub fn observe(&mut self, size: ContainerSize, now: Instant) {
        self.pending = Some((size, now));
    }

    /// Returns the settled size once `delay` has passed since the last observation.
    pub fn ready(&mut self, now: Instant) -> Option<ContainerSize> {
        match self.pending {
            Some((size, seen)) if now.saturating_duration_since(seen) >= self.delay => {
                self.pending = None;
                Some(size)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(500));
        debouncer.observe(ContainerSize::new(100, 100, 1.0), start);

        assert_eq!(debouncer.ready(start + Duration::from_millis(499)), None);
        assert_eq!(
            debouncer.ready(start + Duration::from_millis(500)),
            Some(ContainerSize::new(100, 100, 1.0))
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn each_observation_restarts_the_delay() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(500));
        debouncer.observe(ContainerSize::new(100, 100, 1.0), start);
        debouncer.observe(
            ContainerSize::new(120, 90, 1.0),
            start + Duration::from_millis(400),
        );

        assert_eq!(debouncer.ready(start + Duration::from_millis(600)), None);
        assert_eq!(
            debouncer.ready(start + Duration::from_millis(900)),
            Some(ContainerSize::new(120, 90, 1.0))
        );
        assert_eq!(debouncer.ready(start + Duration::from_secs(5)), None);
    }
}
