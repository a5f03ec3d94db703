use crate::constants::MS_TO_SEC;

/// Elapsed animation time in seconds, driven by animation-frame timestamps.
/// Never decreases, even if the host hands over an older timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    seconds: f32,
}

impl AnimationClock {
    pub fn advance_to(&mut self, timestamp_ms: f64) -> f32 {
        let t = (timestamp_ms * MS_TO_SEC) as f32;
        if t > self.seconds {
            self.seconds = t;
        }
        self.seconds
    }

    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_milliseconds_and_is_monotonic() {
        let mut c = AnimationClock::default();
        assert!((c.advance_to(1500.0) - 1.5).abs() < 1e-6);
        assert!((c.advance_to(1200.0) - 1.5).abs() < 1e-6);
        assert!((c.advance_to(2016.0) - 2.016).abs() < 1e-5);
    }
}
