//! First asynchronous device failure, reported from wgpu callbacks and
//! picked up by the next draw.

use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct FaultSlot(Arc<Mutex<Option<String>>>);

impl FaultSlot {
    /// Keeps the first message; later ones are only logged.
    pub fn record(&self, message: String) {
        let Ok(mut slot) = self.0.lock() else {
            return;
        };
        if slot.is_none() {
            log::error!("[rays] gpu fault: {message}");
            *slot = Some(message);
        } else {
            log::debug!("[rays] further gpu fault: {message}");
        }
    }

    pub fn take(&self) -> Option<String> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Route validation/out-of-memory errors and device loss into this slot.
    pub fn install(&self, device: &wgpu::Device) {
        let errors = self.clone();
        device.on_uncaptured_error(Box::new(move |e: wgpu::Error| {
            errors.record(format!("uncaptured: {e}"));
        }));
        let lost = self.clone();
        device.set_device_lost_callback(move |reason, message| {
            // `destroy()` reports itself as a loss.
            if matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                return;
            }
            lost.record(format!("device lost ({reason:?}): {message}"));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_yields_nothing() {
        assert_eq!(FaultSlot::default().take(), None);
    }

    #[test]
    fn first_fault_wins_and_is_taken_once() {
        let slot = FaultSlot::default();
        let reporter = slot.clone();
        reporter.record("validation".into());
        reporter.record("oom".into());
        assert_eq!(slot.take().as_deref(), Some("validation"));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn faults_cross_threads() {
        let slot = FaultSlot::default();
        let reporter = slot.clone();
        std::thread::spawn(move || reporter.record("lost".into()))
            .join()
            .unwrap();
        assert_eq!(slot.take().as_deref(), Some("lost"));
    }
}
