//! Home store: the single authoritative [`HomeState`].
//!
//! Readers get an immutable `Arc` snapshot and never wait for writers.
//! Writers are serialized: validate, apply onto a clone, run automation once,
//! then swap the snapshot in. A rejected update leaves nothing behind.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use aircare_domain::automation::{self, AutomationReport};
use aircare_domain::error::AirCareError;
use aircare_domain::event::Event;
use aircare_domain::home::HomeState;
use aircare_domain::update::PartialUpdate;

use crate::ports::EventPublisher;

/// Owns the live [`HomeState`] and publishes domain events on every change.
pub struct HomeStore<P> {
    state: watch::Sender<Arc<HomeState>>,
    write: Mutex<()>,
    publisher: P,
}

impl<P: EventPublisher + Send + Sync> HomeStore<P> {
    /// Create a store holding the default home.
    #[must_use]
    pub fn new(publisher: P) -> Self {
        Self::with_state(publisher, HomeState::default())
    }

    #[must_use]
    pub fn with_state(publisher: P, state: HomeState) -> Self {
        let (sender, _) = watch::channel(Arc::new(state));
        Self {
            state: sender,
            write: Mutex::new(()),
            publisher,
        }
    }

    /// Current state. Never blocks on a concurrent update.
    #[must_use]
    pub fn snapshot(&self) -> Arc<HomeState> {
        Arc::clone(&self.state.borrow())
    }

    /// Receiver that observes every snapshot published from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<HomeState>> {
        self.state.subscribe()
    }

    /// Apply a partial update and one automation pass, atomically.
    ///
    /// The returned snapshot already carries the automation effects.
    ///
    /// # Errors
    ///
    /// Returns [`AirCareError::Validation`] when any part of the update is
    /// invalid. The stored state is left untouched in that case.
    pub async fn apply(&self, update: PartialUpdate) -> Result<Arc<HomeState>, AirCareError> {
        let _guard = self.write.lock().await;

        let current = self.snapshot();
        let validated = current.validate(update)?;

        let mut next = HomeState::clone(&current);
        next.apply(&validated);
        let report = automation::run(&mut next);

        tracing::debug!(
            room = %validated.target(),
            readings = validated.has_readings(),
            activations = report.activations.len(),
            "applied update"
        );

        let next = Arc::new(next);
        self.state.send_replace(Arc::clone(&next));
        self.publish_all(&next, &report).await;

        Ok(next)
    }

    /// Restore the default home, as a process restart would.
    pub async fn reset(&self) -> Arc<HomeState> {
        let _guard = self.write.lock().await;
        let next = Arc::new(HomeState::default());
        self.state.send_replace(Arc::clone(&next));
        tracing::info!("home state reset to defaults");
        self.publish(Event::state_updated(next.selected_room)).await;
        next
    }

    async fn publish_all(&self, state: &HomeState, report: &AutomationReport) {
        self.publish(Event::state_updated(state.selected_room)).await;

        for activation in &report.activations {
            tracing::info!(
                rule = %activation.rule,
                device = %activation.device,
                value = activation.value,
                "automation activated device"
            );
            self.publish(Event::device_activated(activation)).await;
        }

        for advisory in &report.delta.advisories {
            self.publish(Event::advisory(advisory)).await;
        }
    }

    async fn publish(&self, event: Event) {
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(error = %err, "failed to publish event");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use super::*;
    use aircare_domain::device::{DeviceId, DevicePatch, FanState};
    use aircare_domain::error::ValidationError;
    use aircare_domain::event::EventKind;
    use aircare_domain::reading::Measurement;
    use aircare_domain::room::{RoomId, RoomTarget};

    use crate::event_bus::InProcessEventBus;

    #[derive(Default)]
    struct SpyPublisher {
        events: std::sync::Mutex<Vec<Event>>,
    }

    impl SpyPublisher {
        fn kinds(&self) -> Vec<EventKind> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.kind.clone())
                .collect()
        }
    }

    impl EventPublisher for SpyPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = Result<(), AirCareError>> + Send {
            self.events.lock().unwrap().push(event);
            async { Ok(()) }
        }
    }

    struct FailingPublisher;

    impl EventPublisher for FailingPublisher {
        fn publish(&self, _event: Event) -> impl Future<Output = Result<(), AirCareError>> + Send {
            async { Err(AirCareError::internal(std::io::Error::other("bus down"))) }
        }
    }

    fn co2_breach() -> PartialUpdate {
        PartialUpdate::builder()
            .reading(Measurement::Co2, 1500.0)
            .target_room("all")
            .build()
    }

    #[tokio::test]
    async fn should_return_automation_effects_in_same_response() {
        let store = HomeStore::new(SpyPublisher::default());

        let state = store.apply(co2_breach()).await.unwrap();

        assert!((state.aggregate.co2 - 1500.0).abs() < f64::EPSILON);
        assert!(state.devices.window_servo.active);
        assert_eq!(
            state.devices.intake_fan,
            FanState {
                active: true,
                speed: 75
            }
        );
        assert_eq!(store.snapshot(), state);
    }

    #[tokio::test]
    async fn should_leave_state_untouched_when_update_rejected() {
        let store = HomeStore::new(SpyPublisher::default());
        let before = store.snapshot();

        let update = PartialUpdate::builder()
            .reading(Measurement::Pm25, 90.0)
            .target_room("all")
            .device("coffeeMaker", DevicePatch::active(true))
            .build();
        let err = store.apply(update).await.unwrap_err();

        assert!(matches!(
            err,
            AirCareError::Validation(ValidationError::UnknownDevice(_))
        ));
        assert_eq!(store.snapshot(), before);
        assert!(store.publisher.kinds().is_empty());
    }

    #[tokio::test]
    async fn should_publish_state_and_activation_events() {
        let store = HomeStore::new(SpyPublisher::default());

        store.apply(co2_breach()).await.unwrap();

        let kinds = store.publisher.kinds();
        assert_eq!(kinds.len(), 3);
        assert_eq!(
            kinds[0],
            EventKind::StateUpdated {
                selected_room: RoomTarget::All
            }
        );
        assert!(kinds[1..].iter().all(|kind| matches!(
            kind,
            EventKind::DeviceActivated { device, .. }
                if *device == DeviceId::WindowServo || *device == DeviceId::IntakeFan
        )));
    }

    #[tokio::test]
    async fn should_not_republish_activation_when_device_already_on() {
        let store = HomeStore::new(SpyPublisher::default());
        store.apply(co2_breach()).await.unwrap();
        store.publisher.events.lock().unwrap().clear();

        store.apply(co2_breach()).await.unwrap();

        assert_eq!(store.publisher.kinds().len(), 1);
    }

    #[tokio::test]
    async fn should_publish_advisory_for_humidity() {
        let store = HomeStore::new(SpyPublisher::default());
        let update = PartialUpdate::builder()
            .reading(Measurement::Humidity, 72.0)
            .target_room("all")
            .build();

        store.apply(update).await.unwrap();

        assert!(store.publisher.kinds().iter().any(|kind| matches!(
            kind,
            EventKind::Advisory { message, .. } if message == "Humidity high (72.0%) - Consider dehumidify mode"
        )));
    }

    #[tokio::test]
    async fn should_apply_update_even_when_publishing_fails() {
        let store = HomeStore::new(FailingPublisher);

        let state = store.apply(co2_breach()).await.unwrap();

        assert!(state.devices.window_servo.active);
    }

    #[tokio::test]
    async fn should_notify_subscribers_of_new_snapshot() {
        let store = HomeStore::new(InProcessEventBus::new(8));
        let mut rx = store.subscribe();

        store.apply(co2_breach()).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().devices.window_servo.active);
    }

    #[tokio::test]
    async fn should_keep_room_mean_under_concurrent_room_updates() {
        let store = Arc::new(HomeStore::new(InProcessEventBus::new(64)));

        let handles: Vec<_> = (0..30_u32)
            .map(|i| {
                let store = Arc::clone(&store);
                let room = RoomId::ALL[i as usize % RoomId::ALL.len()];
                tokio::spawn(async move {
                    let update = PartialUpdate::builder()
                        .reading(Measurement::Pm25, f64::from(i))
                        .target_room(room.as_str())
                        .build();
                    store.apply(update).await.unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let state = store.snapshot();
        let rooms = &state.rooms;
        let mean = (rooms.living_room.pm25 + rooms.bedroom.pm25 + rooms.kitchen.pm25) / 3.0;
        assert!((state.aggregate.pm25 - mean).abs() < 1e-9);
    }

    #[tokio::test]
    async fn should_restore_defaults_on_reset() {
        let store = HomeStore::new(SpyPublisher::default());
        store.apply(co2_breach()).await.unwrap();

        let state = store.reset().await;

        assert_eq!(*state, HomeState::default());
        assert_eq!(*store.snapshot(), HomeState::default());
    }
}
