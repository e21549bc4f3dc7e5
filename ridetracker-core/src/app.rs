//! Ride app: session plus its collaborators
//!
//! `RideApp` owns the ride session, the screen and the link to the paired
//! device. Host events (minute ticks, button clicks, inbox and outbox
//! callbacks) are delivered through [`RideApp::dispatch`]; each one runs
//! to completion before the next.

use ridetracker_protocol::{CompanionMessage, Dictionary, RunningNotification};

use crate::config::RideConfig;
use crate::input::{Button, ButtonMap};
use crate::link::{Completion, LinkStats, MessageError};
use crate::session::RideSession;
use crate::state::Event;
use crate::traits::{ButtonLabel, PairedLink, RideDisplay};

/// Events delivered by the host platform
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// One minute elapsed
    Tick,
    /// Single click on a button
    Click(Button),
    /// Dictionary received from the paired device
    InboxReceived(Dictionary),
    /// Inbound message lost
    InboxDropped(MessageError),
    /// Outbound message acknowledged
    OutboxSent { transaction_id: u8 },
    /// Outbound message failed after queueing
    OutboxFailed {
        transaction_id: u8,
        reason: MessageError,
    },
}

impl From<Completion> for HostEvent {
    fn from(c: Completion) -> Self {
        match c {
            Completion::Sent { transaction_id } => HostEvent::OutboxSent { transaction_id },
            Completion::Failed {
                transaction_id,
                reason,
            } => HostEvent::OutboxFailed {
                transaction_id,
                reason,
            },
        }
    }
}

/// Ride callbacks
pub trait RideHandler {
    /// One minute elapsed
    fn on_tick(&mut self);

    fn on_start_stop_pressed(&mut self);

    fn on_reset_pressed(&mut self);

    /// Distance reported by the paired device
    fn on_distance_received(&mut self, metres: u32);
}

/// The ride app
pub struct RideApp<D, L> {
    session: RideSession,
    buttons: ButtonMap,
    display: D,
    link: L,
    stats: LinkStats,
}

impl<D: RideDisplay, L: PairedLink> RideApp<D, L> {
    pub fn new(config: &RideConfig, display: D, link: L) -> Self {
        Self {
            session: RideSession::new(&config.session),
            buttons: ButtonMap::from_config(&config.buttons),
            display,
            link,
            stats: LinkStats::new(),
        }
    }

    /// Render the initial screen
    pub fn start(&mut self) {
        self.display.set_time_text(&self.session.elapsed_text());
        self.display.set_distance_text(&self.session.distance_text());
        self.sync_controls();
    }

    /// Handle one host event
    ///
    /// Returns the session event it produced, if any.
    pub fn dispatch(&mut self, event: HostEvent) -> Option<Event> {
        match event {
            HostEvent::Tick => self.apply(Event::MinuteTick),
            HostEvent::Click(button) => {
                let event = self.buttons.event_for(button)?;
                self.apply(event)
            }
            HostEvent::InboxReceived(dictionary) => {
                self.stats.record_received();
                match CompanionMessage::from_dictionary(&dictionary)? {
                    CompanionMessage::Distance { metres } => {
                        self.apply(Event::DistanceReceived(metres))
                    }
                }
            }
            HostEvent::InboxDropped(reason) => {
                self.stats.record_inbox_dropped(reason);
                None
            }
            HostEvent::OutboxSent { .. } => {
                self.stats.record_sent();
                None
            }
            HostEvent::OutboxFailed { reason, .. } => {
                self.stats.record_outbox_failed(reason);
                None
            }
        }
    }

    /// Apply a session event through the ride callbacks
    pub fn apply(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::StartStop => self.on_start_stop_pressed(),
            Event::Reset => self.on_reset_pressed(),
            Event::MinuteTick => self.on_tick(),
            Event::DistanceReceived(metres) => self.on_distance_received(metres),
        }
        Some(event)
    }

    pub fn session(&self) -> &RideSession {
        &self.session
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Label and reset visibility follow the running flag
    fn sync_controls(&mut self) {
        let running = self.session.is_running();
        self.display
            .set_start_stop_label(ButtonLabel::for_running(running));
        self.display.set_reset_visible(!running);
    }

    /// Send a running notification if a connection is available
    fn notify(&mut self, notification: RunningNotification) {
        if !self.link.is_connected() {
            self.stats.record_not_connected();
            return;
        }

        let result = notification
            .to_dictionary()
            .map_err(MessageError::from)
            .and_then(|dictionary| self.link.send(&dictionary));

        match result {
            Ok(_) => self.stats.record_queued(),
            Err(e) => self.stats.record_rejected(e),
        }
    }
}

impl<D: RideDisplay, L: PairedLink> RideHandler for RideApp<D, L> {
    fn on_tick(&mut self) {
        if let Some(elapsed) = self.session.tick() {
            self.display.set_time_text(&elapsed.text());
        }
    }

    fn on_start_stop_pressed(&mut self) {
        let notification = self.session.start_stop();
        self.sync_controls();
        self.notify(notification);
    }

    fn on_reset_pressed(&mut self) {
        if self.session.reset() {
            self.display.set_time_text(&self.session.elapsed_text());
            self.display.set_distance_text(&self.session.distance_text());
        }
    }

    fn on_distance_received(&mut self, metres: u32) {
        let text = self.session.on_distance_update(metres);
        self.display.set_distance_text(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DistanceDisplay, RideConfig};
    use heapless::{String, Vec};
    use ridetracker_protocol::{Tuple, KEY_OTHER};

    /// Records the latest value of every element and counts writes
    #[derive(Debug, Default)]
    struct RecordingDisplay {
        time: String<16>,
        distance: String<16>,
        label: Option<ButtonLabel>,
        reset_visible: Option<bool>,
        writes: usize,
    }

    impl RideDisplay for RecordingDisplay {
        fn set_time_text(&mut self, text: &str) {
            self.time.clear();
            self.time.push_str(text).unwrap();
            self.writes += 1;
        }

        fn set_distance_text(&mut self, text: &str) {
            self.distance.clear();
            self.distance.push_str(text).unwrap();
            self.writes += 1;
        }

        fn set_start_stop_label(&mut self, label: ButtonLabel) {
            self.label = Some(label);
            self.writes += 1;
        }

        fn set_reset_visible(&mut self, visible: bool) {
            self.reset_visible = Some(visible);
            self.writes += 1;
        }
    }

    #[derive(Debug)]
    struct FakeLink {
        connected: bool,
        fail_with: Option<MessageError>,
        sent: Vec<Dictionary, 8>,
    }

    impl FakeLink {
        fn connected() -> Self {
            Self {
                connected: true,
                fail_with: None,
                sent: Vec::new(),
            }
        }

        fn running_values(&self) -> Vec<bool, 8> {
            self.sent
                .iter()
                .map(|d| RunningNotification::from_dictionary(d).unwrap().running)
                .collect()
        }
    }

    impl PairedLink for FakeLink {
        fn is_connected(&self) -> bool {
            self.connected
        }

        fn send(&mut self, dictionary: &Dictionary) -> Result<u8, MessageError> {
            if let Some(e) = self.fail_with {
                return Err(e);
            }
            self.sent.push(dictionary.clone()).unwrap();
            Ok(self.sent.len() as u8 - 1)
        }
    }

    fn started_app() -> RideApp<RecordingDisplay, FakeLink> {
        let mut app = RideApp::new(
            &RideConfig::default(),
            RecordingDisplay::default(),
            FakeLink::connected(),
        );
        app.start();
        app
    }

    fn distance(metres: u32) -> HostEvent {
        HostEvent::InboxReceived(
            CompanionMessage::Distance { metres }
                .to_dictionary()
                .unwrap(),
        )
    }

    #[test]
    fn test_start_renders_initial_screen() {
        let app = started_app();
        let display = app.display();
        assert_eq!(display.time.as_str(), "0:00");
        assert_eq!(display.distance.as_str(), "0.0");
        assert_eq!(display.label, Some(ButtonLabel::Start));
        assert_eq!(display.reset_visible, Some(true));
        assert!(app.link().sent.is_empty());
    }

    #[test]
    fn test_start_hides_reset_and_notifies() {
        let mut app = started_app();

        let event = app.dispatch(HostEvent::Click(Button::Up));
        assert_eq!(event, Some(Event::StartStop));
        assert!(app.session().is_running());
        assert_eq!(app.display().label, Some(ButtonLabel::Stop));
        assert_eq!(app.display().reset_visible, Some(false));
        assert_eq!(app.link().running_values().as_slice(), &[true]);
        assert_eq!(app.stats().notifications_queued, 1);
    }

    #[test]
    fn test_double_start_stop_is_net_zero() {
        let mut app = started_app();
        app.dispatch(HostEvent::Click(Button::Up));
        app.dispatch(HostEvent::Click(Button::Up));

        assert!(!app.session().is_running());
        assert_eq!(app.display().label, Some(ButtonLabel::Start));
        assert_eq!(app.display().reset_visible, Some(true));
        assert_eq!(app.link().running_values().as_slice(), &[true, false]);
    }

    #[test]
    fn test_notification_dropped_without_connection() {
        let mut app = started_app();
        app.link_mut().connected = false;

        app.dispatch(HostEvent::Click(Button::Up));
        assert!(app.session().is_running());
        assert!(app.link().sent.is_empty());
        assert_eq!(app.stats().notifications_dropped, 1);
        assert_eq!(app.stats().last_error, Some(MessageError::NotConnected));
    }

    #[test]
    fn test_notification_rejected_by_link() {
        let mut app = started_app();
        app.link_mut().fail_with = Some(MessageError::Busy);

        app.dispatch(HostEvent::Click(Button::Up));
        assert!(app.session().is_running());
        assert_eq!(app.stats().notifications_rejected, 1);
        assert_eq!(app.stats().last_error, Some(MessageError::Busy));
    }

    #[test]
    fn test_ride_scenario() {
        let mut app = started_app();

        app.dispatch(HostEvent::Click(Button::Up));
        for _ in 0..65 {
            app.dispatch(HostEvent::Tick);
        }
        assert_eq!(app.display().time.as_str(), "1:05");
        assert_eq!(app.session().hours(), 1);
        assert_eq!(app.session().minutes(), 5);

        app.dispatch(distance(1500));
        assert_eq!(app.display().distance.as_str(), "1.0");

        app.dispatch(HostEvent::Click(Button::Up));
        app.dispatch(HostEvent::Click(Button::Down));

        assert_eq!(app.display().time.as_str(), "0:00");
        assert_eq!(app.display().distance.as_str(), "0.0");
        assert_eq!(app.session().elapsed_ticks(), 0);
        assert_eq!(app.session().distance_metres(), 0);

        // One "true" at start, one "false" at stop, nothing at reset
        assert_eq!(app.link().running_values().as_slice(), &[true, false]);
    }

    #[test]
    fn test_tick_while_stopped_leaves_screen() {
        let mut app = started_app();
        let writes = app.display().writes;

        app.dispatch(HostEvent::Tick);
        assert_eq!(app.display().writes, writes);
        assert_eq!(app.display().time.as_str(), "0:00");
    }

    #[test]
    fn test_reset_while_running_is_ignored() {
        let mut app = started_app();
        app.dispatch(HostEvent::Click(Button::Up));
        app.dispatch(HostEvent::Tick);
        let writes = app.display().writes;

        app.dispatch(HostEvent::Click(Button::Down));
        assert_eq!(app.display().writes, writes);
        assert_eq!(app.display().time.as_str(), "0:01");
        assert_eq!(app.session().elapsed_ticks(), 1);
    }

    #[test]
    fn test_unmapped_button_ignored() {
        let mut app = started_app();
        assert_eq!(app.dispatch(HostEvent::Click(Button::Select)), None);
        assert_eq!(app.dispatch(HostEvent::Click(Button::Back)), None);
        assert!(!app.session().is_running());
    }

    #[test]
    fn test_inbound_distance() {
        let mut app = started_app();

        let event = app.dispatch(distance(42195));
        assert_eq!(event, Some(Event::DistanceReceived(42195)));
        assert_eq!(app.display().distance.as_str(), "42.0");
        assert_eq!(app.session().distance_metres(), 42195);
        assert_eq!(app.stats().inbox_received, 1);
    }

    #[test]
    fn test_inbound_unrelated_key_ignored() {
        let mut app = started_app();
        app.dispatch(distance(700));
        let writes = app.display().writes;

        let mut dictionary = Dictionary::new();
        dictionary.push(Tuple::uint32(KEY_OTHER, 99)).unwrap();
        assert_eq!(app.dispatch(HostEvent::InboxReceived(dictionary)), None);

        assert_eq!(app.display().writes, writes);
        assert_eq!(app.session().distance_metres(), 700);
    }

    #[test]
    fn test_tenths_policy() {
        let config = RideConfig {
            session: crate::config::SessionConfig {
                distance_display: DistanceDisplay::Tenths,
            },
            ..Default::default()
        };
        let mut app = RideApp::new(&config, RecordingDisplay::default(), FakeLink::connected());
        app.start();

        app.dispatch(distance(42195));
        assert_eq!(app.display().distance.as_str(), "42.2");
    }

    #[test]
    fn test_custom_button_map() {
        let mut config = RideConfig::default();
        config.buttons.start_stop = Button::Select;
        let mut app = RideApp::new(&config, RecordingDisplay::default(), FakeLink::connected());
        app.start();

        assert_eq!(app.dispatch(HostEvent::Click(Button::Up)), None);
        app.dispatch(HostEvent::Click(Button::Select));
        assert!(app.session().is_running());
    }

    #[test]
    fn test_outbox_callbacks_update_stats() {
        let mut app = started_app();

        app.dispatch(HostEvent::from(Completion::Sent { transaction_id: 0 }));
        app.dispatch(HostEvent::from(Completion::Failed {
            transaction_id: 1,
            reason: MessageError::SendTimeout,
        }));
        app.dispatch(HostEvent::InboxDropped(MessageError::BufferOverflow));

        let stats = app.stats();
        assert_eq!(stats.outbox_sent, 1);
        assert_eq!(stats.outbox_failed, 1);
        assert_eq!(stats.inbox_dropped, 1);
        assert_eq!(stats.last_error, Some(MessageError::BufferOverflow));
    }
}
