//! Property tests for the ride session

use proptest::prelude::*;

use ridetracker_core::config::{DistanceDisplay, SessionConfig};
use ridetracker_core::session::{format_distance, RideSession, MINUTES_PER_HOUR};

#[derive(Debug, Clone, Copy)]
enum Op {
    StartStop,
    Tick,
    Reset,
    Distance(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::StartStop),
        6 => Just(Op::Tick),
        1 => Just(Op::Reset),
        1 => any::<u32>().prop_map(Op::Distance),
    ]
}

fn display() -> impl Strategy<Value = DistanceDisplay> {
    prop_oneof![Just(DistanceDisplay::WholeKm), Just(DistanceDisplay::Tenths)]
}

proptest! {
    #[test]
    fn running_ticks_decompose(n in 0u32..5_000) {
        let mut session = RideSession::default();
        session.start_stop();
        for _ in 0..n {
            session.tick();
        }

        prop_assert_eq!(session.elapsed_ticks(), n);
        prop_assert_eq!(session.hours(), n / MINUTES_PER_HOUR);
        prop_assert_eq!(session.minutes() as u32, n % MINUTES_PER_HOUR);
    }

    #[test]
    fn invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 0..300)) {
        let mut session = RideSession::default();

        for op in ops {
            let before = session.clone();
            match op {
                Op::StartStop => {
                    let notification = session.start_stop();
                    prop_assert_eq!(notification.running, session.is_running());
                    prop_assert_ne!(before.is_running(), session.is_running());
                }
                Op::Tick => {
                    let changed = session.tick().is_some();
                    prop_assert_eq!(changed, before.is_running());
                    if !before.is_running() {
                        prop_assert_eq!(session.elapsed_ticks(), before.elapsed_ticks());
                    }
                }
                Op::Reset => {
                    let done = session.reset();
                    prop_assert_eq!(done, !before.is_running());
                    if before.is_running() {
                        prop_assert_eq!(session.elapsed_ticks(), before.elapsed_ticks());
                        prop_assert_eq!(session.distance_metres(), before.distance_metres());
                    } else {
                        prop_assert_eq!(session.elapsed_ticks(), 0);
                        prop_assert_eq!(session.distance_metres(), 0);
                    }
                }
                Op::Distance(metres) => {
                    session.on_distance_update(metres);
                    prop_assert_eq!(session.distance_metres(), metres);
                    prop_assert_eq!(session.elapsed_ticks(), before.elapsed_ticks());
                }
            }

            prop_assert!(session.minutes() < 60);
            prop_assert_eq!(
                session.hours() * MINUTES_PER_HOUR + session.minutes() as u32,
                session.elapsed_ticks()
            );
        }
    }

    #[test]
    fn distance_text_has_one_decimal(metres in any::<u32>(), policy in display()) {
        let text = format_distance(metres, policy);
        let (whole, tenths) = text.split_once('.').unwrap();

        prop_assert_eq!(tenths.len(), 1);
        prop_assert!(whole.chars().all(|c| c.is_ascii_digit()));
        if policy == DistanceDisplay::WholeKm {
            prop_assert_eq!(whole.parse::<u32>().unwrap(), metres / 1000);
            prop_assert_eq!(tenths, "0");
        }
    }

    #[test]
    fn distance_update_matches_formatter(metres in any::<u32>(), policy in display()) {
        let mut session = RideSession::new(&SessionConfig { distance_display: policy });
        prop_assert_eq!(session.on_distance_update(metres), format_distance(metres, policy));
    }
}
