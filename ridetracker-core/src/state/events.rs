//! Events delivered to a ride session

/// Events that drive a ride session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User events
    /// Start/stop button pressed
    StartStop,
    /// Reset button pressed
    Reset,

    // Timer events
    /// One minute elapsed
    MinuteTick,

    // Paired device events
    /// Distance travelled reported by the paired device (metres)
    DistanceReceived(u32),
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::StartStop | Event::Reset)
    }

    /// Check if this event came from the paired device
    pub fn is_link_event(&self) -> bool {
        matches!(self, Event::DistanceReceived(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_events() {
        assert!(Event::StartStop.is_user_event());
        assert!(Event::Reset.is_user_event());
        assert!(!Event::MinuteTick.is_user_event());
        assert!(!Event::DistanceReceived(10).is_user_event());
    }

    #[test]
    fn test_link_events() {
        assert!(Event::DistanceReceived(0).is_link_event());
        assert!(!Event::StartStop.is_link_event());
        assert!(!Event::MinuteTick.is_link_event());
    }
}
