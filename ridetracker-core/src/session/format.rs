//! Display text for elapsed time and distance
//!
//! Time is `H:MM` (hours unpadded, minutes zero-padded). Distance is
//! kilometres with exactly one decimal.

use core::fmt::Write;

use heapless::String;

use crate::config::DistanceDisplay;

/// Capacity for elapsed-time text ("4294967295:59" fits)
pub const ELAPSED_TEXT_LEN: usize = 16;

/// Capacity for distance text ("4294967.3" fits)
pub const DISTANCE_TEXT_LEN: usize = 12;

pub type ElapsedText = String<ELAPSED_TEXT_LEN>;
pub type DistanceText = String<DISTANCE_TEXT_LEN>;

/// Format elapsed time as `H:MM`
pub fn format_elapsed(hours: u32, minutes: u8) -> ElapsedText {
    let mut text = ElapsedText::new();
    // Capacity covers the widest u32 hour count
    let written = write!(text, "{}:{:02}", hours, minutes);
    debug_assert!(written.is_ok());
    text
}

/// Format a distance in metres as one-decimal kilometres
pub fn format_distance(metres: u32, mode: DistanceDisplay) -> DistanceText {
    let mut text = DistanceText::new();
    let written = match mode {
        DistanceDisplay::WholeKm => write!(text, "{}.0", metres / 1000),
        DistanceDisplay::Tenths => {
            let tenths = (metres as u64 + 50) / 100;
            write!(text, "{}.{}", tenths / 10, tenths % 10)
        }
    };
    debug_assert!(written.is_ok());
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_format() {
        assert_eq!(format_elapsed(0, 0).as_str(), "0:00");
        assert_eq!(format_elapsed(1, 5).as_str(), "1:05");
        assert_eq!(format_elapsed(12, 59).as_str(), "12:59");
        assert_eq!(format_elapsed(100, 0).as_str(), "100:00");
        assert_eq!(format_elapsed(u32::MAX, 59).as_str(), "4294967295:59");
    }

    #[test]
    fn test_whole_km_truncates() {
        assert_eq!(format_distance(0, DistanceDisplay::WholeKm).as_str(), "0.0");
        assert_eq!(format_distance(999, DistanceDisplay::WholeKm).as_str(), "0.0");
        assert_eq!(format_distance(1500, DistanceDisplay::WholeKm).as_str(), "1.0");
        assert_eq!(format_distance(42195, DistanceDisplay::WholeKm).as_str(), "42.0");
    }

    #[test]
    fn test_tenths_round() {
        assert_eq!(format_distance(0, DistanceDisplay::Tenths).as_str(), "0.0");
        assert_eq!(format_distance(49, DistanceDisplay::Tenths).as_str(), "0.0");
        assert_eq!(format_distance(50, DistanceDisplay::Tenths).as_str(), "0.1");
        assert_eq!(format_distance(1500, DistanceDisplay::Tenths).as_str(), "1.5");
        assert_eq!(format_distance(42195, DistanceDisplay::Tenths).as_str(), "42.2");
        assert_eq!(
            format_distance(u32::MAX, DistanceDisplay::Tenths).as_str(),
            "4294967.3"
        );
    }
}
