//! Watch face shared between the controller and the display task

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use ridetracker_core::traits::{ButtonLabel, RideDisplay};
use ridetracker_display::RideScreen;

use crate::channels::SCREEN_UPDATE;

pub type ScreenCell = Mutex<CriticalSectionRawMutex, RefCell<RideScreen>>;

/// Handle to the shared watch face
///
/// Setters update the model under a short critical section and signal
/// the display task when something changed.
#[derive(Clone, Copy)]
pub struct SharedScreen {
    cell: &'static ScreenCell,
}

impl SharedScreen {
    pub fn new(cell: &'static ScreenCell) -> Self {
        Self { cell }
    }

    /// Take the pending changes for rendering
    pub fn snapshot(&self) -> RideScreen {
        self.cell.lock(|screen| screen.borrow_mut().snapshot())
    }

    pub fn is_dirty(&self) -> bool {
        self.cell.lock(|screen| screen.borrow().is_dirty())
    }

    /// Redraw everything on the next render
    pub fn invalidate(&self) {
        self.cell.lock(|screen| screen.borrow_mut().invalidate());
    }

    fn update(&self, f: impl FnOnce(&mut RideScreen)) {
        let changed = self.cell.lock(|screen| {
            let mut screen = screen.borrow_mut();
            f(&mut screen);
            screen.is_dirty()
        });
        if changed {
            SCREEN_UPDATE.signal(());
        }
    }
}

impl RideDisplay for SharedScreen {
    fn set_time_text(&mut self, text: &str) {
        self.update(|screen| screen.set_time_text(text));
    }

    fn set_distance_text(&mut self, text: &str) {
        self.update(|screen| screen.set_distance_text(text));
    }

    fn set_start_stop_label(&mut self, label: ButtonLabel) {
        self.update(|screen| screen.set_start_stop_label(label));
    }

    fn set_reset_visible(&mut self, visible: bool) {
        self.update(|screen| screen.set_reset_visible(visible));
    }
}
