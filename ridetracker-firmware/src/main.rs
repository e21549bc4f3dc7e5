//! RideTracker - ride timer watch firmware
//!
//! Main firmware binary for an RP2040-based watch with a Sharp memory LCD,
//! four buttons, and a UART Bluetooth bridge to the phone companion app.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ridetracker_core::config::{parse_config, RideConfig};
use ridetracker_core::input::Button;
use ridetracker_display::RideScreen;

use crate::display::{ScreenCell, SharedScreen, SharpMemoryDisplay};

/// Embedded configuration (compiled into firmware)
/// Edit ride.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../ride.toml");

/// Bluetooth bridge baud rate (HM-10 default)
const BRIDGE_BAUD: u32 = 9600;

/// Sharp memory LCD SPI clock
const LCD_SPI_HZ: u32 = 1_000_000;

mod channels;
mod display;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Watch face shared by the controller and display tasks
static SCREEN: StaticCell<ScreenCell> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RideTracker firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Setup UART for the Bluetooth bridge (GPIO0 TX, GPIO1 RX, GPIO2 STATE)
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = BRIDGE_BAUD;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let bridge_state = Input::new(p.PIN_2, Pull::Down);

    info!("UART initialized for Bluetooth bridge");

    // Buttons, active low (GPIO10-13)
    let back = Input::new(p.PIN_10, Pull::Up);
    let up = Input::new(p.PIN_11, Pull::Up);
    let select = Input::new(p.PIN_12, Pull::Up);
    let down = Input::new(p.PIN_13, Pull::Up);

    // Sharp memory LCD on SPI0 (GPIO18 SCK, GPIO19 MOSI, GPIO17 CS)
    let spi_config = {
        let mut cfg = SpiConfig::default();
        cfg.frequency = LCD_SPI_HZ;
        cfg
    };
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::Low);
    let lcd = SharpMemoryDisplay::new(spi, cs);

    info!("LCD initialized");

    let screen = SharedScreen::new(SCREEN.init(Mutex::new(RefCell::new(RideScreen::new()))));
    let debounce_ms = config.buttons.debounce_ms;

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(rx, config.link.inbox_size as usize)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::link_state_task(bridge_state)).unwrap();
    spawner
        .spawn(tasks::button_task(back, Button::Back, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(up, Button::Up, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(select, Button::Select, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(down, Button::Down, debounce_ms))
        .unwrap();
    spawner.spawn(tasks::display_task(lcd, screen)).unwrap();
    spawner.spawn(tasks::controller_task(config, screen)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// build.rs rejects an invalid ride.toml, so the fallback is only reached
/// if the two parsers drift apart.
fn load_config() -> RideConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            debug!("Configuration: {:?}", config);
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            RideConfig::default()
        }
    }
}
