//! Nixie clock firmware
//!
//! Main firmware binary for RP2040-based four-tube nixie clocks. The
//! tubes hang off a chain of HV513 drivers on SPI0; the time is set over
//! BLE through a bridge module on UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nixie_core::config::ClockConfig;
use nixie_drivers::register::Hv513Bank;

use crate::config::load_config;
use crate::tasks::Display;

mod channels;
mod config;
mod feed;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// HV513 shift clock (Hz)
const SPI_FREQUENCY: u32 = 1_000_000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

static CLOCK_CONFIG: StaticCell<ClockConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nixie clock firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static ClockConfig = CLOCK_CONFIG.init(load_config());

    // HV513 chain: SCK=GPIO18, MOSI=GPIO19, MISO=GPIO16 (unused)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQUENCY;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);

    // Outputs start latched low, blanked and floating
    let latch = Output::new(p.PIN_17, Level::Low);
    let blank = Output::new(p.PIN_20, Level::Low);
    let hi_z = Output::new(p.PIN_21, Level::High);

    let chain = Hv513Bank::new(spi, latch, blank, hi_z, Display::REQUIRED_BANKS);
    let display = Display::new(chain);
    info!("HV513 chain initialized ({} banks)", Display::REQUIRED_BANKS);

    // Setup UART for the bridge module
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baud;

    let tx_buf = TX_BUF.init([0u8; 128]);
    let rx_buf = RX_BUF.init([0u8; 128]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for bridge link");

    // Spawn tasks
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::link_tx_task(tx, config.link.name.as_str()))
        .unwrap();
    spawner.spawn(tasks::clock_task(display, config)).unwrap();

    info!("All tasks spawned");
}
