//! Inter-task communication channels
//!
//! Static signals shared between the clock and link tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use nixie_core::time::ClockTime;
use nixie_protocol::TimeValue;

/// Time written by a central (set by link RX, taken by the clock)
pub static TIME_UPDATE: Signal<CriticalSectionRawMutex, TimeValue> = Signal::new();

/// Displayed time changed (set by the clock, reported by link TX)
pub static TIME_REPORT: Signal<CriticalSectionRawMutex, ClockTime> = Signal::new();

/// Heartbeat request received from the bridge
pub static PING_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Bridge asked for advertising to be set up again
pub static ADVERTISE_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// A central is connected to the bridge
pub static CONNECTED: AtomicBool = AtomicBool::new(false);
