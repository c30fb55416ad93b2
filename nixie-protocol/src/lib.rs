//! Bridge Link Protocol
//!
//! The clock has no radio of its own. A BLE bridge module hosts the GATT
//! time service and talks to the clock over UART using small binary frames:
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 0x7E  │ 1B     │ 1B   │ 0–32B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The bridge forwards characteristic writes and connection changes; the
//! clock tells it what to advertise and answers reads.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod gatt;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use gatt::{TimeValue, TIME_CHARACTERISTIC_UUID, TIME_SERVICE_UUID};
pub use messages::{BridgeEvent, ClockCommand};
