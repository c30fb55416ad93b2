//! Message types for the bridge link
//!
//! - Bridge → clock: characteristic writes, connection changes, heartbeat
//! - Clock → bridge: advertising setup, heartbeat responses, time reports

use crate::frame::{Frame, FrameError};
use crate::gatt::TimeValue;

// Message type IDs: Bridge → Clock
pub const MSG_TIME_WRITTEN: u8 = 0x01;
pub const MSG_CONNECTED: u8 = 0x02;
pub const MSG_DISCONNECTED: u8 = 0x03;
pub const MSG_PING: u8 = 0x04;
pub const MSG_READY: u8 = 0x05;

// Message type IDs: Clock → Bridge
pub const MSG_ADVERTISE: u8 = 0x20;
pub const MSG_PONG: u8 = 0x21;
pub const MSG_REPORT: u8 = 0x22;

/// Events from the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// A central wrote the time characteristic
    TimeWritten(TimeValue),
    /// A central connected
    Connected,
    /// The central went away
    Disconnected,
    /// Heartbeat request
    Ping,
    /// Result of the last `Advertise`
    Ready { ok: bool },
}

impl BridgeEvent {
    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match (frame.kind, payload) {
            (MSG_TIME_WRITTEN, bytes) => TimeValue::from_bytes(bytes).map(Self::TimeWritten),
            (MSG_CONNECTED, []) => Ok(Self::Connected),
            (MSG_DISCONNECTED, []) => Ok(Self::Disconnected),
            (MSG_PING, []) => Ok(Self::Ping),
            (MSG_READY, [status]) => Ok(Self::Ready { ok: *status != 0 }),
            (MSG_CONNECTED | MSG_DISCONNECTED | MSG_PING | MSG_READY, _) => {
                Err(FrameError::InvalidFrame)
            }
            _ => Err(FrameError::UnknownMessage),
        }
    }

    /// Check if the clock has to send `Advertise` again
    ///
    /// True when the bridge reports that advertising did not start.
    pub fn requests_advertise(&self) -> bool {
        matches!(self, Self::Ready { ok: false })
    }

    /// Encode this event into a frame (bridge side, or tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            Self::TimeWritten(value) => Frame::new(MSG_TIME_WRITTEN, &value.to_bytes()),
            Self::Connected => Ok(Frame::empty(MSG_CONNECTED)),
            Self::Disconnected => Ok(Frame::empty(MSG_DISCONNECTED)),
            Self::Ping => Ok(Frame::empty(MSG_PING)),
            Self::Ready { ok } => Frame::new(MSG_READY, &[*ok as u8]),
        }
    }
}

/// Commands from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockCommand<'a> {
    /// Start advertising the time service under `name`
    Advertise { name: &'a str },
    /// Heartbeat response
    Pong,
    /// Current time, served to characteristic reads
    Report(TimeValue),
}

impl<'a> ClockCommand<'a> {
    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            Self::Advertise { name } => {
                let bytes = name.as_bytes();
                if bytes.is_empty() {
                    return Err(FrameError::InvalidFrame);
                }
                Frame::new(MSG_ADVERTISE, bytes)
            }
            Self::Pong => Ok(Frame::empty(MSG_PONG)),
            Self::Report(value) => Frame::new(MSG_REPORT, &value.to_bytes()),
        }
    }

    /// Parse a command from a frame (bridge side, or tests)
    ///
    /// The returned command borrows the frame's payload.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_ADVERTISE => core::str::from_utf8(&frame.payload)
                .map(|name| Self::Advertise { name })
                .map_err(|_| FrameError::InvalidFrame),
            MSG_PONG if frame.payload.is_empty() => Ok(Self::Pong),
            MSG_REPORT => TimeValue::from_bytes(&frame.payload).map(Self::Report),
            MSG_PONG => Err(FrameError::InvalidFrame),
            _ => Err(FrameError::UnknownMessage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_written() {
        let frame = Frame::new(MSG_TIME_WRITTEN, &[5, 30]).unwrap();
        let event = BridgeEvent::from_frame(&frame).unwrap();
        assert_eq!(
            event,
            BridgeEvent::TimeWritten(TimeValue { hour: 5, minute: 30 })
        );
    }

    #[test]
    fn test_time_written_out_of_range() {
        let frame = Frame::new(MSG_TIME_WRITTEN, &[44, 44]).unwrap();
        assert_eq!(BridgeEvent::from_frame(&frame), Err(FrameError::InvalidTime));
    }

    #[test]
    fn test_connection_events() {
        assert_eq!(
            BridgeEvent::from_frame(&Frame::empty(MSG_CONNECTED)),
            Ok(BridgeEvent::Connected)
        );
        assert_eq!(
            BridgeEvent::from_frame(&Frame::empty(MSG_DISCONNECTED)),
            Ok(BridgeEvent::Disconnected)
        );
    }

    #[test]
    fn test_unexpected_payload() {
        let frame = Frame::new(MSG_PING, &[1]).unwrap();
        assert_eq!(BridgeEvent::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_unknown_kind() {
        // Clock-bound types are not events
        let frame = Frame::empty(MSG_PONG);
        assert_eq!(BridgeEvent::from_frame(&frame), Err(FrameError::UnknownMessage));
    }

    #[test]
    fn test_ready() {
        let frame = BridgeEvent::Ready { ok: false }.to_frame().unwrap();
        assert_eq!(frame.payload.as_slice(), &[0]);
        assert_eq!(
            BridgeEvent::from_frame(&frame),
            Ok(BridgeEvent::Ready { ok: false })
        );
    }

    #[test]
    fn test_failed_ready_requests_advertise() {
        let frame = Frame::new(MSG_READY, &[0]).unwrap();
        let event = BridgeEvent::from_frame(&frame).unwrap();
        assert!(event.requests_advertise());

        assert!(!BridgeEvent::Ready { ok: true }.requests_advertise());
        assert!(!BridgeEvent::Ping.requests_advertise());
        assert!(!BridgeEvent::Disconnected.requests_advertise());
    }

    #[test]
    fn test_advertise() {
        let frame = ClockCommand::Advertise { name: "Nixie-Clock" }
            .to_frame()
            .unwrap();
        assert_eq!(frame.kind, MSG_ADVERTISE);
        assert_eq!(frame.payload.as_slice(), b"Nixie-Clock");
        assert_eq!(
            ClockCommand::from_frame(&frame),
            Ok(ClockCommand::Advertise { name: "Nixie-Clock" })
        );
    }

    #[test]
    fn test_advertise_empty_name() {
        assert_eq!(
            ClockCommand::Advertise { name: "" }.to_frame(),
            Err(FrameError::InvalidFrame)
        );
        let long = "a-very-long-name-that-does-not-fit-in-one-frame";
        assert_eq!(
            ClockCommand::Advertise { name: long }.to_frame(),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_report() {
        let value = TimeValue::new(23, 1).unwrap();
        let frame = ClockCommand::Report(value).to_frame().unwrap();
        assert_eq!(frame.payload.as_slice(), &[23, 1]);
        assert_eq!(ClockCommand::from_frame(&frame), Ok(ClockCommand::Report(value)));
    }
}
