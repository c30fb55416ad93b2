//! Frame encoding and decoding
//!
//! CHECKSUM is the XOR of LENGTH, TYPE and every payload byte.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// START + LENGTH + TYPE + payload + CHECKSUM
const FRAME_OVERHEAD: usize = 4;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Errors that can occur while framing or interpreting messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Length byte out of range or payload has the wrong shape
    InvalidFrame,
    /// Output buffer too small
    BufferTooSmall,
    /// Message type not known in this direction
    UnknownMessage,
    /// Time outside 00:00-23:59
    InvalidTime,
}

/// One message on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Message type
    pub kind: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ kind, |acc, byte| acc ^ byte)
}

impl Frame {
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Frame without payload
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    /// Size of this frame once encoded
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Write the frame into `out`, returning the number of bytes used
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = out.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (head, rest) = out.split_at_mut(3);
        head.copy_from_slice(&[FRAME_START, length, self.kind]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = checksum(length, self.kind, &self.payload);

        Ok(len)
    }

    /// Encode into a fixed-capacity buffer
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        // Payload is bounded by MAX_PAYLOAD_SIZE, so both steps always fit
        let len = self.encode(&mut buf).unwrap_or(0);
        Vec::from_slice(&buf[..len]).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for START
    Sync,
    Length,
    Kind { length: u8 },
    Payload { length: u8, kind: u8 },
    Checksum { kind: u8 },
}

/// Streaming frame parser
///
/// Bytes before a START are skipped. After a bad length or checksum the
/// parser drops the partial frame and hunts for the next START.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` when a frame completes, `Ok(None)` when
    /// more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_START {
                    self.payload.clear();
                    self.state = ParseState::Length;
                }
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.state = ParseState::Kind { length: byte };
            }
            ParseState::Kind { length } => {
                self.state = if length == 0 {
                    ParseState::Checksum { kind: byte }
                } else {
                    ParseState::Payload { length, kind: byte }
                };
            }
            ParseState::Payload { length, kind } => {
                // Length was bounded above, the push cannot overflow
                let _ = self.payload.push(byte);
                if self.payload.len() == length as usize {
                    self.state = ParseState::Checksum { kind };
                }
            }
            ParseState::Checksum { kind } => {
                let expected = checksum(self.payload.len() as u8, kind, &self.payload);
                let frame = (byte == expected).then(|| Frame {
                    kind,
                    payload: self.payload.clone(),
                });
                self.reset();
                return frame.map(Some).ok_or(FrameError::InvalidChecksum);
            }
        }

        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Returns the frame and how many bytes of `bytes` were consumed.
    pub fn feed_slice(&mut self, bytes: &[u8]) -> (Result<Option<Frame>, FrameError>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                result => return (result, i + 1),
            }
        }
        (Ok(None), bytes.len())
    }
}
