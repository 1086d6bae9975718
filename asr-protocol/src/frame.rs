//! Frame encoding and decoding for the ASR unit protocol.
//!
//! Frame format:
//! - HEADER (2 bytes): 0xAA 0x55 synchronization
//! - COMMAND (1 byte): command number (0-255)
//! - FOOTER (2 bytes): 0x55 0xAA
//!
//! There is no length or checksum field; the footer is the only integrity
//! check.

use core::fmt::{self, Write};

use heapless::String;

/// Frame synchronization header
pub const FRAME_HEADER: [u8; 2] = [0xAA, 0x55];

/// Frame trailer
pub const FRAME_FOOTER: [u8; 2] = [0x55, 0xAA];

/// Complete frame size (HEADER + COMMAND + FOOTER)
pub const FRAME_LEN: usize = 5;

/// Bytes following the header (COMMAND + FOOTER)
pub const PAYLOAD_LEN: usize = 3;

/// Capacity of a rendered frame, `"0xAA 0x55 0x07 0x55 0xAA"`
pub const RAW_MESSAGE_LEN: usize = 32;

/// Hex rendering of a frame, kept for diagnostics
pub type RawMessage = String<RAW_MESSAGE_LEN>;

/// Errors that can occur during frame parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// First two bytes are not 0xAA 0x55
    InvalidHeader,
    /// Last two bytes are not 0x55 0xAA
    InvalidFooter,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InvalidHeader => f.write_str("invalid frame header"),
            FrameError::InvalidFooter => f.write_str("invalid frame footer"),
        }
    }
}

/// A parsed or constructed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Recognized (or requested) command number
    pub command: u8,
}

impl Frame {
    /// Create a frame carrying `command`
    pub const fn new(command: u8) -> Self {
        Self { command }
    }

    /// Encode this frame into its wire bytes
    pub const fn encode(&self) -> [u8; FRAME_LEN] {
        [
            FRAME_HEADER[0],
            FRAME_HEADER[1],
            self.command,
            FRAME_FOOTER[0],
            FRAME_FOOTER[1],
        ]
    }

    /// Decode the bytes that follow an already matched header
    pub fn from_payload(payload: &[u8; PAYLOAD_LEN]) -> Result<Self, FrameError> {
        if payload[1..] != FRAME_FOOTER {
            return Err(FrameError::InvalidFooter);
        }
        Ok(Self::new(payload[0]))
    }

    /// Decode a complete frame
    pub fn parse(bytes: &[u8; FRAME_LEN]) -> Result<Self, FrameError> {
        if bytes[..2] != FRAME_HEADER {
            return Err(FrameError::InvalidHeader);
        }
        Self::from_payload(&[bytes[2], bytes[3], bytes[4]])
    }
}

impl From<Frame> for [u8; FRAME_LEN] {
    fn from(frame: Frame) -> Self {
        frame.encode()
    }
}

/// Render frame bytes as space separated `0xNN` values
pub fn raw_message(bytes: &[u8; FRAME_LEN]) -> RawMessage {
    let mut out = RawMessage::new();
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            let _ = out.push(' ');
        }
        // 5 * "0xNN" + 4 separators fits in RAW_MESSAGE_LEN
        let _ = write!(out, "0x{:02X}", byte);
    }
    out
}
