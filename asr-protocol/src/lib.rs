//! ASR Unit Communication Protocol
//!
//! This crate defines the UART protocol spoken by the ASR voice recognition
//! unit. The link carries one kind of message in both directions: a command
//! number wrapped in a fixed header and footer.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌──────┬──────┬─────────┬──────┬──────┐
//! │ 0xAA │ 0x55 │ COMMAND │ 0x55 │ 0xAA │
//! │ 1B   │ 1B   │ 1B      │ 1B   │ 1B   │
//! └──────┴──────┴─────────┴──────┴──────┘
//! ```
//!
//! The unit sends a frame whenever it recognizes a phrase. The host may send
//! the same frame to make the unit announce or act on a command number.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod commands;
pub mod frame;

pub use commands::{builtin_word, BUILTIN_COMMANDS};
pub use frame::{
    raw_message, Frame, FrameError, RawMessage, FRAME_FOOTER, FRAME_HEADER, FRAME_LEN, PAYLOAD_LEN,
};
