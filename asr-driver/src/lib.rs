//! Driver for the UART voice recognition (ASR) unit
//!
//! The unit reports every recognized phrase as a 5-byte frame carrying a
//! command number. This crate provides:
//!
//! - [`CommandRegistry`] - command number to phrase mapping, with optional
//!   handlers fired on recognition
//! - [`FrameDecoder`] - pulls frames out of the serial byte stream
//! - [`AsrUnit`] - ties both to a [`asr_hal::Uart`] and a [`asr_hal::Clock`]
//!
//! The driver is synchronous and poll-driven: call [`AsrUnit::poll`] from
//! the application's main loop.
//!
//! ```ignore
//! let mut unit = AsrUnit::new(EmbassyClock);
//! unit.registry_mut().add_with_handler(CMD_START, "start", || pump.start());
//! unit.configure(IoUart::<_, 64>::new(uart), &UartConfig::default())?;
//!
//! loop {
//!     if unit.poll()? {
//!         info!("heard: {}", unit.command_word().unwrap_or("?"));
//!     }
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

// Must stay first so the logging macros are visible to every module
mod fmt;

pub mod decoder;
pub mod registry;
pub mod unit;

#[cfg(test)]
pub(crate) mod mock;

pub use decoder::{Decoded, DecoderConfig, FrameDecoder, ScanMode, DEFAULT_PAYLOAD_TIMEOUT_MS};
pub use registry::{CommandEntry, CommandHandler, CommandInfo, CommandRegistry, CommandTable};
pub use unit::{AsrUnit, UnitError, UnitState};
