//! ASR Unit Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the ASR unit driver is written
//! against. Board support code implements them once, and the driver runs
//! unchanged on every target, including the host test harness.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  asr-driver (registry, decoder, unit)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  asr-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-io   │       │ embassy-time  │
//! │ ports (IoUart)│       │ / std clocks  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`], [`uart::Uart`] - Serial communication
//! - [`time::Clock`] - Monotonic millisecond clock

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod io;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::IoUart;
pub use time::Clock;
pub use uart::{ErrorType, Uart, UartConfig, UartRx, UartTx};
