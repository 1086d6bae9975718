//! UART serial communication abstractions
//!
//! Provides blocking serial traits that can be implemented by chip-specific
//! HALs or wrapped around any `embedded-io` port with [`crate::IoUart`].

use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default baud rate of the ASR unit
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Default receive pin
pub const DEFAULT_RX_PIN: u8 = 16;

/// Default transmit pin
pub const DEFAULT_TX_PIN: u8 = 17;

/// Error type shared by the receive and transmit halves of a port
pub trait ErrorType {
    /// Error type for all operations on this port
    type Error: Debug;
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}

/// UART transmitter
pub trait UartTx: ErrorType {
    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx: ErrorType {
    /// Number of received bytes that can be read without blocking
    fn available(&mut self) -> Result<usize, Self::Error>;

    /// Read data from the UART
    ///
    /// Blocks until the buffer is filled or an error occurs.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral and can be
/// (re)configured at runtime.
pub trait Uart: UartTx + UartRx {
    /// Apply line settings and pin assignment
    fn configure(&mut self, config: &UartConfig) -> Result<(), Self::Error>;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_blocking(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

impl<T: UartRx + ?Sized> UartRx for &mut T {
    fn available(&mut self) -> Result<usize, Self::Error> {
        T::available(self)
    }

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read_blocking(self, buf)
    }
}

impl<T: Uart + ?Sized> Uart for &mut T {
    fn configure(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        T::configure(self, config)
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// GPIO used for receive
    pub rx_pin: u8,
    /// GPIO used for transmit
    pub tx_pin: u8,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl UartConfig {
    /// 115200 baud, 8N1, RX on GPIO16 and TX on GPIO17
    pub const fn new() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            rx_pin: DEFAULT_RX_PIN,
            tx_pin: DEFAULT_TX_PIN,
        }
    }

    /// Override the baud rate
    pub const fn with_baudrate(mut self, baudrate: u32) -> Self {
        self.baudrate = baudrate;
        self
    }

    /// Override the pin assignment
    pub const fn with_pins(mut self, rx_pin: u8, tx_pin: u8) -> Self {
        self.rx_pin = rx_pin;
        self.tx_pin = tx_pin;
        self
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    One,
    Two,
}
