//! ASR unit facade
//!
//! Owns the serial port, the clock, the decoder and the command registry,
//! and tracks the last recognized command.

use core::fmt;

use asr_hal::{Clock, Uart, UartConfig};
use asr_protocol::{Frame, RawMessage};

use crate::decoder::{Decoded, DecoderConfig, FrameDecoder};
use crate::registry::{CommandRegistry, CommandTable};

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitState {
    /// No serial port bound yet
    Unconfigured,
    /// Port bound, ready to poll and send
    Ready,
}

/// Errors reported by [`AsrUnit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitError<E> {
    /// `poll` or `send` called before `configure`
    NotConfigured,
    /// Serial transport failure
    Serial(E),
}

impl<E: fmt::Debug> fmt::Display for UnitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::NotConfigured => {
                f.write_str("ASR unit not configured, call configure() first")
            }
            UnitError::Serial(e) => write!(f, "serial error: {:?}", e),
        }
    }
}

/// Voice recognition unit on a UART link
///
/// Call [`configure`](Self::configure) once, then [`poll`](Self::poll) from
/// the main loop. Not reentrant; handlers run inside `poll`.
pub struct AsrUnit<S, C> {
    serial: Option<S>,
    clock: C,
    decoder: FrameDecoder,
    registry: CommandRegistry,
    command: Option<u8>,
    raw: RawMessage,
}

impl<S: Uart, C: Clock> AsrUnit<S, C> {
    /// Create an unconfigured unit with the built-in vocabulary
    pub fn new(clock: C) -> Self {
        Self::with_registry(clock, CommandRegistry::new())
    }

    /// Create an unconfigured unit with a caller-built registry
    pub fn with_registry(clock: C, registry: CommandRegistry) -> Self {
        Self {
            serial: None,
            clock,
            decoder: FrameDecoder::default(),
            registry,
            command: None,
            raw: RawMessage::new(),
        }
    }

    /// Replace the decoder configuration
    pub fn with_decoder_config(mut self, config: DecoderConfig) -> Self {
        self.decoder = FrameDecoder::new(config);
        self
    }

    /// Bind and configure the serial port
    ///
    /// Any previously bound port is dropped. Clears the last command.
    pub fn configure(
        &mut self,
        mut serial: S,
        config: &UartConfig,
    ) -> Result<(), UnitError<S::Error>> {
        serial.configure(config).map_err(UnitError::Serial)?;
        debug!(
            "ASR unit on rx={=u8} tx={=u8} at {=u32} baud",
            config.rx_pin,
            config.tx_pin,
            config.baudrate
        );

        self.serial = Some(serial);
        self.decoder.reset();
        self.command = None;
        self.raw.clear();
        Ok(())
    }

    /// Unbind the serial port, returning to [`UnitState::Unconfigured`]
    pub fn release(&mut self) -> Option<S> {
        self.decoder.reset();
        self.serial.take()
    }

    /// Get the current state
    pub fn state(&self) -> UnitState {
        if self.serial.is_some() {
            UnitState::Ready
        } else {
            UnitState::Unconfigured
        }
    }

    /// Check if a port is bound
    pub fn is_configured(&self) -> bool {
        self.serial.is_some()
    }

    /// Run one decode pass and fire the handler of a recognized command
    ///
    /// Returns true if a frame was decoded. Unknown command numbers still
    /// count as decoded; [`command_word`](Self::command_word) is `None` for
    /// them.
    pub fn poll(&mut self) -> Result<bool, UnitError<S::Error>> {
        let Some(serial) = self.serial.as_mut() else {
            warn!("poll() called before configure()");
            return Err(UnitError::NotConfigured);
        };

        let Some(Decoded { frame, raw }) = self
            .decoder
            .decode(serial, &self.clock)
            .map_err(UnitError::Serial)?
        else {
            return Ok(false);
        };

        debug!("Command number: {=u8:#x}", frame.command);
        self.command = Some(frame.command);
        self.raw = raw;
        self.registry.dispatch(frame.command);
        Ok(true)
    }

    /// Send a command number to the unit
    pub fn send(&mut self, command: u8) -> Result<(), UnitError<S::Error>> {
        let serial = self.serial.as_mut().ok_or(UnitError::NotConfigured)?;
        let bytes = Frame::new(command).encode();
        serial.write_blocking(&bytes).map_err(UnitError::Serial)?;
        serial.flush().map_err(UnitError::Serial)
    }

    /// Hex rendering of the last decoded frame, empty before the first
    pub fn raw_message(&self) -> &str {
        self.raw.as_str()
    }

    /// Last decoded command number
    pub fn command_number(&self) -> Option<u8> {
        self.command
    }

    /// Phrase of the last decoded command
    ///
    /// `None` before the first decode or if the number is not registered.
    pub fn command_word(&self) -> Option<&str> {
        self.command.and_then(|number| self.registry.name_of(number))
    }

    /// Check if the last decoded command has a handler
    pub fn has_handler(&self) -> bool {
        self.command
            .is_some_and(|number| self.registry.has_handler(number))
    }

    /// Run the handler of the last decoded command again
    ///
    /// Returns true if a handler was invoked.
    pub fn invoke_handler(&mut self) -> bool {
        match self.command {
            Some(number) => self.registry.dispatch(number),
            None => false,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Printable table of the registered commands
    pub fn command_table(&self) -> CommandTable<'_> {
        self.registry.table()
    }
}
