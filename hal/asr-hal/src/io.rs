//! `embedded-io` port adapter
//!
//! `embedded-io` only reports whether *some* data is ready, while the ASR
//! frame decoder needs a byte count. [`IoUart`] drains ready bytes into a
//! fixed-size queue and reports its length.

use heapless::Deque;

use crate::uart::{ErrorType, Uart, UartConfig, UartRx, UartTx};

/// Default receive queue size
pub const DEFAULT_RX_QUEUE: usize = 64;

/// Smallest usable receive queue, one whole frame
///
/// The decoder waits for `available()` to reach the frame body length after
/// consuming a header, so the queue must be able to hold at least that.
pub const MIN_RX_QUEUE: usize = 5;

/// [`Uart`] implementation over any `embedded-io` port
///
/// Line settings of the wrapped port are fixed by whoever created it
/// (e.g. `embassy_rp::uart::BufferedUart::new`), so [`Uart::configure`] only
/// records the configuration and drops stale received bytes.
///
/// `N` must be at least [`MIN_RX_QUEUE`]; smaller queues fail to compile.
pub struct IoUart<T, const N: usize = DEFAULT_RX_QUEUE> {
    port: T,
    rx: Deque<u8, N>,
    config: UartConfig,
}

impl<T, const N: usize> IoUart<T, N>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    const QUEUE_HOLDS_FRAME: () = assert!(N >= MIN_RX_QUEUE, "IoUart queue smaller than a frame");

    /// Wrap a port
    pub fn new(port: T) -> Self {
        let () = Self::QUEUE_HOLDS_FRAME;
        Self {
            port,
            rx: Deque::new(),
            config: UartConfig::default(),
        }
    }

    /// Last configuration applied through [`Uart::configure`]
    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Access the wrapped port
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.port
    }

    /// Unwrap the port, discarding any queued bytes
    pub fn into_inner(self) -> T {
        self.port
    }

    /// Move every ready byte from the port into the receive queue
    fn fill(&mut self) -> Result<(), T::Error> {
        let mut chunk = [0u8; 16];
        while !self.rx.is_full() && self.port.read_ready()? {
            let room = (N - self.rx.len()).min(chunk.len());
            let n = self.port.read(&mut chunk[..room])?;
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                // Cannot fail, `room` bounds the chunk
                let _ = self.rx.push_back(byte);
            }
        }
        Ok(())
    }
}

impl<T, const N: usize> ErrorType for IoUart<T, N>
where
    T: embedded_io::ErrorType,
{
    type Error = T::Error;
}

impl<T, const N: usize> UartRx for IoUart<T, N>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn available(&mut self) -> Result<usize, Self::Error> {
        self.fill()?;
        Ok(self.rx.len())
    }

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            if let Some(byte) = self.rx.pop_front() {
                buf[filled] = byte;
                filled += 1;
                continue;
            }
            let n = self.port.read(&mut buf[filled..])?;
            if n == 0 {
                // EOF
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

impl<T, const N: usize> UartTx for IoUart<T, N>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}

impl<T, const N: usize> Uart for IoUart<T, N>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn configure(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        self.config = *config;
        self.rx.clear();
        Ok(())
    }
}
