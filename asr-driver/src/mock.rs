//! Test doubles for the serial port and clock

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use asr_hal::{Clock, ErrorType, Uart, UartConfig, UartRx, UartTx};

/// Clock that advances by `step_ms` every time it is read
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Rc<Cell<u64>>,
    step_ms: u64,
}

impl MockClock {
    pub fn new(step_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step_ms,
        }
    }

    /// Current time without advancing
    pub fn peek(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
struct MockState {
    /// (arrival time, byte), in arrival order
    rx: VecDeque<(u64, u8)>,
    tx: Vec<u8>,
    config: Option<UartConfig>,
    fail: bool,
}

/// Scripted serial port
///
/// Clones share state, so a test can keep a handle while the driver owns
/// the port. Bytes become available once the shared clock reaches their
/// arrival time.
#[derive(Debug, Clone)]
pub struct MockUart {
    clock: MockClock,
    state: Rc<RefCell<MockState>>,
}

impl MockUart {
    pub fn new(clock: &MockClock) -> Self {
        Self {
            clock: clock.clone(),
            state: Rc::new(RefCell::new(MockState::default())),
        }
    }

    /// Queue bytes that are available immediately
    pub fn push_rx(&self, bytes: &[u8]) {
        self.push_rx_at(self.clock.peek(), bytes);
    }

    /// Queue bytes that arrive at `at_ms`
    pub fn push_rx_at(&self, at_ms: u64, bytes: &[u8]) {
        let mut state = self.state.borrow_mut();
        state.rx.extend(bytes.iter().map(|&b| (at_ms, b)));
    }

    /// Bytes still queued, arrived or not
    pub fn pending(&self) -> usize {
        self.state.borrow().rx.len()
    }

    pub fn sent(&self) -> Vec<u8> {
        self.state.borrow().tx.clone()
    }

    pub fn config(&self) -> Option<UartConfig> {
        self.state.borrow().config
    }

    /// Make every subsequent operation fail
    pub fn fail(&self) {
        self.state.borrow_mut().fail = true;
    }

    fn check(&self) -> Result<(), MockError> {
        if self.state.borrow().fail {
            Err(MockError)
        } else {
            Ok(())
        }
    }
}

impl ErrorType for MockUart {
    type Error = MockError;
}

impl UartRx for MockUart {
    fn available(&mut self) -> Result<usize, Self::Error> {
        self.check()?;
        let now = self.clock.peek();
        Ok(self
            .state
            .borrow()
            .rx
            .iter()
            .take_while(|&&(at, _)| at <= now)
            .count())
    }

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        for slot in buf.iter_mut() {
            // Blocking read: jump the clock forward to the byte's arrival
            let (at, byte) = state.rx.pop_front().ok_or(MockError)?;
            if at > self.clock.peek() {
                self.clock.advance(at - self.clock.peek());
            }
            *slot = byte;
        }
        Ok(buf.len())
    }
}

impl UartTx for MockUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.state.borrow_mut().tx.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.check()
    }
}

impl Uart for MockUart {
    fn configure(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        self.check()?;
        self.state.borrow_mut().config = Some(*config);
        Ok(())
    }
}
