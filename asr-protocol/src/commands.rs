//! Command numbers of the stock ASR unit firmware
//!
//! The unit ships with a fixed vocabulary. Each recognized phrase is reported
//! as one command number; the table below maps numbers back to the phrase.

// Motion
pub const CMD_UNKNOWN: u8 = 0x00;
pub const CMD_UP: u8 = 0x01;
pub const CMD_DOWN: u8 = 0x02;
pub const CMD_LEFT: u8 = 0x03;
pub const CMD_TURN_LEFT: u8 = 0x04;
pub const CMD_RIGHT: u8 = 0x05;
pub const CMD_TURN_RIGHT: u8 = 0x06;
pub const CMD_FORWARD: u8 = 0x07;
pub const CMD_FRONT: u8 = 0x08;
pub const CMD_BACKWARD: u8 = 0x09;
pub const CMD_BACK: u8 = 0x0A;

// Control
pub const CMD_OPEN: u8 = 0x10;
pub const CMD_CLOSE: u8 = 0x11;
pub const CMD_START: u8 = 0x12;
pub const CMD_STOP: u8 = 0x13;
pub const CMD_TURN_ON: u8 = 0x14;
pub const CMD_TURN_OFF: u8 = 0x15;
pub const CMD_PLAY: u8 = 0x16;
pub const CMD_PAUSE: u8 = 0x17;
pub const CMD_LIGHTS_ON: u8 = 0x18;
pub const CMD_LIGHTS_OFF: u8 = 0x19;
pub const CMD_PREVIOUS: u8 = 0x1A;
pub const CMD_NEXT: u8 = 0x1B;

// Digits, 0x20 + n
pub const CMD_ZERO: u8 = 0x20;
pub const CMD_NINE: u8 = 0x29;

// Conversation
pub const CMD_OK: u8 = 0x30;
pub const CMD_HI_ASR: u8 = 0x31;
pub const CMD_HELLO: u8 = 0x32;

// Volume and system
pub const CMD_VOLUME_UP: u8 = 0x40;
pub const CMD_VOLUME_DOWN: u8 = 0x41;
pub const CMD_VOLUME_MAX: u8 = 0x42;
pub const CMD_VOLUME_MEDIUM: u8 = 0x43;
pub const CMD_VOLUME_MIN: u8 = 0x44;
pub const CMD_FIRMWARE_VERSION: u8 = 0x45;

// Unit-initiated
pub const CMD_ANNOUNCE: u8 = 0xFE;
pub const CMD_WAKE_WORD: u8 = 0xFF;

/// Built-in vocabulary, sorted by command number
pub const BUILTIN_COMMANDS: &[(u8, &str)] = &[
    (CMD_UNKNOWN, "Unknown command word"),
    (CMD_UP, "up"),
    (CMD_DOWN, "down"),
    (CMD_LEFT, "left"),
    (CMD_TURN_LEFT, "turn left"),
    (CMD_RIGHT, "right"),
    (CMD_TURN_RIGHT, "turn right"),
    (CMD_FORWARD, "forward"),
    (CMD_FRONT, "front"),
    (CMD_BACKWARD, "backward"),
    (CMD_BACK, "back"),
    (CMD_OPEN, "open"),
    (CMD_CLOSE, "close"),
    (CMD_START, "start"),
    (CMD_STOP, "stop"),
    (CMD_TURN_ON, "turn on"),
    (CMD_TURN_OFF, "turn off"),
    (CMD_PLAY, "play"),
    (CMD_PAUSE, "pause"),
    (CMD_LIGHTS_ON, "turn on the lights"),
    (CMD_LIGHTS_OFF, "turn off the lights"),
    (CMD_PREVIOUS, "previous"),
    (CMD_NEXT, "next"),
    (CMD_ZERO, "zero"),
    (0x21, "one"),
    (0x22, "two"),
    (0x23, "three"),
    (0x24, "four"),
    (0x25, "five"),
    (0x26, "six"),
    (0x27, "seven"),
    (0x28, "eight"),
    (CMD_NINE, "nine"),
    (CMD_OK, "ok"),
    (CMD_HI_ASR, "hi, A S R"),
    (CMD_HELLO, "hello"),
    (CMD_VOLUME_UP, "increase volume"),
    (CMD_VOLUME_DOWN, "decrease volume"),
    (CMD_VOLUME_MAX, "maximum volume"),
    (CMD_VOLUME_MEDIUM, "medium volume"),
    (CMD_VOLUME_MIN, "minimum volume"),
    (CMD_FIRMWARE_VERSION, "check firmware version"),
    (CMD_ANNOUNCE, "Announce"),
    (CMD_WAKE_WORD, "Hi,M Five"),
];

/// Phrase of a built-in command number
pub fn builtin_word(command: u8) -> Option<&'static str> {
    BUILTIN_COMMANDS
        .binary_search_by_key(&command, |&(number, _)| number)
        .ok()
        .map(|i| BUILTIN_COMMANDS[i].1)
}
