//! Command registry
//!
//! Maps command numbers to phrases and optional handlers. A fresh registry
//! holds the unit's built-in vocabulary; applications add their own phrases
//! (custom firmware builds) and attach handlers at runtime.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use asr_protocol::BUILTIN_COMMANDS;

/// Callback fired when its command number is decoded
///
/// Implemented for every `FnMut()` closure. Handlers run synchronously on the
/// polling call's stack; a slow handler delays the next decode.
pub trait CommandHandler {
    fn handle(&mut self);
}

impl<F: FnMut()> CommandHandler for F {
    fn handle(&mut self) {
        self()
    }
}

/// Phrase and optional handler for one command number
pub struct CommandEntry {
    name: String,
    handler: Option<Box<dyn CommandHandler>>,
}

impl CommandEntry {
    /// Phrase reported for this command
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if a handler is attached
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("has_handler", &self.has_handler())
            .finish()
    }
}

/// Borrowed view of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandInfo<'a> {
    pub number: u8,
    pub name: &'a str,
    pub has_handler: bool,
}

/// Command number to phrase mapping, ordered by number
pub struct CommandRegistry {
    entries: BTreeMap<u8, CommandEntry>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create a registry holding the built-in vocabulary
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for &(number, name) in BUILTIN_COMMANDS {
            registry.add(number, name);
        }
        registry
    }

    /// Create a registry with no entries
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite the phrase for `number`, without a handler
    ///
    /// Any handler previously attached to `number` is dropped.
    pub fn add(&mut self, number: u8, name: &str) {
        self.insert(number, name, None);
    }

    /// Insert or overwrite the phrase for `number` together with its handler
    pub fn add_with_handler<H>(&mut self, number: u8, name: &str, handler: H)
    where
        H: CommandHandler + 'static,
    {
        self.insert(number, name, Some(Box::new(handler)));
    }

    fn insert(&mut self, number: u8, name: &str, handler: Option<Box<dyn CommandHandler>>) {
        self.entries.insert(
            number,
            CommandEntry {
                name: String::from(name),
                handler,
            },
        );
    }

    /// Attach a handler to an existing entry
    ///
    /// Returns false if `number` has no entry.
    pub fn set_handler<H>(&mut self, number: u8, handler: H) -> bool
    where
        H: CommandHandler + 'static,
    {
        match self.entries.get_mut(&number) {
            Some(entry) => {
                entry.handler = Some(Box::new(handler));
                true
            }
            None => false,
        }
    }

    /// Detach the handler of an entry, keeping its phrase
    ///
    /// Returns true if a handler was removed.
    pub fn clear_handler(&mut self, number: u8) -> bool {
        self.entries
            .get_mut(&number)
            .and_then(|entry| entry.handler.take())
            .is_some()
    }

    /// Remove the entry whose phrase is exactly `name`
    ///
    /// If several entries share the phrase the lowest number goes. Returns
    /// the removed number, or `None` (registry untouched) if nothing matched.
    pub fn remove(&mut self, name: &str) -> Option<u8> {
        let number = self.number_of(name)?;
        self.entries.remove(&number);
        Some(number)
    }

    /// Phrase registered for `number`
    pub fn name_of(&self, number: u8) -> Option<&str> {
        self.entries.get(&number).map(CommandEntry::name)
    }

    /// Lowest command number registered under `name`
    pub fn number_of(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(&number, _)| number)
    }

    /// Check if `number` has an entry with a handler attached
    pub fn has_handler(&self, number: u8) -> bool {
        self.entries
            .get(&number)
            .is_some_and(CommandEntry::has_handler)
    }

    /// Run the handler of `number`
    ///
    /// Returns true if a handler was found and invoked.
    pub fn dispatch(&mut self, number: u8) -> bool {
        match self
            .entries
            .get_mut(&number)
            .and_then(|entry| entry.handler.as_mut())
        {
            Some(handler) => {
                handler.handle();
                true
            }
            None => false,
        }
    }

    /// Entries in command number order
    pub fn iter(&self) -> impl Iterator<Item = CommandInfo<'_>> + '_ {
        self.entries.iter().map(|(&number, entry)| CommandInfo {
            number,
            name: &entry.name,
            has_handler: entry.has_handler(),
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Printable table of every entry
    pub fn table(&self) -> CommandTable<'_> {
        CommandTable { registry: self }
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(number, entry)| (number, &entry.name)))
            .finish()
    }
}

/// Diagnostic rendering of a [`CommandRegistry`]
///
/// ```text
/// -------------------------------------------------------
/// | Command Num |      Command Word       |   Handler   |
/// -------------------------------------------------------
/// |    0x12     | start                   |     Yes     |
/// -------------------------------------------------------
/// ```
pub struct CommandTable<'a> {
    registry: &'a CommandRegistry,
}

const TABLE_RULE: &str = "-------------------------------------------------------";

impl fmt::Display for CommandTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TABLE_RULE)?;
        writeln!(f, "| Command Num |      Command Word       |   Handler   |")?;
        writeln!(f, "{}", TABLE_RULE)?;
        for info in self.registry.iter() {
            writeln!(
                f,
                "|    0x{:02X}     | {:<23} | {:^11} |",
                info.number,
                info.name,
                if info.has_handler { "Yes" } else { "No" }
            )?;
        }
        writeln!(f, "{}", TABLE_RULE)
    }
}
