//! Connection registry: index and alias bookkeeping plus the current cursor.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{ManagerError, Result};

/// Identifies a registered connection by index or by name.
///
/// A name is looked up in the alias table first and, failing that, parsed
/// as a decimal index. So `"2"` reaches index 2 unless some connection is
/// aliased `"2"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionRef {
    Index(usize),
    Name(String),
}

impl From<usize> for ConnectionRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ConnectionRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ConnectionRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for ConnectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Registry of logical connections.
///
/// Slots are numbered from 1 and never reused until [`close_all`] resets the
/// counter. Index 0 means "no connection". Closing a single connection
/// tombstones its slot, so later registrations keep counting upwards.
///
/// The registry does no internal locking. Share it across tasks only behind
/// your own mutex.
///
/// [`close_all`]: ConnectionRegistry::close_all
#[derive(Debug, Clone)]
pub struct ConnectionRegistry<C> {
    slots: Vec<Option<C>>,
    aliases: HashMap<String, usize>,
    current: usize,
}

impl<C> Default for ConnectionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ConnectionRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            aliases: HashMap::new(),
            current: 0,
        }
    }

    /// Registers a connection and makes it current.
    ///
    /// Returns the new index. Fails with [`ManagerError::AliasInUse`] when
    /// `alias` is bound to a live connection; the registry is unchanged in
    /// that case. An alias left behind by a closed connection is rebound.
    pub fn register(&mut self, connection: C, alias: Option<&str>) -> Result<usize> {
        if let Some(alias) = alias {
            if self.alias_is_live(alias) {
                return Err(ManagerError::AliasInUse(alias.to_string()));
            }
        }

        self.slots.push(Some(connection));
        let index = self.slots.len();
        if let Some(alias) = alias {
            self.aliases.insert(alias.to_string(), index);
        }
        self.current = index;
        debug!(index, alias, "registered connection");
        Ok(index)
    }

    /// Makes the identified connection current.
    ///
    /// Returns the previously current index, which is 0 when nothing was
    /// active. Fails with [`ManagerError::ConnectionNotFound`] and leaves
    /// the cursor untouched when `id` does not name a live connection.
    pub fn switch(&mut self, id: impl Into<ConnectionRef>) -> Result<usize> {
        let index = self.resolve(&id.into())?;
        let previous = self.current;
        self.current = index;
        debug!(previous, current = index, "switched connection");
        Ok(previous)
    }

    /// Returns the current connection.
    pub fn current(&self) -> Result<&C> {
        self.slot(self.current)
            .ok_or(ManagerError::NoActiveConnection)
    }

    /// Index of the current connection, or 0 when none is active.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Looks up a live connection without changing the cursor.
    pub fn get(&self, id: impl Into<ConnectionRef>) -> Result<&C> {
        let index = self.resolve(&id.into())?;
        // resolve() only returns live indices
        self.slot(index)
            .ok_or_else(|| ManagerError::connection_not_found(index.to_string()))
    }

    /// Closes the current connection and clears the cursor.
    ///
    /// Returns the closed connection, or `None` when nothing was current.
    pub fn close_current(&mut self) -> Option<C> {
        if self.current == 0 {
            return None;
        }
        let index = self.current;
        self.current = 0;
        let closed = self.slots.get_mut(index - 1).and_then(Option::take);
        self.aliases.retain(|_, bound| *bound != index);
        debug!(index, "closed connection");
        closed
    }

    /// Closes every connection and restarts numbering at 1.
    ///
    /// The cursor is always 0 afterwards, so instead of echoing it this
    /// returns how many live connections were closed. Callers that only need
    /// the reset can ignore the count.
    pub fn close_all(&mut self) -> usize {
        let closed = self.len();
        self.slots.clear();
        self.aliases.clear();
        self.current = 0;
        debug!(closed, "closed all connections");
        closed
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates live connections as `(index, alias, connection)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&str>, &C)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(offset, slot)| {
                let index = offset + 1;
                slot.as_ref()
                    .map(|connection| (index, self.alias_of(index), connection))
            })
    }

    /// Returns the alias bound to `index`, if any.
    pub fn alias_of(&self, index: usize) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, bound)| **bound == index)
            .map(|(alias, _)| alias.as_str())
    }

    fn resolve(&self, id: &ConnectionRef) -> Result<usize> {
        let index = match id {
            ConnectionRef::Index(index) => Some(*index),
            ConnectionRef::Name(name) => self
                .aliases
                .get(name)
                .copied()
                .or_else(|| name.trim().parse::<usize>().ok()),
        };

        index
            .filter(|index| self.slot(*index).is_some())
            .ok_or_else(|| ManagerError::connection_not_found(id.to_string()))
    }

    fn slot(&self, index: usize) -> Option<&C> {
        index
            .checked_sub(1)
            .and_then(|offset| self.slots.get(offset))
            .and_then(Option::as_ref)
    }

    fn alias_is_live(&self, alias: &str) -> bool {
        self.aliases
            .get(alias)
            .is_some_and(|index| self.slot(*index).is_some())
    }
}
