//! Sockets are the type tags that decide which outputs may feed which inputs.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A shared socket type tag.
///
/// Cloning a `Socket` shares the same underlying instance, so every port
/// created from one socket refers to it. Compatibility is decided by name;
/// [`Socket::ptr_eq`] tells whether two handles are the very same instance.
#[derive(Clone)]
pub struct Socket {
    name: Arc<str>,
}

impl Socket {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ptr_eq(a: &Socket, b: &Socket) -> bool {
        Arc::ptr_eq(&a.name, &b.name)
    }

    /// Whether an output typed by `self` may connect to an input typed by `other`.
    pub fn is_compatible_with(&self, other: &Socket) -> bool {
        self.name == other.name
    }
}

impl PartialEq for Socket {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Socket {}

impl Hash for Socket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Socket").field(&self.name()).finish()
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One shared [`Socket`] per socket name.
#[derive(Default, Debug, Clone)]
pub struct SocketTable {
    sockets: HashMap<String, Socket>,
}

impl SocketTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the socket registered under `name`, creating it on first use.
    pub fn get_or_create(&mut self, name: &str) -> Socket {
        self.sockets
            .entry(name.to_string())
            .or_insert_with(|| Socket::new(name))
            .clone()
    }

    /// Registers an existing socket so later lookups share it.
    /// An already registered socket with the same name wins.
    pub fn insert(&mut self, socket: Socket) -> Socket {
        self.sockets
            .entry(socket.name().to_string())
            .or_insert(socket)
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<&Socket> {
        self.sockets.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sockets.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_instance() {
        let socket = Socket::new("text");
        let other = socket.clone();
        assert!(Socket::ptr_eq(&socket, &other));
        assert_eq!(socket, other);
    }

    #[test]
    fn same_name_is_compatible_but_distinct() {
        let a = Socket::new("text");
        let b = Socket::new("text");
        assert!(a.is_compatible_with(&b));
        assert!(!Socket::ptr_eq(&a, &b));
        assert!(!a.is_compatible_with(&Socket::new("Number")));
    }

    #[test]
    fn table_returns_one_socket_per_name() {
        let mut table = SocketTable::new();
        let a = table.get_or_create("Number");
        let b = table.get_or_create("Number");
        let c = table.get_or_create("text");
        assert!(Socket::ptr_eq(&a, &b));
        assert!(!Socket::ptr_eq(&a, &c));
        assert_eq!(table.names(), vec!["Number", "text"]);
    }

    #[test]
    fn insert_keeps_the_first_socket() {
        let mut table = SocketTable::new();
        let shared = Socket::new("text");
        let stored = table.insert(shared.clone());
        assert!(Socket::ptr_eq(&stored, &shared));
        let again = table.insert(Socket::new("text"));
        assert!(Socket::ptr_eq(&again, &shared));
        assert_eq!(table.len(), 1);
    }
}
