//! Interned identifiers for entities, nodes and edges.
//!
//! Every caller, workflow and activity name becomes an [`Id`]. Ids are
//! `Copy`, hash cheaply and compare by symbol, so the graph builders can use
//! them freely as map and set keys.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
///
/// # Thread Safety
///
/// Access goes through a `Mutex`, so ids can be created from the rayon pool
/// while category builders run in parallel.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Separator placed between the source and target of an edge identifier.
pub const EDGE_SEPARATOR: char = '-';

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned identifier of an entity or edge.
///
/// # Examples
///
/// ```
/// use temporal_flow_core::identifier::Id;
///
/// let caller = Id::new("order_api");
/// let workflow = Id::new("OrderWorkflow");
///
/// let edge = caller.chain(workflow);
/// assert_eq!(edge, "order_api-OrderWorkflow");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it on first use.
    ///
    /// # Examples
    ///
    /// ```
    /// use temporal_flow_core::identifier::Id;
    ///
    /// let a = Id::new("ChargeCard");
    /// let b = Id::new("ChargeCard");
    /// assert_eq!(a, b);
    /// ```
    pub fn new(name: &str) -> Self {
        with_interner(|interner| Self(interner.get_or_intern(name)))
    }

    /// Creates the identifier `"{self}-{target}"`.
    ///
    /// This is the identity of a directed hop from `self` to `target`.
    pub fn chain(&self, target: Id) -> Self {
        with_interner(|interner| {
            let source_str = interner
                .resolve(self.0)
                .expect("Source ID should exist in interner");
            let target_str = interner
                .resolve(target.0)
                .expect("Target ID should exist in interner");
            let chained = format!("{source_str}{EDGE_SEPARATOR}{target_str}");
            Self(interner.get_or_intern(&chained))
        })
    }

    /// Runs `f` against the string value of this identifier.
    ///
    /// The interner lock is held while `f` runs, so `f` must not create or
    /// resolve other ids.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        with_interner(|interner| {
            let value = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            f(value)
        })
    }

    /// Returns `true` if the identifier contains [`EDGE_SEPARATOR`].
    pub fn contains_separator(&self) -> bool {
        self.with_str(|value| value.contains(EDGE_SEPARATOR))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.to_string();
        serializer.serialize_str(&value)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}
