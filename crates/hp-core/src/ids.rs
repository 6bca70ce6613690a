use core::fmt;
use core::num::NonZeroU32;

/// Compact identifier for components and connections of a cycle topology.
///
/// Stored as index+1 in a `NonZeroU32` so `Option<Id>` costs no extra space;
/// topologies here are a handful of nodes, so `u32` is plenty.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based position in the builder's storage.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Component and connection ids are distinct in intent, same in layout.
pub type CompId = Id;
pub type ConnId = Id;
