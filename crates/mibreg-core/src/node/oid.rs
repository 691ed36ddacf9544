//! Numeric tree paths (object identifiers)

use std::fmt;

/// A numeric position in the management tree.
///
/// An empty OID is valid and marks an abstract definition that has not been
/// placed in the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Create an OID from its arcs
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Create an OID from a slice of arcs
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Parse dotted notation (`"1.3.6.1.2.1"`)
    ///
    /// The empty string parses to the empty OID. Any non-numeric arc makes
    /// the whole parse fail.
    pub fn from_dotted(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(Self::default());
        }
        let arcs: Result<Vec<u32>, _> = s.split('.').map(str::parse).collect();
        arcs.ok().map(Self::new)
    }

    /// The arcs as a slice
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of arcs
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Whether the OID has no arcs
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// The OID with the last arc removed, if it has more than one arc
    pub fn parent(&self) -> Option<Self> {
        if self.arcs.len() <= 1 {
            None
        } else {
            Some(Self::from_slice(&self.arcs[..self.arcs.len() - 1]))
        }
    }

    /// Whether `self` is a (non-strict) prefix of `other`
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }

    /// Append a single arc
    pub fn child(&self, arc: u32) -> Self {
        self.extend(&[arc])
    }

    /// Append an index suffix
    pub fn extend(&self, suffix: &[u32]) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + suffix.len());
        arcs.extend_from_slice(&self.arcs);
        arcs.extend_from_slice(suffix);
        Self::new(arcs)
    }
}

impl From<Vec<u32>> for Oid {
    fn from(arcs: Vec<u32>) -> Self {
        Self::new(arcs)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::from_slice(&arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.arcs.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for arc in iter {
                write!(f, ".{}", arc)?;
            }
        }
        Ok(())
    }
}
