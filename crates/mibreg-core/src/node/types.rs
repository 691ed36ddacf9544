//! Attribute types carried by typed nodes

use super::oid::Oid;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an SMI keyword does not name a known attribute value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} keyword: {keyword}")]
pub struct ParseAttrError {
    kind: &'static str,
    keyword: String,
}

/// Maximum access level of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Not accessible via SNMP (table and row objects, indices)
    NotAccessible,
    /// Accessible only for notifications
    AccessibleForNotify,
    /// Can only be read
    ReadOnly,
    /// Can be read and written
    ReadWrite,
    /// Can be read, written, or used to create rows
    ReadCreate,
    /// SMIv1 write-only
    WriteOnly,
}

impl Access {
    /// SMI keyword for this access level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAccessible => "not-accessible",
            Self::AccessibleForNotify => "accessible-for-notify",
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::ReadCreate => "read-create",
            Self::WriteOnly => "write-only",
        }
    }
}

impl FromStr for Access {
    type Err = ParseAttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-accessible" => Ok(Self::NotAccessible),
            "accessible-for-notify" => Ok(Self::AccessibleForNotify),
            "read-only" => Ok(Self::ReadOnly),
            "read-write" => Ok(Self::ReadWrite),
            "read-create" => Ok(Self::ReadCreate),
            "write-only" => Ok(Self::WriteOnly),
            _ => Err(ParseAttrError {
                kind: "access",
                keyword: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Current and valid
    Current,
    /// Still valid but should not be used in new definitions
    Deprecated,
    /// No longer valid
    Obsolete,
    /// SMIv1 mandatory
    Mandatory,
    /// SMIv1 optional
    Optional,
}

impl Status {
    /// SMI keyword for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Deprecated => "deprecated",
            Self::Obsolete => "obsolete",
            Self::Mandatory => "mandatory",
            Self::Optional => "optional",
        }
    }
}

impl FromStr for Status {
    type Err = ParseAttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "deprecated" => Ok(Self::Deprecated),
            "obsolete" => Ok(Self::Obsolete),
            "mandatory" => Ok(Self::Mandatory),
            "optional" => Ok(Self::Optional),
            _ => Err(ParseAttrError {
                kind: "status",
                keyword: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type descriptor referenced by a node's SYNTAX clause
///
/// The registry never looks inside a syntax. Modules create them, export
/// them, and share them by `Arc` between definitions and instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Syntax {
    name: String,
    constraint: Option<String>,
}

impl Syntax {
    /// Unconstrained syntax named after its base type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    /// Syntax with a textual constraint, e.g. `(SIZE (0..255))`
    pub fn constrained(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: Some(constraint.into()),
        }
    }

    /// Base type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constraint text, if any
    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(c) => write!(f, "{} {}", self.name, c),
            None => f.write_str(&self.name),
        }
    }
}

/// Default value of an object (the DEFVAL clause)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefVal {
    /// Signed integer
    Integer(i64),
    /// Unsigned integer (Counter64 and friends)
    Unsigned(u64),
    /// Text, rendered verbatim
    Text(String),
    /// Object identifier
    Oid(Oid),
}

impl fmt::Display for DefVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Unsigned(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
            Self::Oid(oid) => write!(f, "{}", oid),
        }
    }
}

impl From<i64> for DefVal {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u64> for DefVal {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<&str> for DefVal {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DefVal {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Oid> for DefVal {
    fn from(oid: Oid) -> Self {
        Self::Oid(oid)
    }
}
