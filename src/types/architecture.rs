use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Processor family identifier as reported by the host.
///
/// The namespace is owned by the host tool (`"metapc"`, `"ARM"`, `"mipsb"`, ...)
/// and is compared exactly, case included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchitectureKey(String);

impl ArchitectureKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArchitectureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArchitectureKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ArchitectureKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ArchitectureKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArchitectureKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid bit width: {bits} (expected 16, 32 or 64)")]
pub struct InvalidBitWidth {
    pub bits: u32,
}

/// Address size of the analysed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitWidth {
    Bits16,
    Bits32,
    Bits64,
}

impl BitWidth {
    pub fn bits(self) -> u32 {
        match self {
            BitWidth::Bits16 => 16,
            BitWidth::Bits32 => 32,
            BitWidth::Bits64 => 64,
        }
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = InvalidBitWidth;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(BitWidth::Bits16),
            32 => Ok(BitWidth::Bits32),
            64 => Ok(BitWidth::Bits64),
            _ => Err(InvalidBitWidth { bits }),
        }
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> Self {
        width.bits()
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Which host introspection surface produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPathway {
    Legacy,
    Modern,
}

impl fmt::Display for DetectionPathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionPathway::Legacy => f.write_str("legacy"),
            DetectionPathway::Modern => f.write_str("modern"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub architecture: ArchitectureKey,
    pub bit_width: BitWidth,
    pub pathway: DetectionPathway,
}
