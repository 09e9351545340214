use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque material identifier, e.g. `minecraft:stone`.
///
/// Compared byte for byte: case and namespace are significant. No registry
/// lookup happens here; resolving the identifier is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MaterialId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MaterialId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer coordinate in units of some `Grid`. The grid is not stored with it.
pub type GridCoord = IVec3;
