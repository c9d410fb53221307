// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for processed meshes.
//!
//! Ids are dense integers, so the records serialize as they are stored and
//! a TypeScript viewer can index arrays with them directly. Field names are
//! camelCase; representations that were not built are omitted.

use crate::error::{Error, Result};
use crate::mesh::ProcessedMesh;

impl ProcessedMesh {
    /// Serializes the mesh to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serializes the mesh to compact JSON bytes.
    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Restores a mesh from JSON produced by [`to_json`](Self::to_json).
    ///
    /// Structural consistency is not checked here; use
    /// [`validate`](Self::validate) on untrusted input.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}
