// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default rounding precision, in decimal places, for vertex deduplication.
pub const DEFAULT_PRECISION: u32 = 2;

/// Finest supported precision. `10^9` still leaves headroom in an `f64`
/// mantissa for coordinates in the thousands.
pub const MAX_PRECISION: u32 = 9;

/// The four mesh representations a viewer can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Representation {
    Soup,
    Indexed,
    WingedEdge,
    HalfEdge,
}

impl Representation {
    /// All representations, in teaching order.
    pub const ALL: [Representation; 4] = [
        Representation::Soup,
        Representation::Indexed,
        Representation::WingedEdge,
        Representation::HalfEdge,
    ];

    /// Returns the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Soup => "triangle soup",
            Representation::Indexed => "indexed",
            Representation::WingedEdge => "winged-edge",
            Representation::HalfEdge => "half-edge",
        }
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling which structures [`analyze`](crate::analyze) builds.
///
/// Vertices and faces are always built. Winged edges are consolidated from
/// half-edges, so requesting them builds half-edges internally; the half-edge
/// list is kept in the output only when `half_edges` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Decimal places kept when quantizing positions for deduplication.
    pub precision: u32,
    /// Emit the triangle soup.
    pub soup: bool,
    /// Keep the half-edge list.
    pub half_edges: bool,
    /// Build the winged-edge list.
    pub winged_edges: bool,
    /// Derive the independent structures on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            soup: true,
            half_edges: true,
            winged_edges: true,
            parallel: false,
        }
    }
}

impl AnalyzeOptions {
    /// Options that build only what one representation needs.
    pub fn for_representation(representation: Representation) -> Self {
        let none = Self {
            soup: false,
            half_edges: false,
            winged_edges: false,
            ..Self::default()
        };
        match representation {
            Representation::Soup => Self { soup: true, ..none },
            Representation::Indexed => none,
            Representation::WingedEdge => Self {
                winged_edges: true,
                ..none
            },
            Representation::HalfEdge => Self {
                half_edges: true,
                ..none
            },
        }
    }

    /// Load options from environment variables, falling back to defaults.
    ///
    /// - `MESHVIEWS_PRECISION`: decimal places for vertex quantization
    /// - `MESHVIEWS_PARALLEL`: `1`/`true` to enable parallel derivation
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            precision: std::env::var("MESHVIEWS_PRECISION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.precision),
            parallel: std::env::var("MESHVIEWS_PARALLEL")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.parallel),
            ..defaults
        }
    }

    /// Sets the quantization precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Enables or disables parallel derivation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns `true` if half-edges must be built, whether or not they are kept.
    pub fn needs_half_edges(&self) -> bool {
        self.half_edges || self.winged_edges
    }

    /// Checks that the options can be honoured.
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(Error::InvalidPrecision(self.precision));
        }
        Ok(())
    }
}
