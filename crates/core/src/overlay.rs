//! Detail overlay state machine.
//!
//! There is a single overlay per page. Opening a plant while another is open
//! closes the first one before the new one is shown; closing is idempotent.

use serde::{Deserialize, Serialize};

use crate::types::PlantId;

/// Whether the detail overlay is showing, and for which plant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "plant_id", rename_all = "snake_case")]
pub enum Overlay {
    #[default]
    Closed,
    Open(PlantId),
}

impl Overlay {
    /// Show the overlay for `plant_id`.
    ///
    /// Returns the plant whose overlay was torn down to make room, if any.
    /// Re-opening the plant that is already shown also reports it as closed,
    /// since its display is rebuilt from fresh data.
    pub fn open(&mut self, plant_id: PlantId) -> Option<PlantId> {
        let previous = self.close();
        *self = Self::Open(plant_id);
        previous
    }

    /// Close the overlay. Returns the plant that was showing, if any.
    pub fn close(&mut self) -> Option<PlantId> {
        match std::mem::take(self) {
            Self::Open(plant_id) => Some(plant_id),
            Self::Closed => None,
        }
    }

    /// The plant currently shown.
    #[must_use]
    pub const fn plant_id(&self) -> Option<PlantId> {
        match self {
            Self::Open(plant_id) => Some(*plant_id),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}
