use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::core::{SeriesBars, TimePoint};

use super::{SeriesHandle, UpdatePacket};

/// Shared handle to one series' bar storage.
///
/// Clones share the same storage; identity, equality and hashing follow the
/// numeric id only.
#[derive(Clone)]
pub struct PlotSeries {
    id: u64,
    bars: Rc<RefCell<SeriesBars>>,
}

impl PlotSeries {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            bars: Rc::new(RefCell::new(SeriesBars::new())),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn bars(&self) -> Ref<'_, SeriesBars> {
        self.bars.borrow()
    }

    /// Applies this series' slice of `packet`; returns `false` when the packet
    /// does not mention the series.
    pub fn apply_packet(&self, packet: &UpdatePacket<PlotSeries>) -> bool {
        let Some(update) = packet.series_update(self) else {
            return false;
        };
        self.bars
            .borrow_mut()
            .apply_update(update, packet.scope());
        true
    }
}

impl SeriesHandle for PlotSeries {
    fn last_time_point(&self) -> Option<TimePoint> {
        self.bars.borrow().last_time_point()
    }
}

impl PartialEq for PlotSeries {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlotSeries {}

impl Hash for PlotSeries {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for PlotSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotSeries")
            .field("id", &self.id)
            .field("rows", &self.bars.try_borrow().map(|bars| bars.len()).ok())
            .finish()
    }
}

impl serde::Serialize for PlotSeries {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_u64(self.id)
    }
}
