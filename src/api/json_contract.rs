use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{SeriesHandle, TimelineIndex, TimelineSnapshot};

pub const TIMELINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope written by [`TimelineSnapshot::to_json_contract_v1_pretty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub timeline: TimelineSnapshot,
}

impl TimelineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = TimelineSnapshotJsonContractV1 {
            schema_version: TIMELINE_SNAPSHOT_JSON_SCHEMA_V1,
            timeline: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize timeline: {e}")))
    }

    /// Accepts either a bare snapshot or a versioned envelope, then checks
    /// that points are densely indexed and strictly ordered by timestamp.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let snapshot = match serde_json::from_str::<TimelineSnapshot>(input) {
            Ok(snapshot) => snapshot,
            Err(_) => {
                let payload: TimelineSnapshotJsonContractV1 = serde_json::from_str(input)
                    .map_err(|e| {
                        ChartError::InvalidData(format!("failed to parse timeline json: {e}"))
                    })?;
                if payload.schema_version != TIMELINE_SNAPSHOT_JSON_SCHEMA_V1 {
                    return Err(ChartError::InvalidData(format!(
                        "unsupported timeline schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.timeline
            }
        };
        snapshot.validate_order()?;
        Ok(snapshot)
    }

    fn validate_order(&self) -> ChartResult<()> {
        for (position, point) in self.points.iter().enumerate() {
            if point.index != position {
                return Err(ChartError::InvalidData(format!(
                    "timeline point at position {position} carries index {}",
                    point.index
                )));
            }
        }
        if let Some(pair) = self
            .points
            .windows(2)
            .find(|pair| pair[0].time.timestamp >= pair[1].time.timestamp)
        {
            return Err(ChartError::InvalidData(format!(
                "timeline timestamps out of order at index {}",
                pair[1].index
            )));
        }
        Ok(())
    }
}

impl<S: SeriesHandle> TimelineIndex<S> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
