//! Typed messages carried by the [`EventBus`](super::EventBus).
//!
//! Two shapes replace the loosely-typed custom events carousels used to
//! broadcast: a position sync from the viewer and a reorder notice from search.
//! Messages serialize with a `kind` tag so a host bridge can forward them as
//! JSON unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rendering group (one carousel per collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message published on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BusMessage {
    /// The viewer moved; widgets of `source_group` re-centre on the same item.
    #[serde(rename_all = "camelCase")]
    PositionSync {
        source_group: GroupId,
        /// Position in the viewer's navigation sequence.
        index: usize,
        /// Item now displayed, so widgets can locate it in their own track order.
        #[serde(skip_serializing_if = "Option::is_none")]
        item_id: Option<String>,
    },

    /// The group's underlying sequence was reordered; widgets re-read it.
    #[serde(rename_all = "camelCase")]
    Reorder {
        group: GroupId,
        /// Snap back to the first item instead of keeping the prior index.
        reset_to_start: bool,
    },
}

impl BusMessage {
    /// Creates a position sync message.
    #[must_use]
    pub fn position_sync(source_group: GroupId, index: usize, item_id: Option<String>) -> Self {
        Self::PositionSync {
            source_group,
            index,
            item_id,
        }
    }

    /// Creates a reorder message.
    #[must_use]
    pub const fn reorder(group: GroupId, reset_to_start: bool) -> Self {
        Self::Reorder {
            group,
            reset_to_start,
        }
    }

    /// The group this message concerns.
    #[must_use]
    pub const fn group(&self) -> &GroupId {
        match self {
            Self::PositionSync { source_group, .. } => source_group,
            Self::Reorder { group, .. } => group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let msg = BusMessage::reorder(GroupId::new("murals"), true);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "reorder", "group": "murals", "resetToStart": true})
        );

        let sync = BusMessage::position_sync(GroupId::new("murals"), 3, None);
        let json = serde_json::to_value(&sync).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "position-sync", "sourceGroup": "murals", "index": 3})
        );
    }
}
