//! Area — a hierarchical subdivision of a building (floor, wing, room, …).

use serde::{Deserialize, Serialize};

use crate::id::AreaId;

/// A node in a building's area tree.
///
/// Each area exclusively owns its children. Trees are only ever built top
/// down from input data, so cycles cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl Area {
    /// Create a leaf area.
    #[must_use]
    pub fn new(id: impl Into<AreaId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            areas: Vec::new(),
        }
    }

    /// Append a child area.
    #[must_use]
    pub fn with_child(mut self, child: Area) -> Self {
        self.areas.push(child);
        self
    }

    /// Depth-first search of this area and all of its descendants.
    #[must_use]
    pub fn find(&self, id: &AreaId) -> Option<&Area> {
        find_in(std::slice::from_ref(self), id)
    }
}

/// Depth-first search over a forest of areas, pre-order, left to right.
///
/// Uses an explicit worklist so arbitrarily deep trees cannot overflow the
/// stack.
pub(crate) fn find_in<'a>(roots: &'a [Area], id: &AreaId) -> Option<&'a Area> {
    let mut stack: Vec<&Area> = roots.iter().rev().collect();
    while let Some(area) = stack.pop() {
        if &area.id == id {
            return Some(area);
        }
        stack.extend(area.areas.iter().rev());
    }
    None
}
