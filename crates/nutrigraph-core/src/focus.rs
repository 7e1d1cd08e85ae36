//! Focus state - which node's neighborhood is highlighted.
//!
//! A selected node persists until cleared. A hovered node is transient and
//! is ignored while a selection exists.

use crate::connectivity::ConnectivityIndex;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusState {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<NodeId>) {
        self.selected = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn hover(&mut self, id: impl Into<NodeId>) {
        self.hovered = Some(id.into());
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Neighbor set of the selected node.
    pub fn selection_neighbors(&self, index: &ConnectivityIndex) -> HashSet<NodeId> {
        self.selected
            .as_ref()
            .map(|id| index.neighbors_of(id.as_str()))
            .unwrap_or_default()
    }

    /// Neighbor set of the hovered node; empty whenever something is selected.
    pub fn hover_neighbors(&self, index: &ConnectivityIndex) -> HashSet<NodeId> {
        if self.selected.is_some() {
            return HashSet::new();
        }
        self.hovered
            .as_ref()
            .map(|id| index.neighbors_of(id.as_str()))
            .unwrap_or_default()
    }

    /// Whichever highlight is active. Selection wins over hover.
    pub fn highlighted(&self, index: &ConnectivityIndex) -> HashSet<NodeId> {
        if self.selected.is_some() {
            self.selection_neighbors(index)
        } else {
            self.hover_neighbors(index)
        }
    }

    pub fn has_active_highlight(&self) -> bool {
        self.selected.is_some() || self.hovered.is_some()
    }
}
