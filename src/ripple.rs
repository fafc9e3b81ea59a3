// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Ripple Registry

//! Append-only ripple arena and the node visitation map.
//!
//! Every visited node owns exactly one ripple. The registry only grows: ripples
//! are never removed, and `omega` (node -> ripple id) is written once per node.

use serde::{Deserialize, Serialize};

use crate::types::{NodeId, RippleId, RippleState};

// ─── Ripple ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub epicenter: NodeId,
    /// Distance the wavefront has expanded from the epicenter.
    pub radius: f64,
    /// Path length from the source to the epicenter.
    pub accumulated_length: f64,
    /// Source to epicenter, fixed at creation.
    pub path: Vec<NodeId>,
    pub state: RippleState,
}

impl Ripple {
    /// The ripple at the source node: radius 0, length 0, active.
    pub fn origin(source: NodeId) -> Self {
        Self {
            epicenter: source,
            radius: 0.0,
            accumulated_length: 0.0,
            path: vec![source],
            state: RippleState::Active,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }
}

// ─── RippleRegistry ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RippleRegistry {
    ripples: Vec<Ripple>,
    omega: Vec<Option<RippleId>>,
}

impl RippleRegistry {
    pub fn new(node_count: usize) -> Self {
        Self { ripples: Vec::new(), omega: vec![None; node_count] }
    }

    /// Append `ripple` and claim its epicenter.
    ///
    /// Returns `None` without touching the registry if the epicenter is
    /// already owned or out of range.
    pub fn claim(&mut self, ripple: Ripple) -> Option<RippleId> {
        let slot = self.omega.get_mut(ripple.epicenter)?;
        if slot.is_some() {
            return None;
        }
        let id = self.ripples.len();
        *slot = Some(id);
        self.ripples.push(ripple);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn get(&self, id: RippleId) -> Option<&Ripple> {
        self.ripples.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: RippleId) -> Option<&mut Ripple> {
        self.ripples.get_mut(id)
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    /// Owning ripple of `node`, if it has been visited.
    pub fn owner(&self, node: NodeId) -> Option<RippleId> {
        self.omega.get(node).copied().flatten()
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.owner(node).is_some()
    }

    pub fn visited_count(&self) -> usize {
        self.omega.iter().filter(|o| o.is_some()).count()
    }

    pub fn count_in(&self, state: RippleState) -> usize {
        self.ripples.iter().filter(|r| r.state == state).count()
    }

    /// True while at least one ripple is Waiting or Active.
    pub fn any_live(&self) -> bool {
        self.ripples.iter().any(Ripple::is_live)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn waiting_at(node: NodeId) -> Ripple {
        Ripple {
            epicenter: node,
            radius: 0.0,
            accumulated_length: 1.0,
            path: vec![0, node],
            state: RippleState::Waiting,
        }
    }

    #[test]
    fn origin_ripple_shape() {
        let r = Ripple::origin(3);
        assert_eq!(r.path, vec![3]);
        assert_eq!(r.radius, 0.0);
        assert_eq!(r.accumulated_length, 0.0);
        assert_eq!(r.state, RippleState::Active);
    }

    #[test]
    fn claim_assigns_sequential_ids() {
        let mut reg = RippleRegistry::new(4);
        assert_eq!(reg.claim(Ripple::origin(0)), Some(0));
        assert_eq!(reg.claim(waiting_at(2)), Some(1));
        assert_eq!(reg.owner(2), Some(1));
        assert_eq!(reg.owner(1), None);
        assert_eq!(reg.visited_count(), 2);
    }

    #[test]
    fn second_claim_on_node_is_refused() {
        let mut reg = RippleRegistry::new(3);
        reg.claim(Ripple::origin(0));
        reg.claim(waiting_at(1));

        assert_eq!(reg.claim(waiting_at(1)), None);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.owner(1), Some(1));
    }

    #[test]
    fn claim_out_of_range_is_refused() {
        let mut reg = RippleRegistry::new(2);
        assert_eq!(reg.claim(waiting_at(5)), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn live_counts() {
        let mut reg = RippleRegistry::new(3);
        reg.claim(Ripple::origin(0));
        reg.claim(waiting_at(1));
        assert!(reg.any_live());

        for id in 0..2 {
            if let Some(r) = reg.get_mut(id) {
                r.state = RippleState::Dead;
            }
        }
        assert!(!reg.any_live());
        assert_eq!(reg.count_in(RippleState::Dead), 2);
    }
}
