//! Topology injection boundary.
//!
//! Spread constraints are handled outside the grouping pass: an injector
//! translates them into ordinary node-selector requirements and writes
//! those onto the pods, so grouping only ever sees one requirement
//! vocabulary.

use nodelift_core::{Constraints, Pod};

/// Rewrites pod requirements ahead of grouping.
///
/// Implementations may read cluster state, so injection is async and
/// honors caller cancellation by future drop.
#[allow(async_fn_in_trait)]
pub trait TopologyInjector {
    /// Augment each pod's requirements in place.
    ///
    /// On failure nothing is guaranteed about partial mutation and the
    /// caller must abort the scheduling pass.
    async fn inject(&self, constraints: &Constraints, pods: &mut [Pod]) -> anyhow::Result<()>;
}

/// Injector that adds nothing, for workloads without spread constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTopology;

impl TopologyInjector for NoopTopology {
    async fn inject(&self, _constraints: &Constraints, _pods: &mut [Pod]) -> anyhow::Result<()> {
        Ok(())
    }
}
