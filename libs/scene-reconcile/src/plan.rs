//! # Mutation Plans
//!
//! Decision logic produces a [`MutationPlan`]: an ordered list of edits the
//! host should perform. Applying it is a separate step, so every decision
//! can be inspected and tested without touching a scene.

use scene_graph::{SceneEdit, SceneQuery, SceneResult};

/// One requested edit.
#[derive(Debug, Clone, PartialEq)]
enum Mutation<N, M> {
    Rename { node: N, name: String },
    /// Deletes the node with its subtree.
    Delete { node: N },
    ApplyMaterial { node: N, material: M },
}

/// Ordered list of edits.
///
/// # Example
///
/// ```rust
/// use scene_reconcile::plan::MutationPlan;
///
/// let mut plan: MutationPlan<u32, u32> = MutationPlan::new();
/// plan.rename(1, "Body_0");
/// plan.delete(2);
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.deleted().collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MutationPlan<N, M> {
    steps: Vec<Mutation<N, M>>,
}

/// Plan type for a given host.
pub type PlanFor<S> = MutationPlan<<S as SceneQuery>::NodeId, <S as SceneQuery>::MaterialId>;

impl<N, M> Default for MutationPlan<N, M> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<N: Copy, M: Copy> MutationPlan<N, M> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, mutation: Mutation<N, M>) {
        self.steps.push(mutation);
    }

    pub fn rename(&mut self, node: N, name: impl Into<String>) {
        self.push(Mutation::Rename {
            node,
            name: name.into(),
        });
    }

    pub fn delete(&mut self, node: N) {
        self.push(Mutation::Delete { node });
    }

    pub fn apply_material(&mut self, node: N, material: M) {
        self.push(Mutation::ApplyMaterial { node, material });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nodes the plan deletes, in order.
    pub fn deleted(&self) -> impl Iterator<Item = N> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Mutation::Delete { node } => Some(*node),
            _ => None,
        })
    }

    /// `(node, new name)` pairs, in order.
    pub fn renames(&self) -> impl Iterator<Item = (N, &str)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Mutation::Rename { node, name } => Some((*node, name.as_str())),
            _ => None,
        })
    }

    /// `(node, material)` pairs, in order.
    pub fn material_assignments(&self) -> impl Iterator<Item = (N, M)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Mutation::ApplyMaterial { node, material } => Some((*node, *material)),
            _ => None,
        })
    }

    /// Performs every step against the host, stopping at the first failure.
    ///
    /// Returns the number of steps applied.
    pub fn apply<S>(&self, scene: &mut S) -> SceneResult<usize>
    where
        S: SceneEdit<NodeId = N, MaterialId = M>,
    {
        for step in &self.steps {
            match step {
                Mutation::Rename { node, name } => scene.set_name(*node, name)?,
                Mutation::Delete { node } => scene.delete_node(*node, true)?,
                Mutation::ApplyMaterial { node, material } => {
                    scene.apply_material(*node, *material)?
                }
            }
        }
        tracing::debug!(steps = self.steps.len(), "applied mutation plan");
        Ok(self.steps.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
