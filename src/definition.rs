//! Calendar definition tree
//!
//! Each node of the configured hierarchy gets a merged sanctorale: the
//! parent's merged sanctorale as the lowest layer, then the node's own
//! artefacts in document order. A merged sanctorale is frozen behind an
//! `Arc` before any child sees it, and children share it read-only.

use std::sync::Arc;

use ordo_liturgy::{LoadError, Sanctorale};
use tracing::{debug, warn};

use crate::artefact::{ArtefactDigest, ArtefactResolver};
use crate::config::CalendarSpec;
use crate::tree::Tree;

/// Built calendar node: what was loaded and what it merged to
#[derive(Debug, Clone)]
pub struct CalendarDefinition {
    /// The node's own artefacts with digests, in document order
    pub artefacts: Vec<ArtefactDigest>,
    /// Parent layers plus own artefacts, merged
    pub sanctorale: Arc<Sanctorale>,
}

/// Builds definition trees from configured calendar trees
#[derive(Default)]
pub struct DefinitionBuilder {
    resolver: ArtefactResolver,
}

impl DefinitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the whole tree; any artefact failure aborts the build
    pub fn build(&self, spec: &Tree<CalendarSpec>) -> Result<Tree<CalendarDefinition>, LoadError> {
        spec.try_inherit(
            None,
            &mut |parent: Option<&CalendarDefinition>, node: &Tree<CalendarSpec>| {
                self.build_node(parent, node)
            },
        )
    }

    fn build_node(
        &self,
        parent: Option<&CalendarDefinition>,
        node: &Tree<CalendarSpec>,
    ) -> Result<CalendarDefinition, LoadError> {
        let mut artefacts = Vec::with_capacity(node.content().artefacts.len());
        let mut own = Vec::with_capacity(node.content().artefacts.len());
        for reference in &node.content().artefacts {
            let resolved = self.resolver.resolve(reference)?;
            artefacts.push(resolved.digest);
            own.push(resolved.sanctorale);
        }

        let base = parent.map(|p| &p.sanctorale);
        let sanctorale = match (base, own.len()) {
            (Some(base), 0) => Arc::clone(base),
            (None, 0) => {
                warn!(calendar = node.name(), "root calendar has no artefacts");
                Arc::new(Sanctorale::new())
            }
            (None, 1) => Arc::new(own.remove(0)),
            (base, _) => {
                let layers: Vec<&Sanctorale> = base
                    .map(|b| b.as_ref())
                    .into_iter()
                    .chain(own.iter())
                    .collect();
                debug!(
                    calendar = node.name(),
                    layers = layers.len(),
                    "merging sanctorale layers"
                );
                Arc::new(Sanctorale::merge_layered(&layers))
            }
        };

        Ok(CalendarDefinition {
            artefacts,
            sanctorale,
        })
    }
}

/// Build a definition tree with a default resolver
pub fn build_definition_tree(spec: &Tree<CalendarSpec>) -> Result<Tree<CalendarDefinition>, LoadError> {
    DefinitionBuilder::new().build(spec)
}
