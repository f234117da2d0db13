//! Registry of enhanced combo boxes.
//!
//! Each enhanced container gets a [`ComboBoxHandle`] bundling its surfaces,
//! built once at enhancement and handed to every handler. Event targets map
//! back to instances through their container.

use std::collections::HashMap;

use combo_lattice_core::{Document, NodeId};
use slotmap::{SlotMap, new_key_type};

use crate::combo_box::ComboBox;
use crate::targets;

new_key_type! {
    /// Identifies an enhanced combo box.
    pub struct ComboBoxId;
}

/// The surfaces of an enhanced combo box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComboBoxHandle {
    /// Outer container.
    pub container: NodeId,
    /// Demoted source select.
    pub select: NodeId,
    /// Text input.
    pub input: NodeId,
    /// List surface.
    pub list: NodeId,
    /// Live status region.
    pub status: NodeId,
    /// Assistive hint.
    pub hint: NodeId,
}

impl ComboBoxHandle {
    /// Whether every surface still exists in the document.
    pub fn is_live(&self, doc: &Document) -> bool {
        [
            self.container,
            self.select,
            self.input,
            self.list,
            self.status,
        ]
        .into_iter()
        .all(|id| doc.is_connected(id))
    }
}

/// Owns every enhanced combo box.
#[derive(Debug, Default)]
pub struct ComboBoxRegistry {
    instances: SlotMap<ComboBoxId, ComboBox>,
    by_container: HashMap<NodeId, ComboBoxId>,
}

impl ComboBoxRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an instance built from its id.
    pub fn insert_with_key(&mut self, build: impl FnOnce(ComboBoxId) -> ComboBox) -> ComboBoxId {
        let id = self.instances.insert_with_key(build);
        let container = self.instances[id].handle().container;
        self.by_container.insert(container, id);
        tracing::trace!(target: targets::REGISTRY, ?id, ?container, "registered combo box");
        id
    }

    /// Look up an instance.
    pub fn get(&self, id: ComboBoxId) -> Option<&ComboBox> {
        self.instances.get(id)
    }

    /// Look up an instance mutably.
    pub fn get_mut(&mut self, id: ComboBoxId) -> Option<&mut ComboBox> {
        self.instances.get_mut(id)
    }

    /// The instance enhanced on `container`.
    pub fn id_for_container(&self, container: NodeId) -> Option<ComboBoxId> {
        self.by_container.get(&container).copied()
    }

    /// Ids of all instances.
    pub fn ids(&self) -> Vec<ComboBoxId> {
        self.instances.keys().collect()
    }

    /// Iterate over all instances.
    pub fn iter(&self) -> impl Iterator<Item = (ComboBoxId, &ComboBox)> {
        self.instances.iter()
    }

    /// Remove an instance.
    pub fn remove(&mut self, id: ComboBoxId) -> Option<ComboBox> {
        let combo = self.instances.remove(id)?;
        self.by_container.remove(&combo.handle().container);
        tracing::trace!(target: targets::REGISTRY, ?id, "removed combo box");
        Some(combo)
    }

    /// Drop instances whose surfaces are gone from `doc`, returning how many
    /// were removed.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let stale: Vec<_> = self
            .instances
            .iter()
            .filter(|(_, combo)| !combo.handle().is_live(doc))
            .map(|(id, _)| id)
            .collect();
        for id in &stale {
            self.remove(*id);
        }
        if !stale.is_empty() {
            tracing::debug!(target: targets::REGISTRY, count = stale.len(), "pruned stale combo boxes");
        }
        stale.len()
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ComboBoxConfig;

    fn build(doc: &mut Document) -> ComboBoxHandle {
        let container = doc.create_element("div");
        doc.append_child(doc.body(), container).unwrap();
        let mut child = |tag: &str| {
            let id = doc.create_element(tag);
            doc.append_child(container, id).unwrap();
            id
        };
        ComboBoxHandle {
            container,
            select: child("select"),
            input: child("input"),
            list: child("ul"),
            status: child("div"),
            hint: child("span"),
        }
    }

    fn combo(id: ComboBoxId, handle: ComboBoxHandle) -> ComboBox {
        let config = ComboBoxConfig::default();
        let classes = Arc::new(config.classes());
        ComboBox::new(id, handle, "fruit--list".into(), Arc::new(config), classes)
    }

    #[test]
    fn test_insert_and_lookup_by_container() {
        let mut doc = Document::new();
        let handle = build(&mut doc);
        let mut registry = ComboBoxRegistry::new();

        let id = registry.insert_with_key(|id| combo(id, handle));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.id_for_container(handle.container), Some(id));
        assert_eq!(registry.get(id).unwrap().id(), id);

        registry.remove(id);
        assert!(registry.is_empty());
        assert_eq!(registry.id_for_container(handle.container), None);
    }

    #[test]
    fn test_prune_drops_removed_containers() {
        let mut doc = Document::new();
        let kept = build(&mut doc);
        let dropped = build(&mut doc);
        let mut registry = ComboBoxRegistry::new();
        let kept_id = registry.insert_with_key(|id| combo(id, kept));
        registry.insert_with_key(|id| combo(id, dropped));

        doc.remove(dropped.container).unwrap();
        assert!(!dropped.is_live(&doc));
        assert_eq!(registry.prune(&doc), 1);
        assert_eq!(registry.ids(), vec![kept_id]);
        assert_eq!(registry.prune(&doc), 0);
    }
}
