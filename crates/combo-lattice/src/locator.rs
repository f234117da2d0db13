//! Resolving a node to the combo box surfaces around it.

use combo_lattice_core::{Document, NodeId};

use crate::config::ClassNames;
use crate::error::{ComboBoxError, Result};

/// The surfaces of a combo box as found in the document.
///
/// Only the container and the source select are mandatory. The injected
/// surfaces are absent before enhancement, and `highlighted` is absent
/// whenever no entry carries the selected class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboBoxElements {
    /// The enclosing container.
    pub container: NodeId,
    /// The source select.
    pub select: NodeId,
    /// The injected text input.
    pub input: Option<NodeId>,
    /// The injected list surface.
    pub list: Option<NodeId>,
    /// The live status region.
    pub status: Option<NodeId>,
    /// The list entry carrying the selected class.
    pub highlighted: Option<NodeId>,
}

impl ComboBoxElements {
    /// Locate the combo box enclosing `node` (the node itself included).
    ///
    /// Fails with [`ComboBoxError::MissingContainer`] when no ancestor carries
    /// the container class, and with [`ComboBoxError::MissingSelect`] when the
    /// container holds no source select. Nothing is modified.
    pub fn locate(doc: &Document, node: NodeId, classes: &ClassNames) -> Result<Self> {
        let container = doc.closest_with_class(node, &classes.container).ok_or_else(|| {
            ComboBoxError::MissingContainer {
                container_class: classes.container.clone(),
            }
        })?;
        let select = doc
            .first_with_class(container, &classes.select)
            .ok_or_else(|| ComboBoxError::MissingSelect {
                container_class: classes.container.clone(),
                select_class: classes.select.clone(),
            })?;
        let list = doc.first_with_class(container, &classes.list);

        Ok(Self {
            container,
            select,
            input: doc.first_with_class(container, &classes.input),
            list,
            status: doc.first_with_class(container, &classes.status),
            highlighted: list.and_then(|l| doc.first_with_class(l, &classes.list_option_selected)),
        })
    }

    /// Whether the injected surfaces are present.
    pub fn is_enhanced(&self) -> bool {
        self.input.is_some() && self.list.is_some() && self.status.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_combo(doc: &mut Document, classes: &ClassNames) -> (NodeId, NodeId) {
        let container = doc.create_element("div");
        doc.add_class(container, &classes.container).unwrap();
        doc.append_child(doc.body(), container).unwrap();
        let select = doc.create_element("select");
        doc.add_class(select, &classes.select).unwrap();
        doc.append_child(container, select).unwrap();
        (container, select)
    }

    #[test]
    fn test_locate_from_container_and_descendant() {
        let classes = ClassNames::default();
        let mut doc = Document::new();
        let (container, select) = bare_combo(&mut doc, &classes);

        let found = ComboBoxElements::locate(&doc, container, &classes).unwrap();
        assert_eq!(found.container, container);
        assert_eq!(found.select, select);
        assert!(!found.is_enhanced());
        assert_eq!(found.highlighted, None);

        let from_select = ComboBoxElements::locate(&doc, select, &classes).unwrap();
        assert_eq!(from_select, found);
    }

    #[test]
    fn test_missing_container() {
        let classes = ClassNames::default();
        let mut doc = Document::new();
        let stray = doc.create_element("span");
        doc.append_child(doc.body(), stray).unwrap();

        let err = ComboBoxElements::locate(&doc, stray, &classes).unwrap_err();
        assert!(matches!(err, ComboBoxError::MissingContainer { .. }));
        assert_eq!(err.to_string(), "element is missing outer .usa-combo-box");
    }

    #[test]
    fn test_missing_select() {
        let classes = ClassNames::default();
        let mut doc = Document::new();
        let container = doc.create_element("div");
        doc.add_class(container, &classes.container).unwrap();
        doc.append_child(doc.body(), container).unwrap();

        let err = ComboBoxElements::locate(&doc, container, &classes).unwrap_err();
        assert!(matches!(err, ComboBoxError::MissingSelect { .. }));
        assert!(err.is_structural());
    }

    #[test]
    fn test_highlighted_entry_found_by_class() {
        let classes = ClassNames::default();
        let mut doc = Document::new();
        let (container, _) = bare_combo(&mut doc, &classes);
        let list = doc.create_element("ul");
        doc.add_class(list, &classes.list).unwrap();
        doc.append_child(container, list).unwrap();
        let entry = doc.create_element("li");
        doc.add_class(entry, &classes.list_option).unwrap();
        doc.add_class(entry, &classes.list_option_selected).unwrap();
        doc.append_child(list, entry).unwrap();

        let found = ComboBoxElements::locate(&doc, entry, &classes).unwrap();
        assert_eq!(found.list, Some(list));
        assert_eq!(found.highlighted, Some(entry));
    }
}
