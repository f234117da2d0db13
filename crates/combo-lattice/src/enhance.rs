//! Progressive enhancement of a plain select.
//!
//! Enhancement injects the input, list, status and hint surfaces next to the
//! source select and demotes the select to a hidden value store. The input
//! takes over the select's `id` so existing `<label for>` associations keep
//! pointing at the focusable control.

use combo_lattice_core::{BoxMetrics, Document, NodeId};

use crate::accessibility::{AriaRole, Politeness, aria};
use crate::config::{ClassNames, ComboBoxConfig};
use crate::error::{ComboBoxError, Result};
use crate::locator::ComboBoxElements;
use crate::registry::ComboBoxHandle;
use crate::source::SelectSource;
use crate::targets;

/// Ids derived from the source select's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceIds {
    /// Id of the input (the select's original id).
    pub input: String,
    /// Id of the list surface.
    pub list: String,
    /// Id of the assistive hint.
    pub hint: String,
}

impl SurfaceIds {
    /// Derive the surface ids from a select id.
    pub fn derive(select_id: &str) -> Self {
        Self {
            input: select_id.to_owned(),
            list: format!("{select_id}--list"),
            hint: format!("{select_id}--assistiveHint"),
        }
    }
}

/// Enhance `select` in place and return the handle to the new surfaces.
///
/// Calling this twice on the same container injects a second set of
/// surfaces; [`ComboBoxBehavior::init`](crate::ComboBoxBehavior::init) guards
/// against that.
#[tracing::instrument(target = "combo_lattice::enhance", skip_all, fields(select = ?select))]
pub fn enhance(
    doc: &mut Document,
    select: NodeId,
    config: &ComboBoxConfig,
    classes: &ClassNames,
) -> Result<ComboBoxHandle> {
    let container = ComboBoxElements::locate(doc, select, classes)?.container;
    let select_id = doc
        .attribute(select, "id")
        .filter(|id| !id.trim().is_empty())
        .ok_or(ComboBoxError::MissingSelectId { select })?
        .to_owned();
    let ids = SurfaceIds::derive(&select_id);

    let prefill = SelectSource::new(doc, select)?
        .selected()?
        .filter(|o| !o.value.is_empty())
        .map(|o| o.text);
    let disabled = doc.has_attribute(select, "disabled");

    // The select gives up its id before the input claims it.
    doc.set_attribute(select, aria::HIDDEN, "true")?;
    doc.set_attribute(select, "tabindex", "-1")?;
    doc.add_class(select, &config.sr_only_class)?;
    doc.remove_attribute(select, "id")?;

    let input = doc.create_element("input");
    for (name, value) in [
        ("id", ids.input.as_str()),
        ("class", classes.input.as_str()),
        (aria::ROLE, AriaRole::ComboBox.as_str()),
        ("autocapitalize", "none"),
        ("autocomplete", "off"),
        ("type", "text"),
        (aria::OWNS, ids.list.as_str()),
        (aria::AUTOCOMPLETE, "list"),
        (aria::EXPANDED, "false"),
        (aria::DESCRIBED_BY, ids.hint.as_str()),
    ] {
        doc.set_attribute(input, name, value)?;
    }
    if disabled {
        doc.set_attribute(input, "disabled", "")?;
    }
    if let Some(text) = prefill {
        doc.set_value(input, text)?;
    }
    doc.append_child(container, input)?;

    let list = doc.create_element("ul");
    doc.set_attribute(list, "id", ids.list.as_str())?;
    doc.set_attribute(list, "class", classes.list.as_str())?;
    doc.set_attribute(list, aria::ROLE, AriaRole::ListBox.as_str())?;
    doc.set_hidden(list, true)?;
    doc.set_metrics(list, BoxMetrics::new(0.0, config.list_height))?;
    doc.append_child(container, list)?;

    let status = doc.create_element("div");
    doc.add_class(status, &classes.status)?;
    doc.add_class(status, &config.sr_only_class)?;
    doc.set_attribute(status, aria::ROLE, AriaRole::Status.as_str())?;
    doc.set_attribute(status, aria::LIVE, Politeness::Polite.as_str())?;
    doc.append_child(container, status)?;

    let hint = doc.create_element("span");
    doc.set_attribute(hint, "id", ids.hint.as_str())?;
    doc.add_class(hint, &config.sr_only_class)?;
    doc.set_text_content(hint, &config.hint_text)?;
    doc.append_child(container, hint)?;

    tracing::debug!(target: targets::ENHANCE, id = %select_id, disabled, "enhanced combo box");

    Ok(ComboBoxHandle {
        container,
        select,
        input,
        list,
        status,
        hint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(doc: &mut Document, select_id: &str) -> (NodeId, NodeId) {
        let classes = ClassNames::default();
        let container = doc.create_element("div");
        doc.add_class(container, &classes.container).unwrap();
        doc.append_child(doc.body(), container).unwrap();
        let select = doc.create_element("select");
        doc.set_attribute(select, "id", select_id).unwrap();
        doc.add_class(select, &classes.select).unwrap();
        doc.append_child(container, select).unwrap();
        doc.add_option(select, Some(""), "Select a fruit").unwrap();
        doc.add_option(select, Some("ap"), "Apple").unwrap();
        doc.add_option(select, Some("ba"), "Banana").unwrap();
        (container, select)
    }

    fn attrs(doc: &Document, node: NodeId) -> Vec<(&str, &str)> {
        doc.attributes(node)
            .unwrap()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_surface_ids() {
        let ids = SurfaceIds::derive("fruit");
        assert_eq!(ids.input, "fruit");
        assert_eq!(ids.list, "fruit--list");
        assert_eq!(ids.hint, "fruit--assistiveHint");
    }

    #[test]
    fn test_enhance_injects_surfaces() {
        let config = ComboBoxConfig::default();
        let classes = config.classes();
        let mut doc = Document::new();
        let (container, select) = markup(&mut doc, "fruit");

        let handle = enhance(&mut doc, select, &config, &classes).unwrap();
        assert_eq!(handle.container, container);
        assert_eq!(
            doc.children(container).unwrap(),
            &[select, handle.input, handle.list, handle.status, handle.hint]
        );

        assert_eq!(
            attrs(&doc, handle.input),
            vec![
                ("id", "fruit"),
                ("class", "usa-combo-box__input"),
                ("role", "combobox"),
                ("autocapitalize", "none"),
                ("autocomplete", "off"),
                ("type", "text"),
                ("aria-owns", "fruit--list"),
                ("aria-autocomplete", "list"),
                ("aria-expanded", "false"),
                ("aria-describedby", "fruit--assistiveHint"),
            ]
        );
        assert_eq!(doc.value(handle.input).unwrap(), "");

        assert_eq!(doc.attribute(handle.list, "role"), Some("listbox"));
        assert!(doc.is_hidden(handle.list));
        assert!(doc.children(handle.list).unwrap().is_empty());

        assert!(doc.has_class(handle.status, "usa-sr-only"));
        assert_eq!(doc.attribute(handle.status, "aria-live"), Some("polite"));
        assert_eq!(doc.text_content(handle.hint).unwrap(), config.hint_text);
    }

    #[test]
    fn test_enhance_demotes_select() {
        let config = ComboBoxConfig::default();
        let classes = config.classes();
        let mut doc = Document::new();
        let (_, select) = markup(&mut doc, "fruit");

        let handle = enhance(&mut doc, select, &config, &classes).unwrap();
        assert_eq!(doc.attribute(select, "aria-hidden"), Some("true"));
        assert_eq!(doc.attribute(select, "tabindex"), Some("-1"));
        assert!(doc.has_class(select, "usa-sr-only"));
        assert!(!doc.has_attribute(select, "id"));
        assert_eq!(doc.element_by_id("fruit"), Some(handle.input));
    }

    #[test]
    fn test_enhance_requires_select_id() {
        let config = ComboBoxConfig::default();
        let classes = config.classes();
        let mut doc = Document::new();
        let (container, select) = markup(&mut doc, "  ");

        let err = enhance(&mut doc, select, &config, &classes).unwrap_err();
        assert!(matches!(err, ComboBoxError::MissingSelectId { .. }));
        assert_eq!(doc.children(container).unwrap(), &[select]);
    }

    #[test]
    fn test_enhance_prefills_and_disables() {
        let config = ComboBoxConfig::default();
        let classes = config.classes();
        let mut doc = Document::new();
        let (_, select) = markup(&mut doc, "fruit");
        doc.set_select_value(select, "ba").unwrap();
        doc.set_attribute(select, "disabled", "").unwrap();

        let handle = enhance(&mut doc, select, &config, &classes).unwrap();
        assert_eq!(doc.value(handle.input).unwrap(), "Banana");
        assert!(doc.has_attribute(handle.input, "disabled"));
    }
}
