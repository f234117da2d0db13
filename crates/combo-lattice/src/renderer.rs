//! Rendering the filtered option list.

use combo_lattice_core::{BoxMetrics, Document};

use crate::accessibility::{AriaRole, aria};
use crate::combo_box::{ComboBox, ListState, RenderedEntry};
use crate::error::Result;
use crate::source::{OptionSource, SelectSource};
use crate::targets;

/// The status announcement for `count` rendered options.
pub fn status_message(count: usize) -> String {
    match count {
        0 => "No results.".to_owned(),
        1 => "1 result available.".to_owned(),
        n => format!("{n} results available."),
    }
}

impl ComboBox {
    /// Rebuild the list from the input's current text and show it.
    ///
    /// Entries are laid out in fixed rows of `option_height`. Any highlight
    /// from a previous render is dropped.
    pub fn render_filtered(&mut self, doc: &mut Document) -> Result<()> {
        let handle = *self.handle();
        let filter = doc.value(handle.input)?.to_lowercase();
        let candidates = SelectSource::new(doc, handle.select)?.filter(&filter);
        let count = candidates.len();
        let row = self.config.option_height;

        doc.clear_children(handle.list)?;
        self.entries.clear();

        for (index, option) in candidates.into_iter().enumerate() {
            let node = doc.create_element("li");
            let position = (index + 1).to_string();
            let count = count.to_string();
            for (name, value) in [
                ("id", format!("{}--option-{index}", self.list_id())),
                ("class", self.classes.list_option.clone()),
                ("tabindex", "-1".to_owned()),
                (aria::ROLE, AriaRole::Option.as_str().to_owned()),
                (aria::SELECTED, "false".to_owned()),
                (aria::SET_SIZE, count),
                (aria::POS_IN_SET, position),
                ("data-option-value", option.value.clone()),
            ] {
                doc.set_attribute(node, name, value)?;
            }
            doc.set_text_content(node, &option.text)?;
            doc.set_metrics(node, BoxMetrics::new(index as f32 * row, row))?;
            doc.append_child(handle.list, node)?;
            self.entries.push(RenderedEntry {
                node,
                value: option.value,
                text: option.text,
            });
        }

        if count == 0 {
            let placeholder = doc.create_element("li");
            doc.add_class(placeholder, &self.classes.list_option_no_results)?;
            doc.set_text_content(placeholder, &self.config.no_results_text)?;
            doc.set_metrics(placeholder, BoxMetrics::new(0.0, row))?;
            doc.append_child(handle.list, placeholder)?;
        }

        doc.set_hidden(handle.list, false)?;
        doc.set_scroll_top(handle.list, 0.0)?;
        doc.set_attribute(handle.input, aria::EXPANDED, "true")?;
        doc.remove_attribute(handle.input, aria::ACTIVE_DESCENDANT)?;
        doc.set_text_content(handle.status, &status_message(count))?;
        self.state = ListState::Open { highlight: None };

        tracing::trace!(target: targets::RENDERER, combo_box = ?self.id(), %filter, count, "rendered list");
        Ok(())
    }

    /// Clear and hide the list. Hiding a closed list changes nothing.
    pub fn hide(&mut self, doc: &mut Document) -> Result<()> {
        let handle = *self.handle();
        doc.set_text_content(handle.status, "")?;
        doc.set_attribute(handle.input, aria::EXPANDED, "false")?;
        doc.remove_attribute(handle.input, aria::ACTIVE_DESCENDANT)?;
        doc.clear_children(handle.list)?;
        doc.set_hidden(handle.list, true)?;
        self.entries.clear();
        if self.state.is_open() {
            tracing::trace!(target: targets::RENDERER, combo_box = ?self.id(), "hid list");
        }
        self.state = ListState::Closed;
        Ok(())
    }
}
