//! Select-control semantics.
//!
//! A `select` element's options are its `option` descendants in document
//! order. Until the value is assigned explicitly, a select with no selected
//! option reports its first enabled option as selected; after an explicit
//! assignment that matched nothing, it reports no selection and an empty
//! value.

use crate::document::{Document, NodeId};
use crate::error::DomResult;

impl Document {
    /// Append an `option` to a select (or optgroup) and return it.
    ///
    /// Without a `value`, the option's value falls back to its text.
    pub fn add_option(
        &mut self,
        select: NodeId,
        value: Option<&str>,
        text: &str,
    ) -> DomResult<NodeId> {
        let option = self.create_element("option");
        if let Some(value) = value {
            self.set_attribute(option, "value", value)?;
        }
        self.set_text_content(option, text)?;
        self.append_child(select, option)?;
        Ok(option)
    }

    /// The `option` descendants of a select, in document order.
    pub fn options(&self, select: NodeId) -> DomResult<Vec<NodeId>> {
        self.element(select)?;
        Ok(self
            .descendants(select)
            .into_iter()
            .filter(|&n| self.tag_name(n).is_ok_and(|t| t == "option"))
            .collect())
    }

    /// The option's label with whitespace stripped and collapsed.
    pub fn option_text(&self, option: NodeId) -> DomResult<String> {
        let raw = self.text_content(option)?;
        Ok(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// The option's `value` attribute, or its text when the attribute is absent.
    pub fn option_value(&self, option: NodeId) -> DomResult<String> {
        match self.attribute(option, "value") {
            Some(value) => Ok(value.to_owned()),
            None => self.option_text(option),
        }
    }

    /// Set the selectedness of one option.
    ///
    /// Selecting an option deselects its siblings in the owning select.
    pub fn set_option_selected(&mut self, option: NodeId, selected: bool) -> DomResult<()> {
        self.element(option)?;
        if selected {
            if let Some(select) = self.owning_select(option) {
                for other in self.options(select)? {
                    self.element_mut(other)?.selected = false;
                }
            }
        }
        self.element_mut(option)?.selected = selected;
        Ok(())
    }

    fn owning_select(&self, option: NodeId) -> Option<NodeId> {
        let mut current = self.parent(option);
        while let Some(node) = current {
            if self.tag_name(node).is_ok_and(|t| t == "select") {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// The currently selected option of a select, if any.
    pub fn selected_option(&self, select: NodeId) -> DomResult<Option<NodeId>> {
        let options = self.options(select)?;
        if let Some(&option) = options
            .iter()
            .find(|&&o| self.element(o).is_ok_and(|el| el.selected))
        {
            return Ok(Some(option));
        }
        if self.element(select)?.selectedness_dirty {
            return Ok(None);
        }
        Ok(options
            .into_iter()
            .find(|&o| !self.has_attribute(o, "disabled")))
    }

    /// The select's value: the selected option's value, or empty.
    pub fn select_value(&self, select: NodeId) -> DomResult<String> {
        match self.selected_option(select)? {
            Some(option) => self.option_value(option),
            None => Ok(String::new()),
        }
    }

    /// Assign the select's value.
    ///
    /// Selects the first option whose value matches; if none matches, no
    /// option stays selected and the value reads back empty.
    pub fn set_select_value(&mut self, select: NodeId, value: &str) -> DomResult<()> {
        let options = self.options(select)?;
        let mut matched = None;
        for &option in &options {
            if matched.is_none() && self.option_value(option)? == value {
                matched = Some(option);
            }
        }
        for option in options {
            self.element_mut(option)?.selected = Some(option) == matched;
        }
        self.element_mut(select)?.selectedness_dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_select() -> (Document, NodeId) {
        let mut doc = Document::new();
        let select = doc.create_element("select");
        doc.append_child(doc.body(), select).unwrap();
        doc.add_option(select, Some(""), "Select a fruit").unwrap();
        doc.add_option(select, Some("ap"), "Apple").unwrap();
        doc.add_option(select, Some("ba"), "  Banana\n  split ").unwrap();
        (doc, select)
    }

    #[test]
    fn test_default_selection_is_first_option() {
        let (doc, select) = fruit_select();
        assert_eq!(doc.select_value(select).unwrap(), "");
        assert_eq!(
            doc.selected_option(select).unwrap(),
            doc.options(select).unwrap().first().copied()
        );
    }

    #[test]
    fn test_option_text_collapses_whitespace() {
        let (doc, select) = fruit_select();
        let banana = doc.options(select).unwrap()[2];
        assert_eq!(doc.option_text(banana).unwrap(), "Banana split");
    }

    #[test]
    fn test_value_falls_back_to_text() {
        let mut doc = Document::new();
        let select = doc.create_element("select");
        let option = doc.add_option(select, None, " Kiwi ").unwrap();
        assert_eq!(doc.option_value(option).unwrap(), "Kiwi");
    }

    #[test]
    fn test_set_select_value_matches() {
        let (mut doc, select) = fruit_select();
        doc.set_select_value(select, "ba").unwrap();
        assert_eq!(doc.select_value(select).unwrap(), "ba");
    }

    #[test]
    fn test_set_select_value_without_match_clears() {
        let (mut doc, select) = fruit_select();
        doc.set_select_value(select, "ap").unwrap();
        doc.set_select_value(select, "zz").unwrap();
        assert_eq!(doc.selected_option(select).unwrap(), None);
        assert_eq!(doc.select_value(select).unwrap(), "");
    }

    #[test]
    fn test_selecting_option_deselects_siblings() {
        let (mut doc, select) = fruit_select();
        let options = doc.options(select).unwrap();
        doc.set_option_selected(options[1], true).unwrap();
        doc.set_option_selected(options[2], true).unwrap();
        assert_eq!(doc.selected_option(select).unwrap(), Some(options[2]));
    }
}
