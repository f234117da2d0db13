//! The source select as a data source.
//!
//! Once enhanced, the original select is only read for its ordered
//! `(value, text)` options and written for its value. [`OptionSource`] is the
//! read half; [`write_source_value`] the write half.

use combo_lattice_core::{Document, NodeId};

use crate::error::Result;

/// An option of the source select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboOption {
    /// The submitted value. Empty for placeholder options.
    pub value: String,
    /// The display text.
    pub text: String,
}

impl ComboOption {
    /// Create a new option.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Trait for providing ordered options to a combo box.
pub trait OptionSource {
    /// Number of options.
    fn len(&self) -> usize;

    /// The option at `index`, or `None` if out of bounds.
    fn option(&self, index: usize) -> Option<ComboOption>;

    /// Whether there are no options.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All options in order.
    fn options(&self) -> Vec<ComboOption> {
        (0..self.len()).filter_map(|i| self.option(i)).collect()
    }

    /// First option whose text equals `text`, ignoring case.
    fn find_text_ignore_case(&self, text: &str) -> Option<ComboOption> {
        let wanted = text.to_lowercase();
        (0..self.len())
            .filter_map(|i| self.option(i))
            .find(|o| o.text.to_lowercase() == wanted)
    }

    /// Options offered for `filter`, in source order.
    ///
    /// Placeholder options (empty value) are never offered. An empty filter
    /// offers everything else; otherwise the option text must contain the
    /// filter, ignoring case.
    fn filter(&self, filter: &str) -> Vec<ComboOption> {
        let filter = filter.to_lowercase();
        (0..self.len())
            .filter_map(|i| self.option(i))
            .filter(|o| {
                !o.value.is_empty()
                    && (filter.is_empty() || o.text.to_lowercase().contains(&filter))
            })
            .collect()
    }
}

/// An owned list of options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    options: Vec<ComboOption>,
}

impl OptionList {
    /// Create a list from options.
    pub fn new(options: Vec<ComboOption>) -> Self {
        Self { options }
    }

    /// Append an option.
    pub fn push(&mut self, option: ComboOption) {
        self.options.push(option);
    }
}

impl<V: Into<String>, T: Into<String>> FromIterator<(V, T)> for OptionList {
    fn from_iter<I: IntoIterator<Item = (V, T)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(v, t)| ComboOption::new(v, t))
                .collect(),
        )
    }
}

impl OptionSource for OptionList {
    fn len(&self) -> usize {
        self.options.len()
    }

    fn option(&self, index: usize) -> Option<ComboOption> {
        self.options.get(index).cloned()
    }
}

/// A live view of a select element's options.
#[derive(Debug)]
pub struct SelectSource<'a> {
    doc: &'a Document,
    select: NodeId,
    options: Vec<NodeId>,
}

impl<'a> SelectSource<'a> {
    /// View the options of `select`.
    pub fn new(doc: &'a Document, select: NodeId) -> Result<Self> {
        Ok(Self {
            options: doc.options(select)?,
            doc,
            select,
        })
    }

    /// The select's current value.
    pub fn value(&self) -> Result<String> {
        Ok(self.doc.select_value(self.select)?)
    }

    /// The option currently holding the select's value, if any.
    pub fn selected(&self) -> Result<Option<ComboOption>> {
        match self.doc.selected_option(self.select)? {
            Some(node) => Ok(Some(ComboOption::new(
                self.doc.option_value(node)?,
                self.doc.option_text(node)?,
            ))),
            None => Ok(None),
        }
    }
}

impl OptionSource for SelectSource<'_> {
    fn len(&self) -> usize {
        self.options.len()
    }

    fn option(&self, index: usize) -> Option<ComboOption> {
        let node = *self.options.get(index)?;
        Some(ComboOption::new(
            self.doc.option_value(node).ok()?,
            self.doc.option_text(node).ok()?,
        ))
    }
}

/// Assign the select's value, returning the value it held before.
pub fn write_source_value(doc: &mut Document, select: NodeId, value: &str) -> Result<String> {
    let previous = doc.select_value(select)?;
    doc.set_select_value(select, value)?;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> OptionList {
        [
            ("", "Select a fruit"),
            ("ap", "Apple"),
            ("ba", "Banana"),
            ("ch", "Cherry"),
        ]
        .into_iter()
        .collect()
    }

    fn texts(options: &[ComboOption]) -> Vec<&str> {
        options.iter().map(|o| o.text.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_skips_placeholder() {
        assert_eq!(texts(&fruits().filter("")), ["Apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_filter_is_substring_and_case_insensitive() {
        assert_eq!(texts(&fruits().filter("AN")), ["Banana"]);
        assert_eq!(texts(&fruits().filter("e")), ["Apple", "Cherry"]);
        assert!(fruits().filter("xyz").is_empty());
    }

    #[test]
    fn test_placeholder_text_never_offered() {
        assert!(fruits().filter("select").is_empty());
    }

    #[test]
    fn test_find_text_ignore_case() {
        let found = fruits().find_text_ignore_case("bAnAnA").unwrap();
        assert_eq!(found.value, "ba");
        assert!(fruits().find_text_ignore_case("banan").is_none());
    }

    #[test]
    fn test_select_source_reads_document() {
        let mut doc = Document::new();
        let select = doc.create_element("select");
        doc.append_child(doc.body(), select).unwrap();
        doc.add_option(select, Some(""), "Pick").unwrap();
        doc.add_option(select, Some("ch"), "Cherry").unwrap();

        let source = SelectSource::new(&doc, select).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.option(1), Some(ComboOption::new("ch", "Cherry")));
        assert_eq!(source.option(2), None);
        assert_eq!(source.value().unwrap(), "");

        let previous = write_source_value(&mut doc, select, "ch").unwrap();
        assert_eq!(previous, "");
        assert_eq!(doc.select_value(select).unwrap(), "ch");
    }
}
