//! Highlight movement and committing selections.
//!
//! The selection engine is the only writer of the source select's value and
//! of the input's text once a combo box is enhanced. Each operation runs to
//! completion against the document and leaves the instance either closed or
//! open with a valid highlight.
//!
//! # Keys
//!
//! | Key                | Closed                 | Open                            |
//! |--------------------|------------------------|---------------------------------|
//! | Down               | open, highlight first  | next entry (stops at the last)  |
//! | Up                 | nothing                | previous entry, or close        |
//! | Enter              | not intercepted        | complete selection, close       |
//! | Tab / Shift+Tab    | complete, close        | complete selection, close       |
//! | Escape             | close, restore text    | close, restore text             |
//! | printable (key up) | filter and open        | filter                          |

use combo_lattice_core::{BoxMetrics, Document, NodeId};

use crate::accessibility::aria;
use crate::combo_box::{ComboBox, ListState, ValueCommitted};
use crate::error::Result;
use crate::events::{InputEvent, Key, KeyChord, KeyboardModifiers};
use crate::source::{ComboOption, OptionSource, SelectSource, write_source_value};
use crate::targets;

/// What a key press on the input does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the highlight up.
    Up,
    /// Open, or move the highlight down.
    Down,
    /// Cancel.
    Escape,
    /// Commit if open.
    Enter,
    /// Commit and let focus move on.
    Tab,
}

/// Key bindings of the input.
pub const KEYMAP: &[(KeyChord, KeyAction)] = &[
    (KeyChord::plain(Key::ArrowUp), KeyAction::Up),
    (KeyChord::plain(Key::ArrowDown), KeyAction::Down),
    (KeyChord::plain(Key::Escape), KeyAction::Escape),
    (KeyChord::plain(Key::Enter), KeyAction::Enter),
    (KeyChord::plain(Key::Tab), KeyAction::Tab),
    (KeyChord::with(Key::Tab, KeyboardModifiers::SHIFT), KeyAction::Tab),
];

/// Look up the action bound to `chord`.
pub fn key_action(chord: KeyChord) -> Option<KeyAction> {
    KEYMAP
        .iter()
        .find(|(bound, _)| *bound == chord)
        .map(|&(_, action)| action)
}

/// Whether releasing the key with this legacy code changes the input text.
pub fn is_printable_key_code(code: u32) -> bool {
    matches!(code, 8 | 32 | 48..=57 | 65..=90 | 96..=111 | 186..=192 | 219..=222)
}

/// The scroll offset that brings `entry` fully into a viewport of
/// `viewport_height` currently scrolled to `scroll_top`, moving as little as
/// possible.
pub fn scroll_into_view(scroll_top: f32, viewport_height: f32, entry: BoxMetrics) -> f32 {
    if entry.bottom() > scroll_top + viewport_height {
        entry.bottom() - viewport_height
    } else if entry.offset_top < scroll_top {
        entry.offset_top
    } else {
        scroll_top
    }
}

impl ComboBox {
    /// Move the highlight to entry `next`, or clear it.
    ///
    /// Out of range indices clear the highlight. Has no effect on the state of
    /// a closed list beyond the attributes it writes.
    pub fn highlight(&mut self, doc: &mut Document, next: Option<usize>) -> Result<()> {
        let handle = *self.handle();
        if let Some(outgoing) = self.highlighted_entry().map(|e| e.node) {
            doc.set_attribute(outgoing, aria::SELECTED, "false")?;
            doc.remove_class(outgoing, &self.classes.list_option_selected)?;
        }

        let incoming = next.and_then(|i| self.entries.get(i).map(|e| (i, e.node)));
        match incoming {
            Some((index, node)) => {
                let entry_id = doc.attribute(node, "id").unwrap_or_default().to_owned();
                doc.set_attribute(handle.input, aria::ACTIVE_DESCENDANT, entry_id)?;
                doc.set_attribute(node, aria::SELECTED, "true")?;
                doc.add_class(node, &self.classes.list_option_selected)?;

                let viewport = doc.metrics(handle.list)?.offset_height;
                let scroll_top = doc.scroll_top(handle.list)?;
                let target = scroll_into_view(scroll_top, viewport, doc.metrics(node)?);
                doc.set_scroll_top(handle.list, target)?;

                self.state = ListState::Open {
                    highlight: Some(index),
                };
                tracing::trace!(target: targets::SELECTION, combo_box = ?self.id(), index, "highlight");
            }
            None => {
                doc.remove_attribute(handle.input, aria::ACTIVE_DESCENDANT)?;
                if self.state.is_open() {
                    self.state = ListState::Open { highlight: None };
                }
            }
        }
        Ok(())
    }

    /// Down: open if needed, then move the highlight to the next entry.
    pub fn handle_down(&mut self, doc: &mut Document, event: &mut InputEvent) -> Result<()> {
        event.prevent_default();
        if !self.is_open() {
            self.render_filtered(doc)?;
        }
        let next = match self.highlighted() {
            None if !self.entries.is_empty() => 0,
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => return Ok(()),
        };
        self.highlight(doc, Some(next))
    }

    /// Up: move the highlight to the previous entry, closing the list when
    /// moving up from the first one.
    pub fn handle_up(&mut self, doc: &mut Document, event: &mut InputEvent) -> Result<()> {
        event.prevent_default();
        match self.highlighted() {
            Some(0) => {
                self.highlight(doc, None)?;
                self.hide(doc)?;
                doc.focus(self.handle().input)?;
            }
            Some(i) => self.highlight(doc, Some(i - 1))?,
            None => {}
        }
        Ok(())
    }

    /// Enter: commit and close an open list. A closed list leaves the event
    /// alone so forms still submit.
    pub fn handle_enter(
        &mut self,
        doc: &mut Document,
        event: &mut InputEvent,
    ) -> Result<Option<ValueCommitted>> {
        if !self.is_open() {
            return Ok(None);
        }
        event.prevent_default();
        let committed = self.complete_selection(doc)?;
        self.hide(doc)?;
        Ok(committed)
    }

    /// Tab: commit and close without holding focus back.
    pub fn handle_tab(&mut self, doc: &mut Document) -> Result<Option<ValueCommitted>> {
        let committed = self.complete_selection(doc)?;
        self.hide(doc)?;
        Ok(committed)
    }

    /// Escape: close, put the committed option's text back in the input and
    /// refocus it. The source value is left alone.
    pub fn handle_escape(&mut self, doc: &mut Document) -> Result<()> {
        self.hide(doc)?;
        let text = self
            .committed_option(doc)?
            .map(|o| o.text)
            .unwrap_or_default();
        let input = self.handle().input;
        doc.set_value(input, text)?;
        doc.focus(input)?;
        tracing::trace!(target: targets::SELECTION, combo_box = ?self.id(), "escape");
        Ok(())
    }

    /// Pointer pick of the entry `node`: commit it, close, refocus the input.
    ///
    /// A node from an older render is resolved through its
    /// `data-option-value`, which must still name a valued option of the
    /// select. Returns `Ok(None)` without doing anything otherwise.
    pub fn select_entry(
        &mut self,
        doc: &mut Document,
        node: NodeId,
    ) -> Result<Option<ValueCommitted>> {
        let option = match self.entry_index(node) {
            Some(i) => {
                let entry = &self.entries[i];
                ComboOption::new(entry.value.clone(), entry.text.clone())
            }
            None => {
                let Some(value) = doc.attribute(node, "data-option-value") else {
                    return Ok(None);
                };
                let known = SelectSource::new(doc, self.handle().select)?
                    .options()
                    .into_iter()
                    .find(|o| !o.value.is_empty() && o.value == value);
                match known {
                    Some(option) => option,
                    None => {
                        tracing::debug!(
                            target: targets::SELECTION,
                            combo_box = ?self.id(),
                            value,
                            "ignoring pick of unknown option"
                        );
                        return Ok(None);
                    }
                }
            }
        };
        let committed = self.commit(doc, &option.value, &option.text)?;
        self.hide(doc)?;
        doc.focus(self.handle().input)?;
        Ok(committed)
    }

    /// Settle the value from the current highlight or input text.
    ///
    /// Commits the highlighted entry if there is one, otherwise the option
    /// whose text equals the input text ignoring case, otherwise clears both
    /// the source value and the input text.
    pub fn complete_selection(&mut self, doc: &mut Document) -> Result<Option<ValueCommitted>> {
        let handle = *self.handle();
        doc.set_text_content(handle.status, "")?;

        if let Some(entry) = self.highlighted_entry() {
            let option = ComboOption::new(entry.value.clone(), entry.text.clone());
            return self.commit(doc, &option.value, &option.text);
        }

        let typed = doc.value(handle.input)?;
        let matched = if typed.is_empty() {
            None
        } else {
            SelectSource::new(doc, handle.select)?.find_text_ignore_case(typed)
        };
        match matched {
            Some(option) => self.commit(doc, &option.value, &option.text),
            None => self.commit(doc, "", ""),
        }
    }

    /// Write `value` to the source select and `text` to the input.
    ///
    /// Returns the change when the source value actually moved.
    pub fn commit(
        &mut self,
        doc: &mut Document,
        value: &str,
        text: &str,
    ) -> Result<Option<ValueCommitted>> {
        let handle = *self.handle();
        let previous = write_source_value(doc, handle.select, value)?;
        doc.set_value(handle.input, text)?;
        let value = doc.select_value(handle.select)?;

        tracing::debug!(target: targets::SELECTION, combo_box = ?self.id(), %previous, %value, "commit");
        if previous == value {
            return Ok(None);
        }
        Ok(Some(ValueCommitted {
            combo_box: self.id(),
            previous,
            value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_key_codes() {
        for code in [8, 32, 48, 57, 65, 90, 96, 111, 186, 192, 219, 222] {
            assert!(is_printable_key_code(code), "{code} should be printable");
        }
        for code in [9, 13, 16, 27, 33, 37, 38, 40, 46, 47, 112, 193, 218, 223] {
            assert!(!is_printable_key_code(code), "{code} should not be printable");
        }
    }

    #[test]
    fn test_printable_keys_by_name() {
        assert!(is_printable_key_code(Key::A.key_code()));
        assert!(is_printable_key_code(Key::Backspace.key_code()));
        assert!(is_printable_key_code(Key::NumpadDivide.key_code()));
        assert!(is_printable_key_code(Key::Quote.key_code()));
        assert!(!is_printable_key_code(Key::ArrowDown.key_code()));
        assert!(!is_printable_key_code(Key::Delete.key_code()));
    }

    #[test]
    fn test_keymap() {
        assert_eq!(
            key_action(KeyChord::plain(Key::ArrowDown)),
            Some(KeyAction::Down)
        );
        assert_eq!(
            key_action(KeyChord::with(Key::Tab, KeyboardModifiers::SHIFT)),
            Some(KeyAction::Tab)
        );
        assert_eq!(
            key_action(KeyChord::with(Key::Enter, KeyboardModifiers::CTRL)),
            None
        );
        assert_eq!(
            key_action(KeyChord::with(Key::ArrowDown, KeyboardModifiers::ALT)),
            None
        );
        assert_eq!(key_action(KeyChord::plain(Key::A)), None);
    }

    #[test]
    fn test_scroll_into_view() {
        let row = |i: f32| BoxMetrics::new(i * 40.0, 40.0);
        // Visible already.
        assert_eq!(scroll_into_view(0.0, 200.0, row(2.0)), 0.0);
        // Below the fold: align bottom edges.
        assert_eq!(scroll_into_view(0.0, 200.0, row(5.0)), 40.0);
        // Above the top: align top edges.
        assert_eq!(scroll_into_view(120.0, 200.0, row(1.0)), 40.0);
        // Exactly touching the bottom edge stays put.
        assert_eq!(scroll_into_view(0.0, 200.0, row(4.0)), 0.0);
    }
}
