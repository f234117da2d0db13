//! Shared fixtures for combo box integration tests.

#![allow(dead_code)]

use combo_lattice::prelude::*;

/// The fruit options used throughout the tests.
pub const FRUITS: &[(&str, &str)] = &[
    ("", "Select a fruit"),
    ("ap", "Apple"),
    ("ba", "Banana"),
    ("ch", "Cherry"),
];

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Append an unenhanced combo box markup block to `parent`.
pub fn add_markup(
    doc: &mut Document,
    parent: NodeId,
    classes: &ClassNames,
    select_id: &str,
    options: &[(&str, &str)],
) -> (NodeId, NodeId) {
    let container = doc.create_element("div");
    doc.add_class(container, &classes.container).unwrap();
    doc.append_child(parent, container).unwrap();

    let label = doc.create_element("label");
    doc.set_attribute(label, "for", select_id).unwrap();
    doc.set_text_content(label, "Fruit").unwrap();
    doc.append_child(container, label).unwrap();

    let select = doc.create_element("select");
    doc.set_attribute(select, "id", select_id).unwrap();
    doc.set_attribute(select, "name", select_id).unwrap();
    doc.add_class(select, &classes.select).unwrap();
    doc.append_child(container, select).unwrap();
    for &(value, text) in options {
        doc.add_option(select, Some(value), text).unwrap();
    }
    (container, select)
}

/// A document with one enhanced combo box.
pub struct Fixture {
    pub doc: Document,
    pub behavior: ComboBoxBehavior,
    pub id: ComboBoxId,
    pub handle: ComboBoxHandle,
    /// An element outside every combo box.
    pub outside: NodeId,
}

impl Fixture {
    pub fn fruits() -> Self {
        Self::with_options(ComboBoxConfig::default(), FRUITS)
    }

    pub fn with_options(config: ComboBoxConfig, options: &[(&str, &str)]) -> Self {
        init_tracing();
        let mut doc = Document::new();
        let body = doc.body();
        let behavior = ComboBoxBehavior::new(config);
        add_markup(&mut doc, body, behavior.classes(), "fruit", options);

        let outside = doc.create_element("p");
        doc.append_child(body, outside).unwrap();

        let mut behavior = behavior;
        let ids = behavior.init(&mut doc, body).unwrap();
        assert_eq!(ids.len(), 1);
        let handle = *behavior.combo_box(ids[0]).unwrap().handle();
        Self {
            doc,
            behavior,
            id: ids[0],
            handle,
            outside,
        }
    }

    pub fn combo(&self) -> &ComboBox {
        self.behavior.combo_box(self.id).unwrap()
    }

    pub fn dispatch(&mut self, mut event: InputEvent) -> InputEvent {
        self.behavior.dispatch(&mut self.doc, &mut event).unwrap();
        event
    }

    pub fn press(&mut self, key: Key) -> InputEvent {
        self.press_with(key, KeyboardModifiers::NONE)
    }

    pub fn press_with(&mut self, key: Key, modifiers: KeyboardModifiers) -> InputEvent {
        let input = self.handle.input;
        let down = self.dispatch(InputEvent::key_down(input, key).with_modifiers(modifiers));
        self.dispatch(InputEvent::key_up(input, key).with_modifiers(modifiers));
        down
    }

    /// Type `text` into the input one character at a time, the way an
    /// adapter would: the value changes, then the key is released.
    pub fn type_text(&mut self, text: &str) {
        let input = self.handle.input;
        for c in text.chars() {
            let key = Key::from_char(c).unwrap();
            self.dispatch(InputEvent::key_down(input, key));
            let mut value = self.doc.value(input).unwrap().to_owned();
            value.push(c);
            self.doc.set_value(input, value).unwrap();
            self.dispatch(InputEvent::key_up(input, key));
        }
    }

    pub fn clear_input(&mut self) {
        self.doc.set_value(self.handle.input, "").unwrap();
        self.press(Key::Backspace);
    }

    pub fn click(&mut self, node: NodeId) -> InputEvent {
        self.dispatch(InputEvent::click(node))
    }

    /// Children of the list surface.
    pub fn list_items(&self) -> Vec<NodeId> {
        self.doc.children(self.handle.list).unwrap().to_vec()
    }

    /// Text of every child of the list surface.
    pub fn list_texts(&self) -> Vec<String> {
        self.list_items()
            .into_iter()
            .map(|n| self.doc.text_content(n).unwrap())
            .collect()
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.doc.attribute(node, name).map(str::to_owned)
    }

    pub fn status(&self) -> String {
        self.doc.text_content(self.handle.status).unwrap()
    }

    pub fn input_text(&self) -> String {
        self.doc.value(self.handle.input).unwrap().to_owned()
    }

    pub fn select_value(&self) -> String {
        self.doc.select_value(self.handle.select).unwrap()
    }

    pub fn is_list_hidden(&self) -> bool {
        self.doc.is_hidden(self.handle.list)
    }

    /// Entries currently marked `aria-selected="true"`.
    pub fn selected_items(&self) -> Vec<NodeId> {
        self.list_items()
            .into_iter()
            .filter(|&n| self.doc.attribute(n, "aria-selected") == Some("true"))
            .collect()
    }
}
