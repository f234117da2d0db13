//! Scripted walk through a fruit combo box.
//!
//! Run with: cargo run -p combo-lattice --example fruit_combo
//!
//! Set `RUST_LOG=combo_lattice=trace` to watch the widget work.

use combo_lattice::prelude::*;
use combo_lattice_core::logging::DocumentTreeDebug;

fn build(doc: &mut Document, classes: &ClassNames) -> Result<NodeId, ComboBoxError> {
    let body = doc.body();
    let container = doc.create_element("div");
    doc.add_class(container, &classes.container)?;
    doc.append_child(body, container)?;

    let select = doc.create_element("select");
    doc.set_attribute(select, "id", "fruit")?;
    doc.add_class(select, &classes.select)?;
    doc.append_child(container, select)?;
    for (value, text) in [
        ("", "Select a fruit"),
        ("ap", "Apple"),
        ("ap2", "Apricot"),
        ("ba", "Banana"),
        ("bl", "Blueberry"),
        ("ch", "Cherry"),
    ] {
        doc.add_option(select, Some(value), text)?;
    }
    Ok(select)
}

fn send(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    mut event: InputEvent,
) -> Result<(), ComboBoxError> {
    behavior.dispatch(doc, &mut event)?;
    Ok(())
}

fn type_text(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    input: NodeId,
    text: &str,
) -> Result<(), ComboBoxError> {
    for c in text.chars() {
        let Some(key) = Key::from_char(c) else {
            continue;
        };
        let mut value = doc.value(input)?.to_owned();
        value.push(c);
        doc.set_value(input, value)?;
        send(behavior, doc, InputEvent::key_up(input, key))?;
    }
    Ok(())
}

fn main() -> Result<(), ComboBoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let mut behavior = ComboBoxBehavior::default();
    let select = build(&mut doc, behavior.classes())?;

    behavior.value_committed.connect(|c: &ValueCommitted| {
        println!("committed {:?} -> {:?}", c.previous, c.value);
    });

    let body = doc.body();
    let id = behavior.init(&mut doc, body)?[0];
    let input = behavior
        .combo_box(id)
        .map(|c| c.handle().input)
        .ok_or(ComboBoxError::NotEnhanced { container: body })?;

    type_text(&mut behavior, &mut doc, input, "ap")?;
    println!("after typing \"ap\":");
    println!("{}", DocumentTreeDebug::new().format_subtree(&doc, body)?);

    send(&mut behavior, &mut doc, InputEvent::key_down(input, Key::ArrowDown))?;
    send(&mut behavior, &mut doc, InputEvent::key_down(input, Key::ArrowDown))?;
    send(&mut behavior, &mut doc, InputEvent::key_down(input, Key::Enter))?;

    println!(
        "value = {:?}, text = {:?}",
        doc.select_value(select)?,
        doc.value(input)?
    );
    Ok(())
}
