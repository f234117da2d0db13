//! Accessibility roles and states for combo box surfaces.
//!
//! The widget speaks ARIA through document attributes (`role`,
//! `aria-expanded`, `aria-activedescendant`, ...). With the `accessibility`
//! feature, [`ComboBox::accessibility_update`] additionally mirrors an
//! instance into an [AccessKit](https://accesskit.dev/) `TreeUpdate` for hosts
//! that drive a platform accessibility API directly.

#[cfg(feature = "accessibility")]
use accesskit::{Live, Node, NodeId as AccessKitNodeId, Role, TreeUpdate};
#[cfg(feature = "accessibility")]
use combo_lattice_core::{Document, NodeId};

#[cfg(feature = "accessibility")]
use crate::combo_box::ComboBox;
#[cfg(feature = "accessibility")]
use crate::error::Result;

/// ARIA attribute names written by the widget.
pub mod aria {
    /// `role`.
    pub const ROLE: &str = "role";
    /// Whether the owned list is shown.
    pub const EXPANDED: &str = "aria-expanded";
    /// Id of the highlighted entry.
    pub const ACTIVE_DESCENDANT: &str = "aria-activedescendant";
    /// Id of the owned list.
    pub const OWNS: &str = "aria-owns";
    /// Id of the assistive hint.
    pub const DESCRIBED_BY: &str = "aria-describedby";
    /// Autocomplete style of the input.
    pub const AUTOCOMPLETE: &str = "aria-autocomplete";
    /// Highlight state of an entry.
    pub const SELECTED: &str = "aria-selected";
    /// Number of entries in the rendered list.
    pub const SET_SIZE: &str = "aria-setsize";
    /// 1-based position of an entry.
    pub const POS_IN_SET: &str = "aria-posinset";
    /// Politeness of a live region.
    pub const LIVE: &str = "aria-live";
    /// Hides an element from assistive technology.
    pub const HIDDEN: &str = "aria-hidden";
}

/// The accessibility role of a combo box surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    /// The text input.
    ComboBox,
    /// The list surface.
    ListBox,
    /// A rendered list entry.
    Option,
    /// The live status region.
    Status,
}

impl AriaRole {
    /// The value written to the `role` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            AriaRole::ComboBox => "combobox",
            AriaRole::ListBox => "listbox",
            AriaRole::Option => "option",
            AriaRole::Status => "status",
        }
    }

    /// Convert to AccessKit's Role enum.
    #[cfg(feature = "accessibility")]
    pub fn to_accesskit_role(self) -> Role {
        match self {
            AriaRole::ComboBox => Role::ComboBox,
            AriaRole::ListBox => Role::ListBox,
            AriaRole::Option => Role::ListBoxOption,
            AriaRole::Status => Role::Status,
        }
    }
}

#[cfg(feature = "accessibility")]
impl From<AriaRole> for Role {
    fn from(role: AriaRole) -> Self {
        role.to_accesskit_role()
    }
}

/// Politeness of a live region announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Politeness {
    /// Announcements are suppressed.
    Off,
    /// Announced when the user is idle.
    #[default]
    Polite,
    /// Announced immediately, interrupting.
    Assertive,
}

impl Politeness {
    /// The value written to `aria-live`.
    pub fn as_str(self) -> &'static str {
        match self {
            Politeness::Off => "off",
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        }
    }
}

/// Convert a document node to an AccessKit node id.
#[cfg(feature = "accessibility")]
pub(crate) fn to_accesskit_id(id: NodeId) -> AccessKitNodeId {
    AccessKitNodeId(id.as_raw())
}

#[cfg(feature = "accessibility")]
impl ComboBox {
    /// Build an AccessKit update describing this instance.
    ///
    /// The container becomes a generic node owning the input, the list and
    /// the status region; rendered entries hang off the list. Focus is
    /// reported on the input when it holds document focus, otherwise on the
    /// container.
    pub fn accessibility_update(&self, doc: &Document) -> Result<TreeUpdate> {
        let handle = self.handle();
        let mut nodes = Vec::new();

        let mut container = Node::new(Role::GenericContainer);
        container.set_children(vec![
            to_accesskit_id(handle.input),
            to_accesskit_id(handle.list),
            to_accesskit_id(handle.status),
        ]);
        nodes.push((to_accesskit_id(handle.container), container));

        let mut input = Node::new(AriaRole::ComboBox.into());
        input.set_value(doc.value(handle.input)?);
        input.set_expanded(self.is_open());
        input.set_described_by(vec![to_accesskit_id(handle.hint)]);
        if let Some(entry) = self.highlighted_entry() {
            input.set_active_descendant(to_accesskit_id(entry.node));
        }
        nodes.push((to_accesskit_id(handle.input), input));

        let mut list = Node::new(AriaRole::ListBox.into());
        if !self.is_open() {
            list.set_hidden();
        }
        let entry_ids: Vec<_> = self
            .entries()
            .iter()
            .map(|e| to_accesskit_id(e.node))
            .collect();
        if !entry_ids.is_empty() {
            list.set_children(entry_ids);
        }
        nodes.push((to_accesskit_id(handle.list), list));

        let count = self.entries().len();
        for (index, entry) in self.entries().iter().enumerate() {
            let mut option = Node::new(AriaRole::Option.into());
            option.set_label(entry.text.as_str());
            option.set_selected(self.highlighted() == Some(index));
            option.set_position_in_set(index + 1);
            option.set_size_of_set(count);
            nodes.push((to_accesskit_id(entry.node), option));
        }

        let mut status = Node::new(AriaRole::Status.into());
        status.set_live(Live::Polite);
        let announcement = doc.text_content(handle.status)?;
        if !announcement.is_empty() {
            status.set_label(announcement);
        }
        nodes.push((to_accesskit_id(handle.status), status));

        let focus = if doc.focused() == Some(handle.input) {
            handle.input
        } else {
            handle.container
        };

        Ok(TreeUpdate {
            nodes,
            tree: None,
            focus: to_accesskit_id(focus),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_strings() {
        assert_eq!(AriaRole::ComboBox.as_str(), "combobox");
        assert_eq!(AriaRole::ListBox.as_str(), "listbox");
        assert_eq!(AriaRole::Option.as_str(), "option");
        assert_eq!(AriaRole::Status.as_str(), "status");
        assert_eq!(Politeness::default().as_str(), "polite");
    }

    #[cfg(feature = "accessibility")]
    #[test]
    fn test_accesskit_roles() {
        assert_eq!(AriaRole::ComboBox.to_accesskit_role(), Role::ComboBox);
        assert_eq!(Role::from(AriaRole::Option), Role::ListBoxOption);
    }
}
