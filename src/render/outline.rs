//! Outline: the visual rendering of a [`TreeView`] as indented text rows.
//!
//! One row per visible node, indented two spaces per level, with a marker
//! for the node's disclosure state:
//!
//! | marker | meaning                              |
//! |--------|--------------------------------------|
//! | `▸`    | closed, has children                 |
//! | `▾`    | open                                 |
//! | `…`    | open, children still loading         |
//! | `·`    | leaf                                 |
//!
//! Selected, focused, and disabled rows carry a bracketed tag after the label.

use crate::model::NodeId;
use crate::view::TreeView;

/// Disclosure state shown in front of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disclosure {
    Leaf,
    Collapsed,
    Expanded,
    Loading,
}

impl Disclosure {
    pub fn marker(self) -> char {
        match self {
            Disclosure::Leaf => '·',
            Disclosure::Collapsed => '▸',
            Disclosure::Expanded => '▾',
            Disclosure::Loading => '…',
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: NodeId,
    pub label: String,
    pub depth: usize,
    pub disclosure: Disclosure,
    pub selected: bool,
    pub focused: bool,
    pub disabled: bool,
}

impl OutlineRow {
    /// The row as a single line of text.
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{:width$}{} {}",
            "",
            self.disclosure.marker(),
            self.label,
            width = self.depth * 2
        );
        if self.selected {
            line.push_str(" [selected]");
        }
        if self.focused {
            line.push_str(" [focus]");
        }
        if self.disabled {
            line.push_str(" [disabled]");
        }
        line
    }
}

/// Rows for every visible node, in display order.
pub fn rows(view: &TreeView) -> Vec<OutlineRow> {
    let active = view.active_id();
    view.visible()
        .iter()
        .map(|row| {
            let id = row.id();
            let disclosure = if !row.is_disclosable() {
                Disclosure::Leaf
            } else if !row.expanded {
                Disclosure::Collapsed
            } else if view.is_loading(id.as_str()) || row.node.needs_load() {
                Disclosure::Loading
            } else {
                Disclosure::Expanded
            };
            OutlineRow {
                id: id.clone(),
                label: row.node.label.clone(),
                depth: row.depth,
                disclosure,
                selected: view.is_selected(id.as_str()),
                focused: active == Some(id),
                disabled: row.node.disabled,
            }
        })
        .collect()
}

/// Render the outline as newline-separated rows.
pub fn render(view: &TreeView) -> String {
    rows(view)
        .iter()
        .map(OutlineRow::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
