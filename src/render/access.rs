//! Accessibility tree: the semantic rendering of a [`TreeView`].
//!
//! The container has role `tree`; every visible node is a `treeitem`; the
//! children of each open node sit inside a `group`. Items carry level,
//! position in set, set size, and the expanded/selected/disabled/busy states,
//! plus the roving tab index (0 for the focused item, -1 elsewhere).
//!
//! Built from the same flattened list as the outline, so the two never
//! disagree about which nodes exist or in what order.

use std::fmt;

use crate::model::NodeId;
use crate::view::TreeView;
use crate::visible::VisibleNode;

/// Semantic role of an accessibility node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Tree,
    TreeItem,
    Group,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Tree => "tree",
            Role::TreeItem => "treeitem",
            Role::Group => "group",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the accessibility tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessNode {
    pub role: Role,
    /// Backing node id (treeitems only).
    pub id: Option<NodeId>,
    /// Accessible name.
    pub label: Option<String>,
    /// 1-based nesting level (treeitems only).
    pub level: Option<usize>,
    /// 1-based position among siblings (treeitems only).
    pub pos_in_set: Option<usize>,
    /// Sibling count (treeitems only).
    pub set_size: Option<usize>,
    /// Open/closed; absent on items without a disclosure affordance.
    pub expanded: Option<bool>,
    /// Selection state (treeitems only).
    pub selected: Option<bool>,
    pub disabled: bool,
    /// Children are being fetched.
    pub busy: bool,
    /// Roving tab index (treeitems only): 0 for the tab stop, -1 otherwise.
    pub tab_index: Option<i8>,
    /// Set on the container when more than one item may be selected.
    pub multiselectable: bool,
    pub children: Vec<AccessNode>,
}

impl AccessNode {
    fn container(role: Role) -> Self {
        Self {
            role,
            id: None,
            label: None,
            level: None,
            pos_in_set: None,
            set_size: None,
            expanded: None,
            selected: None,
            disabled: false,
            busy: false,
            tab_index: None,
            multiselectable: false,
            children: Vec::new(),
        }
    }

    /// Treeitems in document order.
    pub fn items(&self) -> Vec<&AccessNode> {
        let mut out = Vec::new();
        self.collect_items(&mut out);
        out
    }

    fn collect_items<'a>(&'a self, out: &mut Vec<&'a AccessNode>) {
        if self.role == Role::TreeItem {
            out.push(self);
        }
        for child in &self.children {
            child.collect_items(out);
        }
    }

    /// Find the treeitem for `id`.
    pub fn find(&self, id: &str) -> Option<&AccessNode> {
        self.items()
            .into_iter()
            .find(|item| item.id.as_ref().is_some_and(|i| i == id))
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.role, width = indent * 2)?;
        if let Some(label) = &self.label {
            write!(f, " {label:?}")?;
        }
        if let Some(level) = self.level {
            write!(f, " level={level}")?;
        }
        if let (Some(pos), Some(size)) = (self.pos_in_set, self.set_size) {
            write!(f, " pos={pos}/{size}")?;
        }
        if let Some(expanded) = self.expanded {
            write!(f, " expanded={expanded}")?;
        }
        if let Some(selected) = self.selected {
            write!(f, " selected={selected}")?;
        }
        if self.disabled {
            f.write_str(" disabled")?;
        }
        if self.busy {
            f.write_str(" busy")?;
        }
        if let Some(tab_index) = self.tab_index {
            write!(f, " tabindex={tab_index}")?;
        }
        if self.multiselectable {
            f.write_str(" multiselectable")?;
        }
        for child in &self.children {
            writeln!(f)?;
            child.write_indented(f, indent + 1)?;
        }
        Ok(())
    }
}

/// Indented one-node-per-line dump.
impl fmt::Display for AccessNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Build the accessibility tree for `view`.
pub fn build(view: &TreeView) -> AccessNode {
    let mut root = AccessNode::container(Role::Tree);
    root.label = view.label().map(str::to_owned);
    root.multiselectable = view.selection().is_multi();

    let rows = view.visible();
    let mut cursor = 0;
    root.children = items_at(view, rows, &mut cursor, 0);
    root
}

/// Consume consecutive rows at `depth`, nesting deeper rows into groups.
fn items_at(
    view: &TreeView,
    rows: &[VisibleNode],
    cursor: &mut usize,
    depth: usize,
) -> Vec<AccessNode> {
    let mut items = Vec::new();
    while let Some(row) = rows.get(*cursor) {
        if row.depth != depth {
            break;
        }
        *cursor += 1;
        let mut item = item(view, row);
        if rows.get(*cursor).is_some_and(|next| next.depth > depth) {
            let mut group = AccessNode::container(Role::Group);
            group.children = items_at(view, rows, cursor, depth + 1);
            item.children.push(group);
        }
        items.push(item);
    }
    items
}

fn item(view: &TreeView, row: &VisibleNode) -> AccessNode {
    let id = row.id();
    let focused = view.active_id() == Some(id);
    AccessNode {
        role: Role::TreeItem,
        id: Some(id.clone()),
        label: Some(row.node.label.clone()),
        level: Some(row.depth + 1),
        pos_in_set: Some(row.position),
        set_size: Some(row.set_size),
        expanded: row.is_disclosable().then_some(row.expanded),
        selected: Some(view.is_selected(id.as_str())),
        disabled: row.node.disabled,
        busy: view.is_loading(id.as_str()),
        tab_index: Some(if focused { 0 } else { -1 }),
        multiselectable: false,
        children: Vec::new(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
