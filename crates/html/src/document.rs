use crate::types::{ElementData, Id, NodeKind};

#[derive(Debug, Clone)]
struct Slot {
    parent: Option<Id>,
    children: Vec<Id>,
    kind: NodeKind,
    released: bool,
}

/// Mutable document tree stored as an arena.
///
/// A node removed from the tree keeps its [`Id`] and its subtree, and can be inserted again
/// later. This is what lets callers restore a replaced node by identity. Slots are only reused
/// after a detached subtree is handed back with [`Document::release_subtree`].
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<Id>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document { doctype: None },
                released: false,
            }],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> Id {
        Id(0)
    }

    /// Number of live nodes, attached or not. Released slots are not counted.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn set_doctype(&mut self, value: Option<String>) {
        if let NodeKind::Document { doctype } = &mut self.slots[0].kind {
            *doctype = value;
        }
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.slots[0].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    fn push(&mut self, kind: NodeKind) -> Id {
        let slot = Slot {
            parent: None,
            children: Vec::new(),
            kind,
            released: false,
        };
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = slot;
            return id;
        }
        let Ok(index) = u32::try_from(self.slots.len()) else {
            panic!("document arena exceeds u32::MAX nodes");
        };
        self.slots.push(slot);
        Id(index)
    }

    /// Free a detached node and everything under it so later `create_*` calls reuse the slots.
    ///
    /// Ids inside the subtree must not be used afterwards. Attached nodes, the document node and
    /// already released nodes are left alone; returns whether anything was released.
    pub fn release_subtree(&mut self, id: Id) -> bool {
        let slot = &self.slots[id.index()];
        if id == self.root() || slot.parent.is_some() || slot.released {
            return false;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index()];
            stack.append(&mut slot.children);
            slot.kind = NodeKind::Comment(String::new());
            slot.parent = None;
            slot.released = true;
            self.free.push(current);
        }
        true
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> Id {
        self.push(NodeKind::Element(ElementData::new(name.to_ascii_lowercase())))
    }

    pub fn create_element_with(&mut self, data: ElementData) -> Id {
        self.push(NodeKind::Element(data))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> Id {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> Id {
        self.push(NodeKind::Comment(text.into()))
    }

    pub fn kind(&self, id: Id) -> &NodeKind {
        &self.slots[id.index()].kind
    }

    pub fn element(&self, id: Id) -> Option<&ElementData> {
        match &self.slots[id.index()].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: Id) -> Option<&mut ElementData> {
        match &mut self.slots[id.index()].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn text(&self, id: Id) -> Option<&str> {
        match &self.slots[id.index()].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: Id) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.slots[id.index()].parent
    }

    pub fn children(&self, id: Id) -> &[Id] {
        &self.slots[id.index()].children
    }

    pub fn is_connected(&self, id: Id) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root() {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub fn is_descendant_of(&self, id: Id, ancestor: Id) -> bool {
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Ancestors of `id`, nearest first. Does not include `id`.
    pub fn ancestors(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    fn can_have_children(&self, id: Id) -> bool {
        matches!(
            self.slots[id.index()].kind,
            NodeKind::Document { .. } | NodeKind::Element(_)
        )
    }

    fn detach(&mut self, id: Id) {
        if let Some(parent) = self.slots[id.index()].parent.take() {
            self.slots[parent.index()].children.retain(|c| *c != id);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if it is already attached.
    pub fn append_child(&mut self, parent: Id, child: Id) {
        debug_assert!(self.can_have_children(parent), "parent cannot have children");
        debug_assert!(
            parent != child
                && (self.children(child).is_empty() || !self.is_descendant_of(parent, child)),
            "append would create a cycle"
        );
        self.detach(child);
        self.slots[child.index()].parent = Some(parent);
        self.slots[parent.index()].children.push(child);
    }

    /// Insert `child` before `reference`, which must be a child of `parent`.
    /// Falls back to appending when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: Id, child: Id, reference: Id) {
        self.detach(child);
        let siblings = &mut self.slots[parent.index()].children;
        let at = siblings
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(at, child);
        self.slots[child.index()].parent = Some(parent);
    }

    /// Detach `child` from `parent`. Returns false when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: Id, child: Id) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    /// Put `new_child` in the position of `old_child` under its parent.
    /// `old_child` becomes detached but keeps its subtree. Returns false if `old_child` has no
    /// parent.
    pub fn replace_node(&mut self, old_child: Id, new_child: Id) -> bool {
        let Some(parent) = self.parent(old_child) else {
            return false;
        };
        if old_child == new_child {
            return true;
        }
        self.detach(new_child);
        let siblings = &mut self.slots[parent.index()].children;
        let Some(at) = siblings.iter().position(|c| *c == old_child) else {
            return false;
        };
        siblings[at] = new_child;
        self.slots[new_child.index()].parent = Some(parent);
        self.slots[old_child.index()].parent = None;
        true
    }

    pub fn attr(&self, id: Id, key: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(key))
    }

    pub fn set_attr(&mut self, id: Id, key: &str, value: impl Into<String>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let value = Some(value.into());
        match element
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = value,
            None => element.attributes.push((key.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove_attr(&mut self, id: Id, key: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        }
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: Id, class: &str) {
        if self.element(id).is_none() || self.has_class(id, class) {
            return;
        }
        let list = match self.attr(id, "class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", list);
    }

    pub fn remove_class(&mut self, id: Id, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let list = self
            .attr(id, "class")
            .unwrap_or("")
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(id, "class", list);
    }

    /// Toggle `class` and return whether it is now present.
    pub fn toggle_class(&mut self, id: Id, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.has_class(id, class)
        }
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: Id, out: &mut String) {
        match &self.slots[id.index()].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(_) => {}
            NodeKind::Document { .. } | NodeKind::Element(_) => {
                for child in &self.slots[id.index()].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Replace all children of `id` with a single text node (none for empty text).
    pub fn set_text_content(&mut self, id: Id, text: &str) {
        match &mut self.slots[id.index()].kind {
            NodeKind::Text(value) | NodeKind::Comment(value) => {
                *value = text.to_string();
                return;
            }
            NodeKind::Document { .. } | NodeKind::Element(_) => {}
        }
        for child in std::mem::take(&mut self.slots[id.index()].children) {
            self.slots[child.index()].parent = None;
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    /// All descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: Id) -> Descendants<'_> {
        let mut stack: Vec<Id> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    pub fn first_element_named(&self, scope: Id, name: &str) -> Option<Id> {
        self.descendants(scope)
            .find(|id| self.element(*id).is_some_and(|e| e.is(name)))
    }

    pub fn body(&self) -> Option<Id> {
        self.first_element_named(self.root(), "body")
    }

    pub fn element_by_id(&self, value: &str) -> Option<Id> {
        if value.is_empty() {
            return None;
        }
        self.descendants(self.root())
            .find(|id| self.attr(*id, "id") == Some(value))
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
