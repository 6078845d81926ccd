//! In-memory element tree backing the page.
//!
//! [`ViewTree`] is the display surface the renderer writes to: an arena of
//! elements addressed by [`ElementId`], with attributes, text, ordered
//! children and typed click listeners. The painter reads it; nothing else
//! about the terminal leaks in here.
//!
//! Listeners are plain values, not closures. Dispatching a click returns the
//! listeners that fire and the application layer decides what they mean.
//! Removing an element removes every listener registered on its subtree, so
//! short-lived surfaces such as the overlay cannot leave handlers behind.

use std::collections::{BTreeMap, HashMap};

/// Handle to an element in a [`ViewTree`].
///
/// Ids are never reused, so a handle to a removed element simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Element kinds understood by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Body,
    Header,
    H1,
    H2,
    Nav,
    Main,
    Footer,
    Article,
    Div,
    Paragraph,
    Span,
    Anchor,
    Input,
    Select,
    Option,
}

impl Tag {
    /// Inline elements share a line with their inline siblings.
    #[must_use]
    pub const fn is_inline(self) -> bool {
        matches!(self, Self::Span | Self::Anchor | Self::Input | Self::Select)
    }
}

/// What a click listener does once it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Delegated "read more" handling: inspects the click target for a
    /// `read-more` link and its `data-post-id`.
    ReadMore,
    /// Scroll to the element named by this anchor's `href` fragment.
    AnchorScroll,
    /// Give keyboard focus to the search input.
    FocusSearch,
    /// Advance the category selector to its next option.
    CycleCategory,
    /// Close the open overlay.
    CloseOverlay,
    /// Close the open overlay when its backdrop itself is clicked.
    DismissBackdrop,
}

/// Whether a listener also fires for clicks on descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Fires for the element and anything inside it.
    Bubble,
    /// Fires only when the element is the click target.
    TargetOnly,
}

/// A listener that fired during [`ViewTree::dispatch_click`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    /// The element the listener is registered on.
    pub current: ElementId,
    /// The element that was clicked.
    pub target: ElementId,
    pub listener: Listener,
}

/// A single node of the tree.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    /// Returns `true` if `class` is among the element's classes.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of the attribute `name`, if set.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena of elements rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct ViewTree {
    nodes: HashMap<ElementId, Element>,
    listeners: HashMap<ElementId, Vec<(Listener, Propagation)>>,
    next_id: usize,
    root: ElementId,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    /// Creates a tree holding only the `body` root.
    #[must_use]
    pub fn new() -> Self {
        let root = ElementId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Self::blank(Tag::Body));
        Self {
            nodes,
            listeners: HashMap::new(),
            next_id: 1,
            root,
        }
    }

    fn blank(tag: Tag) -> Element {
        Element {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// The `body` element every attached element descends from.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        self.root
    }

    /// Creates a detached element.
    pub fn create(&mut self, tag: Tag) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Self::blank(tag));
        id
    }

    /// Creates an element with text and appends it to `parent`.
    pub fn create_in(&mut self, parent: ElementId, tag: Tag, text: &str) -> ElementId {
        let id = self.create(tag);
        self.set_text(id, text);
        self.append_child(parent, id);
        id
    }

    /// Looks an element up by handle. Removed elements return `None`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(&id)
    }

    /// Returns `true` while `id` has not been removed.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live elements, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of registered listeners across the whole tree.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Children of `id` in document order; empty for unknown handles.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(&id).map_or(&[][..], |el| el.children.as_slice())
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent. Unknown handles are ignored, and so is a move that
    /// would place an element inside its own subtree.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.contains(parent) || !self.contains(child) || self.is_within(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.nodes.get(&id).and_then(|el| el.parent) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Removes an element, its descendants and all of their listeners.
    ///
    /// Returns `false` if the element was not in the tree. The root cannot be
    /// removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
            self.listeners.remove(&next);
        }
        true
    }

    /// Removes every child of `id`, keeping `id` itself.
    pub fn clear_children(&mut self, id: ElementId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    /// Replaces the element's own text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            text.clone_into(&mut node.text);
        }
    }

    /// Sets or overwrites an attribute.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Value of the attribute `name` on `id`, if both exist.
    #[must_use]
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(&id).and_then(|el| el.attr(name))
    }

    /// Adds `class` unless the element already has it.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    /// Registers a click listener on `id`.
    pub fn on_click(&mut self, id: ElementId, listener: Listener, propagation: Propagation) {
        if self.contains(id) {
            self.listeners.entry(id).or_default().push((listener, propagation));
        }
    }

    /// Finds the attached element whose `id` attribute equals `name`.
    #[must_use]
    pub fn get_element_by_id(&self, name: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.attr(*id, "id") == Some(name))
    }

    /// All descendants of `id` in document order, `id` excluded.
    #[must_use]
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Returns `true` if `id` is `ancestor` or lies inside it.
    #[must_use]
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|el| el.parent);
        }
        false
    }

    /// Collects the listeners a click on `target` triggers.
    ///
    /// Walks from the target up to the root. `TargetOnly` listeners fire only
    /// on the target itself. A target that is not in the tree fires nothing.
    #[must_use]
    pub fn dispatch_click(&self, target: ElementId) -> Vec<Fired> {
        let mut fired = Vec::new();
        let mut cursor = self.contains(target).then_some(target);
        while let Some(current) = cursor {
            if let Some(registered) = self.listeners.get(&current) {
                for (listener, propagation) in registered {
                    if *propagation == Propagation::Bubble || current == target {
                        fired.push(Fired {
                            current,
                            target,
                            listener: listener.clone(),
                        });
                    }
                }
            }
            cursor = self.nodes.get(&current).and_then(|el| el.parent);
        }
        fired
    }
}
