//! Model of the light content tree a host supplies to the widget.

use crate::i18n::TranslatableText;
use std::sync::{Arc, RwLock};

/// Reserved slot through which the host replaces the built-in method selector.
pub const METHOD_SELECTOR_SLOT: &str = "method-selector-override";

/// Reserved slot for a host-supplied submit button.
pub const SUBMIT_BUTTON_SLOT: &str = "submit-button";

/// Live value of a host-supplied input. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct FieldValue(Arc<RwLock<String>>);

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }

    pub fn get(&self) -> String {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, value: impl Into<String>) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = value.into();
    }
}

/// One node of the host content tree.
#[derive(Debug, Clone)]
pub enum ContentNode {
    Element {
        tag: String,
        slot: Option<String>,
        value: Option<FieldValue>,
        children: Vec<ContentNode>,
    },
    Text(String),
    Translatable(Arc<TranslatableText>),
}

impl ContentNode {
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            slot: None,
            value: None,
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn translatable(leaf: Arc<TranslatableText>) -> Self {
        Self::Translatable(leaf)
    }

    /// Tag the element for a named slot. No effect on non-elements.
    pub fn with_slot(mut self, name: impl Into<String>) -> Self {
        if let Self::Element { slot, .. } = &mut self {
            *slot = Some(name.into());
        }
        self
    }

    pub fn with_value(mut self, field: FieldValue) -> Self {
        if let Self::Element { value, .. } = &mut self {
            *value = Some(field);
        }
        self
    }

    pub fn with_child(mut self, child: ContentNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn slot(&self) -> Option<&str> {
        match self {
            Self::Element { slot, .. } => slot.as_deref(),
            _ => None,
        }
    }

    fn children(&self) -> &[ContentNode] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// The node's own value, or the first value found among its descendants.
    pub fn first_value(&self) -> Option<FieldValue> {
        if let Self::Element { value: Some(v), .. } = self {
            return Some(v.clone());
        }
        self.children().iter().find_map(ContentNode::first_value)
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ContentNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// The host's light content tree.
#[derive(Debug, Clone, Default)]
pub struct HostContent {
    nodes: Vec<ContentNode>,
}

impl HostContent {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    pub fn push(&mut self, node: ContentNode) {
        self.nodes.push(node);
    }

    fn walk<'a>(&'a self, mut visit: impl FnMut(&'a ContentNode)) {
        for node in &self.nodes {
            node.walk(&mut visit);
        }
    }

    /// Whether an element tagged for `slot` exists anywhere in the tree.
    pub fn has_slot(&self, slot: &str) -> bool {
        let mut found = false;
        self.walk(|node| found |= node.slot() == Some(slot));
        found
    }

    /// Top-level elements assigned to `slot`.
    pub fn assigned(&self, slot: &str) -> Vec<&ContentNode> {
        self.nodes
            .iter()
            .filter(|node| node.slot() == Some(slot))
            .collect()
    }

    /// First field value supplied for `slot`, searching depth-first.
    pub fn slot_value(&self, slot: &str) -> Option<FieldValue> {
        let mut tagged = Vec::new();
        self.walk(|node| {
            if node.slot() == Some(slot) {
                tagged.push(node);
            }
        });
        tagged.into_iter().find_map(ContentNode::first_value)
    }

    /// Every translatable leaf in document order.
    pub fn translatable_leaves(&self) -> Vec<Arc<TranslatableText>> {
        let mut leaves = Vec::new();
        self.walk(|node| {
            if let ContentNode::Translatable(leaf) = node {
                leaves.push(Arc::clone(leaf));
            }
        });
        leaves
    }
}
