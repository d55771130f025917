//! Document outline (bookmarks).
//!
//! Outline entries live in the document registry like any other object.
//! Parent, child and sibling links are object ids, the registry owns the
//! nodes.

use crate::{
    document::Document,
    error::KilnError,
    object::{Extension, ObjectKind},
    pdf::{
        dict_types, Dictionary, Name, Object, ObjectId, K_COLOR, K_COUNT, K_DEST, K_FIRST, K_FLAGS, K_LAST, K_NEXT,
        K_PARENT, K_PREV, K_TITLE,
    },
};

/// Tree links and visible-descendant count of an outline entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineNode {
    open_entries: bool,
    parent: Option<ObjectId>,
    first: Option<ObjectId>,
    last: Option<ObjectId>,
    prev: Option<ObjectId>,
    next: Option<ObjectId>,
    count: i32,
}

impl OutlineNode {
    pub fn open_entries(&self) -> bool {
        self.open_entries
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<ObjectId> {
        self.first
    }

    pub fn last_child(&self) -> Option<ObjectId> {
        self.last
    }

    pub fn prev_sibling(&self) -> Option<ObjectId> {
        self.prev
    }

    pub fn next_sibling(&self) -> Option<ObjectId> {
        self.next
    }

    /// Number of visible descendants. Negative if this entry is closed, then
    /// the magnitude is the number of children that would become visible.
    pub fn visible_count(&self) -> i32 {
        self.count
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn decorate(&self, dict: &mut Dictionary) {
        if let (Some(first), Some(last)) = (self.first, self.last) {
            dict.insert(K_FIRST, first);
            dict.insert(K_LAST, last);
        }
        if self.count != 0 {
            dict.insert(K_COUNT, self.count);
        }
        if !self.is_root() {
            if let Some(prev) = self.prev {
                dict.insert(K_PREV, prev);
            }
            if let Some(next) = self.next {
                dict.insert(K_NEXT, next);
            }
        }
    }
}

/// Jump target of an outline entry: a position on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    pub page: ObjectId,
    pub x: f64,
    pub y: f64,
    /// 0 keeps the current zoom.
    pub zoom: f64,
}

impl Destination {
    pub fn new(page: ObjectId, x: f64, y: f64) -> Self {
        Self { page, x, y, zoom: 0.0 }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineStyle {
    pub italic: bool,
    pub bold: bool,
}

impl OutlineStyle {
    pub fn flags(self) -> i64 {
        i64::from(self.italic) | i64::from(self.bold) << 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn to_array(self) -> Vec<Object> {
        [self.0, self.1, self.2]
            .iter()
            .map(|&c| Object::Real(f64::from(c) / 255.0))
            .collect()
    }
}

/// Everything needed to add one entry to the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    title: String,
    destination: Destination,
    color: Option<Rgb>,
    style: OutlineStyle,
    open_entries: bool,
}

impl OutlineEntry {
    pub fn new(title: impl Into<String>, destination: Destination) -> Self {
        Self {
            title: title.into(),
            destination,
            color: None,
            style: OutlineStyle::default(),
            open_entries: true,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn style(mut self, style: OutlineStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether the children of this entry are shown expanded.
    pub fn open(mut self, open_entries: bool) -> Self {
        self.open_entries = open_entries;
        self
    }
}

impl Document {
    /// Creates the outline root that the catalog refers to.
    pub fn create_outline_root(&mut self) -> Result<ObjectId, KilnError> {
        if self.outline_root.is_some() {
            return Err(KilnError::OutlineRootExists);
        }

        let root = OutlineNode {
            open_entries: true,
            ..OutlineNode::default()
        };
        let id = self.register(
            ObjectKind::Dictionary,
            Some(dict_types::OUTLINES),
            None,
            Extension::Outline(root),
        );
        self.outline_root = Some(id);
        log::debug!("created outline root {}", id.number());

        Ok(id)
    }

    pub fn outline_root(&self) -> Option<ObjectId> {
        self.outline_root
    }

    pub fn outline_node(&self, id: ObjectId) -> Option<&OutlineNode> {
        match &self.object(id)?.extension {
            Extension::Outline(node) => Some(node),
            _ => None,
        }
    }

    fn outline_node_mut(&mut self, id: ObjectId) -> Result<&mut OutlineNode, KilnError> {
        let number = id.number();
        let object = self.object_mut(id).ok_or(KilnError::UnknownObject { number })?;
        if object.is_written() {
            return Err(KilnError::AlreadyWritten { number });
        }
        match &mut object.extension {
            Extension::Outline(node) => Ok(node),
            _ => Err(KilnError::NotAnOutlineEntry { number }),
        }
    }

    /// Appends a new entry as last child of `parent`.
    ///
    /// Updates the visible counts: an open parent counts one more visible
    /// entry, and so does every ancestor up to the first closed one. A closed
    /// parent only counts one more hidden child.
    pub fn add_outline_entry(&mut self, parent: ObjectId, entry: OutlineEntry) -> Result<ObjectId, KilnError> {
        let (parent_open, previous_last) = {
            let node = self.outline_node_mut(parent)?;
            (node.open_entries, node.last)
        };
        // nothing is registered unless every node that gets relinked accepts changes
        if let Some(previous) = previous_last {
            self.outline_node_mut(previous)?;
        }

        let node = OutlineNode {
            open_entries: entry.open_entries,
            parent: Some(parent),
            prev: previous_last,
            ..OutlineNode::default()
        };
        let scale = self.config().scale;
        let id = self.register(ObjectKind::Dictionary, None, None, Extension::Outline(node));
        fill_entry(self.dictionary_mut(id)?, parent, &entry, scale);

        if let Some(previous) = previous_last {
            self.outline_node_mut(previous)?.next = Some(id);
        }
        let parent_node = self.outline_node_mut(parent)?;
        if parent_node.first.is_none() {
            parent_node.first = Some(id);
        }
        parent_node.last = Some(id);

        if parent_open {
            let mut current = Some(parent);
            while let Some(ancestor) = current {
                let node = self.outline_node_mut(ancestor)?;
                if !node.open_entries {
                    break;
                }
                node.count += 1;
                current = node.parent;
            }
        } else {
            self.outline_node_mut(parent)?.count -= 1;
        }

        log::trace!("added outline entry {} `{}` below {}", id.number(), entry.title, parent.number());
        Ok(id)
    }

    /// Follows `path` down from `from`, one child index per level.
    ///
    /// An empty path yields `from` itself.
    pub fn outline_child(&self, from: ObjectId, path: &[usize]) -> Option<ObjectId> {
        let mut current = from;
        for &index in path {
            let mut child = self.outline_node(current)?.first;
            for _ in 0..index {
                child = self.outline_node(child?)?.next;
            }
            current = child?;
        }
        Some(current)
    }
}

fn fill_entry(dict: &mut Dictionary, parent: ObjectId, entry: &OutlineEntry, scale: f64) {
    let dest = &entry.destination;
    dict.insert(K_TITLE, Object::text(&entry.title));
    dict.insert(K_PARENT, parent);
    dict.insert(
        K_DEST,
        vec![
            Object::Reference(dest.page),
            Object::Name(Name::from("XYZ")),
            Object::Real(dest.x * scale),
            Object::Real(dest.y * scale),
            Object::Real(dest.zoom),
        ],
    );
    if let Some(color) = entry.color {
        dict.insert(K_COLOR, color.to_array());
    }
    let flags = entry.style.flags();
    if flags != 0 {
        dict.insert(K_FLAGS, flags);
    }
}
