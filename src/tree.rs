//! Named trees with a payload per node
//!
//! One tree type carries every stage of calendar resolution (calendar
//! definitions, year-bound calendars, computed days). Stages are derived
//! from each other with structure-preserving maps, so every derived tree
//! has the same node names, child order and child count as its source.

use serde::{Deserialize, Serialize};

/// A named node with content and ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree<T> {
    name: String,
    content: T,
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    children: Vec<Tree<T>>,
}

impl<T> Tree<T> {
    pub fn new(name: impl Into<String>, content: T) -> Self {
        Self {
            name: name.into(),
            content,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Tree<T>>) -> Self {
        self.children = children;
        self
    }

    /// Append a child after the existing ones
    pub fn push(&mut self, child: Tree<T>) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn children(&self) -> &[Tree<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes, this one included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Tree::len).sum::<usize>()
    }

    /// Nodes in depth-first pre-order (document order)
    pub fn iter(&self) -> Preorder<'_, T> {
        Preorder { stack: vec![self] }
    }

    /// First node with the given name, in document order
    pub fn find(&self, name: &str) -> Option<&Tree<T>> {
        self.iter().find(|node| node.name == name)
    }

    /// Map every payload, keeping names and structure
    pub fn map<U, F>(&self, f: &mut F) -> Tree<U>
    where
        F: FnMut(&T) -> U,
    {
        Tree {
            name: self.name.clone(),
            content: f(&self.content),
            children: self.children.iter().map(|c| c.map(f)).collect(),
        }
    }

    /// Fallible [`Tree::map`]; the first error aborts the whole mapping
    pub fn try_map<U, E, F>(&self, f: &mut F) -> Result<Tree<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        let content = f(&self.content)?;
        let children = self
            .children
            .iter()
            .map(|c| c.try_map(f))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Tree {
            name: self.name.clone(),
            content,
            children,
        })
    }

    /// Map top-down, handing each node its parent's mapped payload.
    ///
    /// A parent is fully mapped before any of its children.
    pub fn try_inherit<U, E, F>(&self, parent: Option<&U>, f: &mut F) -> Result<Tree<U>, E>
    where
        F: FnMut(Option<&U>, &Tree<T>) -> Result<U, E>,
    {
        let content = f(parent, self)?;
        let children = self
            .children
            .iter()
            .map(|c| c.try_inherit(Some(&content), f))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Tree {
            name: self.name.clone(),
            content,
            children,
        })
    }

    /// Whether both trees have identical names, child order and child counts
    pub fn same_shape<U>(&self, other: &Tree<U>) -> bool {
        self.name == other.name
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }
}

/// Depth-first pre-order iterator over tree nodes
pub struct Preorder<'a, T> {
    stack: Vec<&'a Tree<T>>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a Tree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
