//! A singly linked list that flattens its nodes onto a Vec for storage. Nodes
//! are addressed by their position in the Vec, and the slots of removed nodes
//! are freelisted and handed out again on the next insertion.
//!
//! Each bucket of a [`HashTable`](crate::HashTable) is one of these.

use std::{fmt, iter::FromIterator, mem};

use crate::error::{Error, Result};

/// Alias for the index of a node in the linked list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeHandle(usize);

/// A node that lives in a linked list.
#[derive(Clone)]
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The index of the next node in the list, or None for the tail.
    next: Option<NodeHandle>,
}

/// An ordered sequence with O(1) append and prepend, positional access, and
/// predicate search. The list owns every value stored in it.
#[derive(Clone)]
pub struct LinkedList<T> {
    /// Slots holding the nodes in the list. Free slots are None.
    store: Vec<Option<Node<T>>>,

    /// Slots in the store which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The first node in the list.
    head: Option<NodeHandle>,

    /// The last node in the list.
    tail: Option<NodeHandle>,

    /// The number of nodes reachable from head.
    size: usize,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty linked list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new linked list with room for `capacity` nodes before the
    /// storage has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            size: 0,
        }
    }

    /// The length of this linked list. This is a tracked counter, not a
    /// traversal, so it's O(1).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The first item in the list.
    pub fn head(&self) -> Option<&T> {
        self.head.and_then(|h| self.node(h)).map(|n| &n.value)
    }

    /// The last item in the list.
    pub fn tail(&self) -> Option<&T> {
        self.tail.and_then(|h| self.node(h)).map(|n| &n.value)
    }

    /// Inserts `item` after the current tail.
    pub fn append(&mut self, item: T) {
        let idx = self.alloc(Node {
            value: item,
            next: None,
        });

        if let Some(tail) = self.tail {
            if let Some(node) = self.node_mut(tail) {
                node.next = Some(idx);
            }
        } else {
            self.head = Some(idx);
        }

        self.tail = Some(idx);
        self.size += 1;

        #[cfg(test)]
        self.continuity_test();
    }

    /// Inserts `item` before the current head.
    pub fn prepend(&mut self, item: T) {
        let idx = self.alloc(Node {
            value: item,
            next: self.head,
        });

        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.head = Some(idx);
        self.size += 1;

        #[cfg(test)]
        self.continuity_test();
    }

    /// Inserts `item` so that it ends up at position `index`. Valid indices
    /// run from 0 (prepend) up to and including the length (append).
    pub fn insert_at_index(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.size {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.size,
            });
        }

        if index == 0 {
            self.prepend(item);
            return Ok(());
        }

        if index == self.size {
            self.append(item);
            return Ok(());
        }

        let prev = self.handle_at(index - 1).ok_or(Error::IndexOutOfRange {
            index,
            len: self.size,
        })?;
        let next = self.node(prev).and_then(|n| n.next);
        let idx = self.alloc(Node { value: item, next });

        if let Some(node) = self.node_mut(prev) {
            node.next = Some(idx);
        }

        self.size += 1;

        #[cfg(test)]
        self.continuity_test();

        Ok(())
    }

    /// Gets the item at `index`, counting from the head at 0.
    pub fn get_at_index(&self, index: usize) -> Result<&T> {
        let out_of_range = Error::IndexOutOfRange {
            index,
            len: self.size,
        };

        if index >= self.size {
            return Err(out_of_range);
        }

        self.iter().nth(index).ok_or(out_of_range)
    }

    /// The first item, head to tail, for which `predicate` holds.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    /// Like [`find`](Self::find), but hands back a mutable reference.
    pub fn find_mut<P>(&mut self, predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let (_, handle) = self.seek(predicate)?;
        self.node_mut(handle).map(|n| &mut n.value)
    }

    /// Removes the first item for which `predicate` holds and returns it.
    pub fn remove_first<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let (prev, handle) = self.seek(predicate)?;
        let node = self.store.get_mut(handle.0)?.take()?;

        // link prev around the node so it isn't in the chain anymore; its slot
        // gets reused at some later insertion by placing it on the freelist
        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = node.next;
                }
            }
            None => self.head = node.next,
        }

        if self.tail == Some(handle) {
            self.tail = prev;
        }

        self.size -= 1;

        if self.size == 0 {
            // nothing left to point into the store, so drop the freelist too
            self.store.clear();
            self.free.clear();
        } else {
            self.free.push(handle);
        }

        #[cfg(test)]
        self.continuity_test();

        Some(node.value)
    }

    /// Removes the head of the list if it exists.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_first(|_| true)
    }

    /// All items, head to tail.
    pub fn items(&self) -> Vec<&T> {
        self.iter().collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.size,
        }
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.size = 0;
    }

    fn node(&self, handle: NodeHandle) -> Option<&Node<T>> {
        self.store.get(handle.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<T>> {
        self.store.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Places `node` in the first free slot of the store, or at the end of it
    /// if there are none.
    fn alloc(&mut self, node: Node<T>) -> NodeHandle {
        match self.free.pop() {
            Some(handle) => {
                self.store[handle.0] = Some(node);
                handle
            }
            None => {
                self.store.push(Some(node));
                NodeHandle(self.store.len() - 1)
            }
        }
    }

    /// The handle of the node at `index`.
    fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = cursor.and_then(|h| self.node(h)).and_then(|n| n.next);
        }
        cursor
    }

    /// Walks the chain for the first node matching `predicate`, returning its
    /// handle along with the handle of the node before it.
    fn seek<P>(&self, mut predicate: P) -> Option<(Option<NodeHandle>, NodeHandle)>
    where
        P: FnMut(&T) -> bool,
    {
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(handle) = cursor {
            let node = self.node(handle)?;
            if predicate(&node.value) {
                return Some((prev, handle));
            }
            prev = Some(handle);
            cursor = node.next;
        }

        None
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;
        let mut last = None;
        let mut cursor = self.head;

        // walk the chain and make sure it matches the tracked size
        while let Some(handle) = cursor {
            let node = self.node(handle).expect("chain points at a free slot");
            count += 1;
            assert!(count <= self.size);
            last = Some(handle);
            cursor = node.next;
        }

        assert_eq!(self.size, count);
        assert_eq!(self.tail, last);
        assert_eq!(self.size, self.store.len() - self.free.len());

        if self.size == 0 {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
        }
    }
}

impl<T> LinkedList<T>
where
    T: PartialEq,
{
    /// Removes the first item equal to `item`, returning the stored value.
    pub fn delete(&mut self, item: &T) -> Result<T> {
        self.remove_first(|value| value == item)
            .ok_or(Error::ItemNotFound)
    }

    /// Swaps the value of the first node equal to `old` for `new`, keeping
    /// the node where it is. Returns the value that was replaced.
    pub fn replace(&mut self, old: &T, new: T) -> Result<T> {
        let (_, handle) =
            self.seek(|value| value == old).ok_or(Error::ItemNotFound)?;

        self.node_mut(handle)
            .map(|n| mem::replace(&mut n.value, new))
            .ok_or(Error::ItemNotFound)
    }

    /// Whether any node holds a value equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.find(|value| value == item).is_some()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> PartialEq for LinkedList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T> Eq for LinkedList<T> where T: Eq {}

impl<T> fmt::Debug for LinkedList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `[(A) --> (B) --> (C)]`.
impl<T> fmt::Display for LinkedList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " --> ")?;
            }
            write!(f, "({:?})", item)?;
        }
        write!(f, "]")
    }
}

/// Borrowing iterator over a [`LinkedList`], head to tail.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = self.list.node(handle)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// Owning iterator over a [`LinkedList`], head to tail.
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
