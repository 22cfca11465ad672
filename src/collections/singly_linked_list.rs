use core::fmt;
use core::hash::{Hash, Hasher};

cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::boxed::Box;
    } else {
        use std::boxed::Box;
    }
}

pub mod cursor;

use cursor::{Cursor, CursorConfig};

/// how an empty list renders through `Display`
pub const EMPTY_LIST_LITERAL: &str = "[[empty]]";
/// placed between two neighbouring elements when a list is rendered
pub const ELEMENT_SEPARATOR: &str = " -> ";

pub type ListResult<T> = Result<T, ListError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListError {
    /// the list holds no elements
    Empty,
    /// a cursor was advanced with nothing left to move on to
    OutOfRange,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Empty => f.write_str("list is empty"),
            ListError::OutOfRange => f.write_str("cursor is already at the last element"),
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for ListError {}

/// an owning edge of the chain, `None` marks its end
type Link<T> = Option<Box<Node<T>>>;

/// a node holding user data, it exclusively owns its successor
struct Node<T> {
    element: T,
    next: Link<T>,
}

impl<T> Node<T> {
    fn new(element: T, next: Link<T>) -> Box<Self> {
        Box::new(Self { element, next })
    }
}

/// the dummy anchor in front of the first real node. it has no slot for data
/// so it can never be mistaken for an element
struct Sentinel<T> {
    next: Link<T>,
}

/// a singly linked list built on an owned chain of nodes hanging off a
/// sentinel.
///
/// elements are compared by value. the list is not synchronised; mutation
/// takes `&mut self`, so sharing it between threads requires the caller to
/// provide exclusion (a lock around the whole list, for example).
pub struct SinglyLinkedList<T> {
    /// a sentinel node that always exists, even in empty lists
    sentinel: Sentinel<T>,
    /// the number of non-sentinel elements in the list
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    /// create an empty list, consisting of only the sentinel
    pub const fn new() -> Self {
        Self {
            sentinel: Sentinel { next: None },
            len: 0,
        }
    }

    /// get the length of the list, not including the sentinel node
    pub fn len(&self) -> usize {
        self.len
    }

    /// same as `len`
    pub fn size(&self) -> usize {
        self.len
    }

    /// returns true if nothing follows the sentinel
    pub fn is_empty(&self) -> bool {
        self.sentinel.next.is_none()
    }

    /// drop every node after the sentinel
    pub fn clear(&mut self) {
        let released = self.len;
        release_chain(self.sentinel.next.take());
        self.len = 0;
        log::trace!("cleared {} nodes from list", released);
    }

    /// attach `element` behind the current last node. always succeeds
    pub fn append(&mut self, element: T) -> bool {
        let tail = self.tail_link();
        *tail = Some(Node::new(element, None));
        self.len += 1;
        true
    }

    /// insert `element` directly after the sentinel, making it the new first
    /// element. always succeeds
    pub fn add_first(&mut self, element: T) -> bool {
        let next = self.sentinel.next.take();
        self.sentinel.next = Some(Node::new(element, next));
        self.len += 1;
        true
    }

    /// get the first element of the list after the sentinel
    ///
    /// calling this on an empty list is a contract violation and is reported
    /// as `ListError::Empty`
    pub fn first(&self) -> ListResult<&T> {
        self.sentinel
            .next
            .as_deref()
            .map(|node| &node.element)
            .ok_or(ListError::Empty)
    }

    /// detach the first node and hand back its element, or None if the list
    /// is empty
    pub fn pop_first(&mut self) -> Option<T> {
        let node = self.sentinel.next.take()?;
        let Node { element, next } = *node;
        self.sentinel.next = next;
        self.len -= 1;
        Some(element)
    }

    /// return an immutable iterator for this list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.sentinel.next.as_deref(),
            remaining: self.len,
        }
    }

    /// return an iterator handing out mutable element references. the shape
    /// of the chain cannot be changed through it
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.sentinel.next.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// return a cursor positioned on the sentinel, failing when advanced
    /// past the end
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self, CursorConfig::default())
    }

    /// return a cursor positioned on the sentinel using the provided config
    pub fn cursor_with(&self, config: CursorConfig) -> Cursor<'_, T> {
        Cursor::new(self, config)
    }

    /// the empty link after the last node (the sentinel's own link when the
    /// list is empty)
    fn tail_link(&mut self) -> &mut Link<T> {
        let mut link = &mut self.sentinel.next;
        while let Some(node) = link {
            link = &mut node.next;
        }
        link
    }

    /// unlink the node at `position`, counted from the first real node
    fn unlink_at(&mut self, position: usize) -> Option<T> {
        let mut link = &mut self.sentinel.next;
        for _ in 0..position {
            match link {
                Some(node) => link = &mut node.next,
                None => return None,
            }
        }
        let node = link.take()?;
        let Node { element, next } = *node;
        *link = next;
        self.len -= 1;
        Some(element)
    }
}

impl<T: PartialEq> SinglyLinkedList<T> {
    /// position of the first element equal to `element`, or None if there is
    /// no such element
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == element)
    }

    /// returns true if any element equals `element`
    pub fn contains(&self, element: &T) -> bool {
        self.index_of(element).is_some()
    }

    /// splice `element` in right after the first element equal to `mark`.
    /// returns false, leaving the list untouched, if `mark` is absent
    pub fn insert_after(&mut self, mark: &T, element: T) -> bool {
        let mut link = &mut self.sentinel.next;
        while let Some(node) = link {
            if node.element == *mark {
                let next = node.next.take();
                node.next = Some(Node::new(element, next));
                self.len += 1;
                return true;
            }
            link = &mut node.next;
        }
        false
    }

    /// unlink the first element equal to `element`. returns false if there
    /// was nothing to remove
    pub fn remove(&mut self, element: &T) -> bool {
        self.sweep(element, Some(1)) == 1
    }

    /// unlink every element equal to `element`. returns true if at least one
    /// was removed
    pub fn remove_all(&mut self, element: &T) -> bool {
        self.remove_every(element) > 0
    }

    /// unlink every element equal to `element`, returning how many went
    pub fn remove_every(&mut self, element: &T) -> usize {
        let removed = self.sweep(element, None);
        log::trace!("removed {} matching nodes from list", removed);
        removed
    }

    /// drop every element that equals an element in front of it. the first
    /// occurrence of each value survives and survivors keep their order
    pub fn deduplicate(&mut self) {
        if self.len < 2 {
            return;
        }

        let before = self.len;
        // the first node can never repeat an earlier one
        let mut position = 1;
        while position < self.len {
            if self.repeats_earlier(position) {
                self.unlink_at(position);
            } else {
                position += 1;
            }
        }
        log::trace!("deduplicate released {} nodes", before - self.len);
    }

    /// does the element at `position` equal one of the elements kept before it
    fn repeats_earlier(&self, position: usize) -> bool {
        match self.iter().nth(position) {
            Some(candidate) => self.iter().take(position).any(|kept| kept == candidate),
            None => false,
        }
    }

    /// walk the chain once, unlinking nodes equal to `element` until `limit`
    /// of them are gone
    fn sweep(&mut self, element: &T, limit: Option<usize>) -> usize {
        let mut removed = 0;
        let mut link = &mut self.sentinel.next;
        while limit.map_or(true, |limit| removed < limit) {
            let doomed = match link.as_deref() {
                Some(node) => node.element == *element,
                None => break,
            };

            if doomed {
                if let Some(node) = link.take() {
                    *link = node.next;
                    removed += 1;
                }
            } else if let Some(node) = link {
                link = &mut node.next;
            }
        }
        self.len -= removed;
        removed
    }
}

/// drop a detached chain one node at a time, a recursive `Box` drop would
/// blow the stack on long lists
fn release_chain<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        release_chain(self.sentinel.next.take());
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }

        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }

        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: Hash> Hash for SinglyLinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for element in self.iter() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Display> fmt::Display for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elements = self.iter();
        match elements.next() {
            None => f.write_str(EMPTY_LIST_LITERAL),
            Some(first) => {
                write!(f, "{}", first)?;
                for element in elements {
                    write!(f, "{}{}", ELEMENT_SEPARATOR, element)?;
                }
                Ok(())
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut added = 0;
        let mut link = self.tail_link();
        for element in iter {
            let node = link.insert(Node::new(element, None));
            link = &mut node.next;
            added += 1;
        }
        self.len += added;
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SinglyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

pub struct IntoIter<T>(SinglyLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod test {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn list_of(elements: &[u32]) -> SinglyLinkedList<u32> {
        elements.iter().copied().collect()
    }

    fn contents(ll: &SinglyLinkedList<u32>) -> Vec<u32> {
        ll.iter().copied().collect()
    }

    fn hash_of<H: Hash>(h: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        h.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn linked_lists_are_sendable() {
        fn send<S: Send>(_: S) {}
        send(SinglyLinkedList::<u32>::new());
    }

    #[test]
    fn new_list_is_empty() {
        let ll = SinglyLinkedList::<u32>::new();
        assert!(ll.is_empty());
        assert_eq!(ll.size(), 0);
        assert_eq!(ll.len(), 0);
    }

    #[test]
    fn first_on_empty_list_is_an_error() {
        let ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.first(), Err(ListError::Empty));
    }

    #[test]
    fn can_append() {
        let mut ll = SinglyLinkedList::new();
        assert!(ll.append(73));
        assert_eq!(ll.len(), 1);
        assert!(ll.append(42));
        assert_eq!(ll.len(), 2);
        assert_eq!(contents(&ll), vec![73, 42]);
    }

    #[test]
    fn can_add_first() {
        let mut ll = SinglyLinkedList::new();
        assert!(ll.add_first(73));
        assert!(ll.add_first(42));
        assert_eq!(ll.len(), 2);
        assert_eq!(contents(&ll), vec![42, 73]);
    }

    #[test]
    fn first_after_append_returns_head() {
        let mut ll = SinglyLinkedList::new();
        ll.append(73);
        ll.append(42);
        assert_eq!(ll.first(), Ok(&73));
    }

    #[test]
    fn first_after_add_first_returns_new_head() {
        let mut ll = list_of(&[1, 2]);
        ll.add_first(0);
        assert_eq!(ll.first(), Ok(&0));
    }

    #[test]
    fn is_empty_is_only_true_when_no_elements() {
        let mut ll = SinglyLinkedList::new();
        assert!(ll.is_empty());
        ll.append(73);
        assert!(!ll.is_empty());
        assert!(ll.remove(&73));
        assert!(ll.is_empty());
        assert_eq!(ll.size(), 0);
    }

    #[test]
    fn clear_releases_everything() {
        let mut ll = list_of(&[1, 2, 3]);
        ll.clear();
        assert!(ll.is_empty());
        assert_eq!(ll.len(), 0);
        assert_eq!(ll.first(), Err(ListError::Empty));

        // the sentinel survives a clear
        ll.append(4);
        assert_eq!(contents(&ll), vec![4]);
    }

    #[test]
    fn index_of_finds_first_match() {
        let ll = list_of(&[5, 6, 7, 6]);
        assert_eq!(ll.index_of(&5), Some(0));
        assert_eq!(ll.index_of(&6), Some(1));
        assert_eq!(ll.index_of(&7), Some(2));
        assert_eq!(ll.index_of(&8), None);
    }

    #[test]
    fn index_of_on_empty_list_returns_none() {
        let ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.index_of(&0), None);
        assert!(!ll.contains(&0));
    }

    #[test]
    fn contains_agrees_with_index_of() {
        let ll = list_of(&[5, 6, 7]);
        assert!(ll.contains(&6));
        assert!(!ll.contains(&60));
    }

    #[test]
    fn insert_after_splices_behind_mark() {
        let mut ll = list_of(&[1, 2, 3]);
        assert!(ll.insert_after(&2, 9));
        assert_eq!(contents(&ll), vec![1, 2, 9, 3]);
        assert_eq!(ll.len(), 4);
    }

    #[test]
    fn insert_after_last_element_becomes_tail() {
        let mut ll = list_of(&[1, 2]);
        assert!(ll.insert_after(&2, 3));
        assert_eq!(contents(&ll), vec![1, 2, 3]);
        ll.append(4);
        assert_eq!(contents(&ll), vec![1, 2, 3, 4]);
    }

    #[test]
    fn insert_after_uses_first_matching_mark() {
        let mut ll = list_of(&[1, 2, 1]);
        assert!(ll.insert_after(&1, 7));
        assert_eq!(contents(&ll), vec![1, 7, 2, 1]);
    }

    #[test]
    fn insert_after_missing_mark_changes_nothing() {
        let mut ll = list_of(&[1, 2, 3]);
        assert!(!ll.insert_after(&42, 9));
        assert_eq!(contents(&ll), vec![1, 2, 3]);
        assert_eq!(ll.len(), 3);

        let mut empty = SinglyLinkedList::new();
        assert!(!empty.insert_after(&42, 9));
        assert!(empty.is_empty());
    }

    #[test]
    fn remove_unlinks_first_match_only() {
        let mut ll = list_of(&[1, 2, 1, 3]);
        assert!(ll.remove(&1));
        assert_eq!(contents(&ll), vec![2, 1, 3]);
        assert_eq!(ll.len(), 3);
    }

    #[test]
    fn remove_can_take_head_middle_and_tail() {
        let mut ll = list_of(&[1, 2, 3, 4]);
        assert!(ll.remove(&1));
        assert!(ll.remove(&3));
        assert!(ll.remove(&4));
        assert_eq!(contents(&ll), vec![2]);
        ll.append(5);
        assert_eq!(contents(&ll), vec![2, 5]);
    }

    #[test]
    fn remove_missing_element_reports_failure() {
        let mut ll = list_of(&[1, 2, 3]);
        assert!(!ll.remove(&42));
        assert_eq!(contents(&ll), vec![1, 2, 3]);

        let mut empty = SinglyLinkedList::<u32>::new();
        assert!(!empty.remove(&42));
    }

    #[test]
    fn remove_all_clears_every_match() {
        let x = 9;
        let mut ll = list_of(&[x, 1, x, x, 2]);
        assert!(ll.remove_all(&x));
        assert_eq!(contents(&ll), vec![1, 2]);
        assert_eq!(ll.len(), 2);
    }

    #[test]
    fn remove_all_without_match_reports_failure() {
        let mut ll = list_of(&[1, 2, 3]);
        assert!(!ll.remove_all(&9));
        assert_eq!(contents(&ll), vec![1, 2, 3]);
    }

    #[test]
    fn remove_all_can_empty_the_list() {
        let mut ll = list_of(&[4, 4, 4]);
        assert!(ll.remove_all(&4));
        assert!(ll.is_empty());
        assert_eq!(ll.to_string(), EMPTY_LIST_LITERAL);
    }

    #[test]
    fn remove_every_counts_removals() {
        let mut ll = list_of(&[3, 1, 3, 2, 3]);
        assert_eq!(ll.remove_every(&3), 3);
        assert_eq!(ll.remove_every(&3), 0);
        assert_eq!(contents(&ll), vec![1, 2]);
    }

    #[test]
    fn pop_first_returns_elements_in_order() {
        let mut ll = list_of(&[1, 2]);
        assert_eq!(ll.pop_first(), Some(1));
        assert_eq!(ll.len(), 1);
        assert_eq!(ll.pop_first(), Some(2));
        assert_eq!(ll.pop_first(), None);
        assert!(ll.is_empty());
    }

    #[test]
    fn deduplicate_keeps_first_occurrences_in_order() {
        let (a, b, c) = (1, 2, 3);
        let mut ll = list_of(&[a, b, a, c, b]);
        ll.deduplicate();
        assert_eq!(contents(&ll), vec![a, b, c]);
        assert_eq!(ll.len(), 3);
    }

    #[test]
    fn deduplicate_handles_adjacent_duplicates_at_tail() {
        let mut ll = list_of(&[1, 2, 2]);
        ll.deduplicate();
        assert_eq!(contents(&ll), vec![1, 2]);
        ll.append(3);
        assert_eq!(contents(&ll), vec![1, 2, 3]);
    }

    #[test]
    fn deduplicate_collapses_uniform_list() {
        let mut ll = list_of(&[7, 7, 7, 7]);
        ll.deduplicate();
        assert_eq!(contents(&ll), vec![7]);
        assert_eq!(ll.len(), 1);
    }

    #[test]
    fn deduplicate_on_short_lists_is_noop() {
        let mut empty = SinglyLinkedList::<u32>::new();
        empty.deduplicate();
        assert!(empty.is_empty());

        let mut single = list_of(&[1]);
        single.deduplicate();
        assert_eq!(contents(&single), vec![1]);
    }

    #[test]
    fn deduplicate_is_idempotent() {
        let mut ll = list_of(&[3, 1, 3, 2, 1, 1, 4]);
        ll.deduplicate();
        let once = contents(&ll);
        ll.deduplicate();
        assert_eq!(contents(&ll), once);
        assert_eq!(once, vec![3, 1, 2, 4]);
    }

    #[test]
    fn add_first_then_remove_restores_list() {
        let mut ll = list_of(&[1, 2, 3]);
        let before = ll.clone();
        ll.add_first(0);
        assert!(ll.remove(&0));
        assert_eq!(ll, before);
        assert_eq!(ll.len(), before.len());
    }

    #[test]
    fn empty_lists_are_equal() {
        let a = SinglyLinkedList::<u32>::new();
        let b = SinglyLinkedList::<u32>::new();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn empty_and_non_empty_lists_are_never_equal() {
        let empty = SinglyLinkedList::new();
        let full = list_of(&[1]);
        assert_ne!(empty, full);
        assert_ne!(full, empty);
    }

    #[test]
    #[allow(clippy::eq_op)]
    fn equality_is_reflexive_and_symmetric() {
        let a = list_of(&[1, 2, 3]);
        let b = list_of(&[1, 2, 3]);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn lists_of_different_length_are_not_equal() {
        let a = list_of(&[1, 2, 3]);
        let b = list_of(&[1, 2]);
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn lists_with_different_elements_are_not_equal() {
        assert_ne!(list_of(&[1, 2, 3]), list_of(&[1, 5, 3]));
        assert_ne!(list_of(&[1, 2, 3]), list_of(&[3, 2, 1]));
    }

    #[test]
    fn equal_lists_hash_equal() {
        let a = list_of(&[1, 2, 3]);
        let mut b = list_of(&[2, 3]);
        b.add_first(1);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn lists_work_as_hash_set_members() {
        let mut set = std::collections::HashSet::new();
        assert!(set.insert(list_of(&[1, 2])));
        assert!(!set.insert(list_of(&[1, 2])));
        assert!(set.insert(list_of(&[2, 1])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_list_displays_literal() {
        let ll = SinglyLinkedList::<u32>::new();
        assert_eq!(ll.to_string(), "[[empty]]");
    }

    #[test]
    fn display_joins_with_arrows() {
        assert_eq!(list_of(&[1, 2, 3]).to_string(), "1 -> 2 -> 3");
        assert_eq!(list_of(&[1]).to_string(), "1");
    }

    #[test]
    fn display_works_for_strings() {
        let ll: SinglyLinkedList<&str> = ["peter", "paul", "mary"].into_iter().collect();
        assert_eq!(ll.to_string(), "peter -> paul -> mary");
    }

    #[test]
    fn debug_lists_elements() {
        assert_eq!(format!("{:?}", list_of(&[1, 2])), "[1, 2]");
    }

    #[test]
    fn clone_is_independent() {
        let a = list_of(&[1, 2, 3]);
        let mut b = a.clone();
        b.append(4);
        assert_eq!(contents(&a), vec![1, 2, 3]);
        assert_eq!(contents(&b), vec![1, 2, 3, 4]);
    }

    #[test]
    fn extend_appends_in_order() {
        let mut ll = list_of(&[1]);
        ll.extend([2, 3]);
        assert_eq!(contents(&ll), vec![1, 2, 3]);
        assert_eq!(ll.len(), 3);
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(ListError::Empty.to_string(), "list is empty");
        assert_eq!(
            ListError::OutOfRange.to_string(),
            "cursor is already at the last element"
        );
    }

    #[test]
    fn dropping_a_long_list_does_not_overflow() {
        let ll: SinglyLinkedList<u32> = (0..200_000).collect();
        assert_eq!(ll.len(), 200_000);
        drop(ll);
    }

    #[test]
    fn smoke_test() {
        #[derive(Clone, Debug, PartialEq)]
        struct MyTestStruct {
            i: i32,
            name: &'static str,
        }

        let ms1 = MyTestStruct {
            i: 1,
            name: "peter",
        };
        let ms2 = MyTestStruct { i: 2, name: "paul" };
        let ms3 = MyTestStruct { i: 3, name: "mary" };

        let mut ll = SinglyLinkedList::new();
        ll.append(ms2.clone());
        ll.add_first(ms1.clone());
        ll.insert_after(&ms2, ms3.clone());
        ll.append(ms1.clone());
        assert_eq!(ll.len(), 4);
        assert_eq!(ll.index_of(&ms3), Some(2));

        ll.deduplicate();
        assert_eq!(ll.len(), 3);
        assert_eq!(ll.first(), Ok(&ms1));

        assert!(ll.remove(&ms2));
        assert!(!ll.remove(&ms2));
        assert_eq!(ll.index_of(&ms3), Some(1));

        ll.clear();
        assert_eq!(ll.first(), Err(ListError::Empty));
    }
}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use std::collections::hash_map::DefaultHasher;

    use proptest::collection::{btree_set, vec};
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_derive::Arbitrary;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};
    use rand::Rng;

    use super::*;

    fn first_occurrences(values: &[u32]) -> Vec<u32> {
        let mut kept = Vec::new();
        for value in values {
            if !kept.contains(value) {
                kept.push(*value);
            }
        }
        kept
    }

    fn hash_of<H: Hash>(h: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        h.hash(&mut hasher);
        hasher.finish()
    }

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            verbose: 1,
            .. Config::default()
        })]

        #[test]
        fn singly_linked_list_state_machine_test(
            sequential
            100..500
            =>
            SinglyLinkedList<u32>
        );
    }

    /// The possible transitions of the state machine. Values are drawn from a
    /// small range so that searches hit existing elements often.
    #[derive(Clone, Debug)]
    pub enum Transition {
        Append(u32),
        AddFirst(u32),
        InsertAfter(u32, u32),
        Remove(u32),
        RemoveAll(u32),
        PopFirst,
        Deduplicate,
        Clear,
    }

    pub struct SinglyLinkedListStateMachine;

    impl ReferenceStateMachine for SinglyLinkedListStateMachine {
        type State = Vec<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Vec::new()).boxed()
        }

        fn transitions(_state: &Self::State) -> BoxedStrategy<Self::Transition> {
            prop_oneof![
                4 => (0..8u32).prop_map(Transition::Append),
                3 => (0..8u32).prop_map(Transition::AddFirst),
                2 => (0..8u32, 0..8u32).prop_map(|(mark, v)| Transition::InsertAfter(mark, v)),
                2 => (0..8u32).prop_map(Transition::Remove),
                1 => (0..8u32).prop_map(Transition::RemoveAll),
                1 => Just(Transition::PopFirst),
                1 => Just(Transition::Deduplicate),
                1 => Just(Transition::Clear),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::Append(value) => state.push(*value),
                Transition::AddFirst(value) => state.insert(0, *value),
                Transition::InsertAfter(mark, value) => {
                    if let Some(i) = state.iter().position(|v| v == mark) {
                        state.insert(i + 1, *value);
                    }
                }
                Transition::Remove(value) => {
                    if let Some(i) = state.iter().position(|v| v == value) {
                        state.remove(i);
                    }
                }
                Transition::RemoveAll(value) => state.retain(|v| v != value),
                Transition::PopFirst => {
                    if !state.is_empty() {
                        state.remove(0);
                    }
                }
                Transition::Deduplicate => state = first_occurrences(&state),
                Transition::Clear => state.clear(),
            }
            state
        }
    }

    impl StateMachineTest for SinglyLinkedList<u32> {
        type SystemUnderTest = Self;
        type Reference = SinglyLinkedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            match transition {
                Transition::Append(value) => assert!(state.append(value)),
                Transition::AddFirst(value) => assert!(state.add_first(value)),
                Transition::InsertAfter(mark, value) => {
                    let expected = state.contains(&mark);
                    assert_eq!(state.insert_after(&mark, value), expected);
                }
                Transition::Remove(value) => {
                    let expected = state.contains(&value);
                    assert_eq!(state.remove(&value), expected);
                }
                Transition::RemoveAll(value) => {
                    let expected = state.contains(&value);
                    assert_eq!(state.remove_all(&value), expected);
                    assert!(!state.contains(&value));
                }
                Transition::PopFirst => {
                    let expected = state.first().ok().copied();
                    assert_eq!(state.pop_first(), expected);
                }
                Transition::Deduplicate => state.deduplicate(),
                Transition::Clear => state.clear(),
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.is_empty(), ref_state.is_empty());
            assert_eq!(state.first().ok(), ref_state.first());
            assert!(state.iter().eq(ref_state.iter()));
        }
    }

    #[derive(Arbitrary, Debug)]
    enum Operation {
        Append(u8),
        AddFirst(u8),
        InsertAfterExisting(u8),
        RemoveExisting,
        Deduplicate,
        Locate,
    }

    fn get_random(reference: &[u32]) -> Option<u32> {
        if reference.is_empty() {
            return None;
        }

        let index = rand::thread_rng().gen_range(0..reference.len());
        reference.get(index).copied()
    }

    proptest! {
        #[test]
        fn longform(ops in vec(any::<Operation>(), 256)) {
            let mut reference: Vec<u32> = Vec::new();
            let mut ll = SinglyLinkedList::new();

            for op in ops.iter() {
                match op {
                    Operation::Append(v) => {
                        reference.push(u32::from(*v));
                        ll.append(u32::from(*v));
                    }
                    Operation::AddFirst(v) => {
                        reference.insert(0, u32::from(*v));
                        ll.add_first(u32::from(*v));
                    }
                    Operation::InsertAfterExisting(v) => {
                        if let Some(mark) = get_random(&reference) {
                            let i = reference.iter().position(|r| *r == mark).unwrap();
                            reference.insert(i + 1, u32::from(*v));
                            prop_assert!(ll.insert_after(&mark, u32::from(*v)));
                        }
                    }
                    Operation::RemoveExisting => {
                        if let Some(to_remove) = get_random(&reference) {
                            let i = reference.iter().position(|r| *r == to_remove).unwrap();
                            reference.remove(i);
                            prop_assert!(ll.remove(&to_remove));
                        }
                    }
                    Operation::Deduplicate => {
                        reference = first_occurrences(&reference);
                        ll.deduplicate();
                    }
                    Operation::Locate => {
                        if let Some(to_find) = get_random(&reference) {
                            prop_assert_eq!(
                                ll.index_of(&to_find),
                                reference.iter().position(|r| *r == to_find)
                            );
                        }
                    }
                }
                prop_assert_eq!(ll.len(), reference.len());
            }

            prop_assert!(ll.iter().eq(reference.iter()));
        }

        #[test]
        fn appended_distinct_values_are_indexed_in_order(values in btree_set(any::<u32>(), 0..64)) {
            let values: Vec<u32> = values.into_iter().collect();
            let mut ll = SinglyLinkedList::new();
            for v in values.iter() {
                ll.append(*v);
            }

            prop_assert_eq!(ll.size(), values.len());
            prop_assert_eq!(ll.is_empty(), values.is_empty());
            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(ll.index_of(v), Some(i));
            }
        }

        #[test]
        fn deduplicate_matches_first_occurrences(values in vec(0..16u32, 0..64)) {
            let mut ll: SinglyLinkedList<u32> = values.iter().copied().collect();
            ll.deduplicate();
            let once: Vec<u32> = ll.iter().copied().collect();
            prop_assert_eq!(&once, &first_occurrences(&values));
            prop_assert_eq!(ll.len(), once.len());

            ll.deduplicate();
            prop_assert!(ll.iter().eq(once.iter()));
        }

        #[test]
        fn equal_lists_hash_equal(values in vec(any::<u32>(), 0..32)) {
            let a: SinglyLinkedList<u32> = values.iter().copied().collect();
            let b: SinglyLinkedList<u32> = values.iter().copied().collect();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&b, &a);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn add_first_then_remove_round_trips(values in vec(0..16u32, 0..32), x in 16..32u32) {
            let mut ll: SinglyLinkedList<u32> = values.iter().copied().collect();
            let before = ll.clone();
            prop_assert!(ll.add_first(x));
            prop_assert!(ll.remove(&x));
            prop_assert_eq!(ll, before);
        }

        #[test]
        fn display_has_no_trailing_separator(values in vec(any::<u32>(), 1..16)) {
            let ll: SinglyLinkedList<u32> = values.iter().copied().collect();
            let expected = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(ELEMENT_SEPARATOR);
            prop_assert_eq!(ll.to_string(), expected);
        }
    }
}
