use super::{Link, ListError, ListResult, SinglyLinkedList};

/// what a cursor does when asked to advance with no successor left
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndBehavior {
    /// report `ListError::OutOfRange` and stay put
    #[default]
    Fail,
    /// hand back the last element again without moving
    RepeatLast,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorConfig {
    pub end_behavior: EndBehavior,
}

impl CursorConfig {
    /// advancing past the end is an error
    pub const fn fail_at_end() -> Self {
        Self {
            end_behavior: EndBehavior::Fail,
        }
    }

    /// advancing past the end keeps returning the last element
    pub const fn repeat_last() -> Self {
        Self {
            end_behavior: EndBehavior::RepeatLast,
        }
    }
}

/// a read-only position in a list's chain. it starts on the sentinel and can
/// only move forward
pub struct Cursor<'a, T> {
    /// data at the current position, None while on the sentinel
    curr: Option<&'a T>,
    /// the link leaving the current position
    next: &'a Link<T>,
    config: CursorConfig,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(ll: &'a SinglyLinkedList<T>, config: CursorConfig) -> Self {
        Self {
            curr: None,
            next: &ll.sentinel.next,
            config,
        }
    }

    /// get the data of the current node or None if the current node is the
    /// sentinel
    pub fn current(&self) -> Option<&'a T> {
        self.curr
    }

    /// returns true if the current position has a successor
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn config(&self) -> CursorConfig {
        self.config
    }

    /// return the data at the current position, then move forward one node.
    /// the sentinel has no data, so the first call hands back `None`.
    ///
    /// on the last node there is nowhere to go. depending on the configured
    /// `EndBehavior` this either fails with `ListError::OutOfRange` or
    /// returns the last element again without moving
    pub fn advance(&mut self) -> ListResult<Option<&'a T>> {
        let next: &'a Link<T> = self.next;
        match next.as_deref() {
            Some(node) => {
                let to_return = self.curr;
                self.curr = Some(&node.element);
                self.next = &node.next;
                Ok(to_return)
            }
            None => match self.config.end_behavior {
                EndBehavior::Fail => Err(ListError::OutOfRange),
                EndBehavior::RepeatLast => {
                    log::warn!(
                        "cursor already at last element; returning its data without moving"
                    );
                    Ok(self.curr)
                }
            },
        }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            curr: self.curr,
            next: self.next,
            config: self.config,
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("curr", &self.curr)
            .field("has_next", &self.has_next())
            .field("config", &self.config)
            .finish()
    }
}
