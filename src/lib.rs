#![cfg_attr(feature = "no-std", no_std)]

#[cfg(feature = "no-std")]
extern crate alloc;

pub mod collections;

pub use collections::singly_linked_list::{
    cursor::{Cursor, CursorConfig, EndBehavior},
    ListError, ListResult, SinglyLinkedList,
};
