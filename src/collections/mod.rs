pub mod singly_linked_list;
