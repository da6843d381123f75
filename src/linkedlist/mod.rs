mod rwlock;

pub use rwlock::RwLockList;

use crate::set::SequentialSet;

// sorted singly linked list, ascending from head without duplicates
pub struct SortedList<K> {
    head: Link<K>,
    len: usize,
}

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    next: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K, next: Link<K>) -> Node<K> {
        Node { key, next }
    }
}

impl<K: Ord> SortedList<K> {
    /// Return the first link whose node key is not less than `key`.
    fn find_link<'l>(mut link: &'l mut Link<K>, key: &K) -> &'l mut Link<K> {
        loop {
            let ahead = match link.as_deref() {
                Some(node) => node.key < *key,
                None => return link,
            };

            if !ahead {
                return link;
            }

            link = match link {
                Some(node) => &mut node.next,
                None => unreachable!(),
            };
        }
    }
}

impl<K> SortedList<K> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut current = self.head.as_deref();

        while let Some(node) = current {
            keys.push(&node.key);
            current = node.next.as_deref();
        }

        keys
    }
}

impl<K: Ord> SequentialSet<K> for SortedList<K> {
    fn new() -> SortedList<K> {
        SortedList { head: None, len: 0 }
    }

    fn insert(&mut self, key: K) -> bool {
        let link = Self::find_link(&mut self.head, &key);

        if let Some(node) = link.as_deref() {
            if node.key == key {
                return false;
            }
        }

        let next = link.take();
        *link = Some(Box::new(Node::new(key, next)));
        self.len += 1;

        true
    }

    fn search(&self, key: &K) -> bool {
        let mut current = self.head.as_deref();

        while let Some(node) = current {
            if node.key >= *key {
                return node.key == *key;
            }

            current = node.next.as_deref();
        }

        false
    }

    fn remove(&mut self, key: &K) -> bool {
        let link = Self::find_link(&mut self.head, key);

        match link.take() {
            Some(mut node) if node.key == *key => {
                *link = node.next.take();
                self.len -= 1;
                true
            }
            other => {
                *link = other;
                false
            }
        }
    }
}

impl<K> Drop for SortedList<K> {
    fn drop(&mut self) {
        let mut node = self.head.take();

        while let Some(mut inside) = node {
            node = inside.next.take();
        }
    }
}
