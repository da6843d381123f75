mod rwlock;

pub use rwlock::RwLockBST;

use std::cmp::Ordering;

use crate::set::SequentialSet;

/// Unbalanced binary search tree.
///
/// Keys in the left subtree are smaller than the node key, keys in the right subtree are larger.
/// Every node is owned by the link of its parent (or by `root`), so unlinking a node drops it.
pub struct Tree<K> {
    root: Link<K>,
}

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K) -> Node<K> {
        Node {
            key,
            left: None,
            right: None,
        }
    }
}

impl<K: Ord> Tree<K> {
    /// Walk down to the link which holds `key`, or to the empty link where it would be attached.
    fn find_link<'t>(mut link: &'t mut Link<K>, key: &K) -> &'t mut Link<K> {
        loop {
            let ord = match link.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => return link,
            };

            link = match (ord, link) {
                (Ordering::Equal, link) => return link,
                (Ordering::Less, Some(node)) => &mut node.left,
                (Ordering::Greater, Some(node)) => &mut node.right,
                (_, None) => unreachable!(),
            };
        }
    }

    /// Detach the leftmost node of the subtree, moving its right child up into its place.
    fn unlink_leftmost(mut link: &mut Link<K>) -> Option<Box<Node<K>>> {
        loop {
            let has_left = match link.as_deref() {
                Some(node) => node.left.is_some(),
                None => return None,
            };

            if !has_left {
                break;
            }

            link = match link {
                Some(node) => &mut node.left,
                None => unreachable!(),
            };
        }

        let mut leftmost = link.take()?;
        *link = leftmost.right.take();

        Some(leftmost)
    }
}

impl<K> Tree<K> {
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&K> {
        self.root.as_ref().map(|node| &node.key)
    }

    /// Number of nodes on the longest root-to-leaf path. The empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();

        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
                .collect();
        }

        height
    }

    /// In-order traversal of the keys.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut ancestors: Vec<&Node<K>> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                ancestors.push(node);
                current = node.left.as_deref();
            }

            match ancestors.pop() {
                Some(node) => {
                    keys.push(&node.key);
                    current = node.right.as_deref();
                }
                None => return keys,
            }
        }
    }
}

impl<K: Ord> SequentialSet<K> for Tree<K> {
    fn new() -> Self {
        Tree { root: None }
    }

    fn insert(&mut self, key: K) -> bool {
        let link = Self::find_link(&mut self.root, &key);

        if link.is_some() {
            return false;
        }

        *link = Some(Box::new(Node::new(key)));
        true
    }

    fn search(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        false
    }

    fn remove(&mut self, key: &K) -> bool {
        let link = Self::find_link(&mut self.root, key);

        let mut node = match link.take() {
            Some(node) => node,
            None => return false,
        };

        *link = match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                // the in-order successor takes the place of the removed key
                let mut right = Some(right);

                if let Some(successor) = Self::unlink_leftmost(&mut right) {
                    node.key = successor.key;
                }

                node.left = Some(left);
                node.right = right;
                Some(node)
            }
        };

        true
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        let mut nodes: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = nodes.pop() {
            nodes.extend(node.left.take());
            nodes.extend(node.right.take());
        }
    }
}
