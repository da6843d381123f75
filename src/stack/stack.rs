// simple sequential stack
pub struct Stack<V> {
    head: Option<Box<Node<V>>>,
    size: usize,
}

struct Node<V> {
    value: V,
    next: Option<Box<Node<V>>>,
}

impl<V> Node<V> {
    fn new(value: V, next: Option<Box<Node<V>>>) -> Node<V> {
        Node { value, next }
    }
}

impl<V> Stack<V> {
    pub fn new() -> Stack<V> {
        Stack {
            head: None,
            size: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of pushed and not yet popped values.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn top(&self) -> Option<&V> {
        self.head.as_ref().map(|node| &node.value)
    }

    pub fn push(&mut self, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node::new(value, next)));
        self.size += 1;
    }

    pub fn pop(&mut self) -> Option<V> {
        let top = self.head.take()?;
        let Node { value, next } = *top;

        self.head = next;
        self.size -= 1;

        Some(value)
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<V: PartialEq> Stack<V> {
    pub fn search(&self, value: &V) -> bool {
        self.iter().any(|v| v == value)
    }
}

impl<V> Default for Stack<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for Stack<V> {
    fn drop(&mut self) {
        let mut node = self.head.take();

        while let Some(mut inside) = node {
            node = inside.next.take();
        }
    }
}

pub struct Iter<'s, V> {
    next: Option<&'s Node<V>>,
}

impl<'s, V> Iterator for Iter<'s, V> {
    type Item = &'s V;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();

        Some(&node.value)
    }
}
