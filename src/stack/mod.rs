mod lock;
mod stack;

pub use lock::RwLockStack;
pub use stack::Stack;

pub trait ConcurrentStack<V> {
    fn new() -> Self;
    fn push(&self, value: V);
    // non-blocking pop that returns `None` when the stack is observed as empty.
    fn pop(&self) -> Option<V>;
}
