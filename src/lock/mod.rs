pub mod spinlock;

pub use spinlock::RawSpinRwLock;
pub use spinlock::SpinRwLock;

/// The default raw lock of every container.
pub type DefaultRawRwLock = parking_lot::RawRwLock;
