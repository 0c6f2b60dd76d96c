pub(crate) mod range_set;
pub mod set_queue;

pub(crate) use self::range_set::RangeSet;
pub use self::set_queue::SetQueue;
