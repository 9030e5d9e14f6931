/// Trace record builder and shorthand constructors.
pub mod record;

pub use record::{RecordBuilder, alu, cbr, load};
