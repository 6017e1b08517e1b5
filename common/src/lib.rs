pub mod messages;
mod xo;

pub use xo::*;
