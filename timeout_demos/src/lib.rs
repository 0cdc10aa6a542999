mod console;
pub mod demos;

pub use console::{Console, Line};
pub use demos::{Label, register_all};
