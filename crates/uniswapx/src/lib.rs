pub mod arguments;
mod run;

pub use self::run::{run, start};
