mod countdown;

pub use countdown::*;
