mod dispatch;
mod math;
mod resolver;

pub use dispatch::*;
pub use math::*;
pub use resolver::*;
