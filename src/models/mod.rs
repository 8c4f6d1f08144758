pub mod client;
pub mod money;
pub mod order;
pub mod order_line;
pub mod product;

pub use client::*;
pub use money::*;
pub use order::*;
pub use order_line::*;
pub use product::*;
