pub mod cart;
pub mod feedback;
pub mod menu;
pub mod order;
pub mod status;
pub mod timestamp;

pub use cart::*;
pub use feedback::*;
pub use menu::*;
pub use order::*;
pub use status::*;
