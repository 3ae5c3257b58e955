pub mod page;
pub mod request;
pub mod view;

pub use page::*;
pub use request::*;
pub use view::*;
