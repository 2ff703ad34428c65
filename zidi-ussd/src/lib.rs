pub mod menu;
pub mod parser;
pub mod reply;


pub use menu::{dispatch, MenuOutcome};
pub use reply::Reply;
