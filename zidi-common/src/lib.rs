pub mod address;
pub mod money;
pub mod pin;
pub mod request;
