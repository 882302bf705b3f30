pub mod catalog;
pub mod send;
pub mod submissions;
