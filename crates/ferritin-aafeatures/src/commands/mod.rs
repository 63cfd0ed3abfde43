pub mod encode;
pub mod list;
pub mod show;
