pub mod build;
pub mod cache;
pub mod dispatch;
pub mod lookup;
