//! Media file inspection module

pub mod inspector;
pub mod mediainfo;

pub use inspector::VideoInspector;
pub use mediainfo::MediaInfoReport;
