pub mod catalog;
pub mod dataset;
pub mod filters;
pub mod format;
pub mod net;
pub mod playback;
pub mod series;
pub mod viewer;
