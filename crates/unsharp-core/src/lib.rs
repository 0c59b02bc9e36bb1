pub mod config;
pub mod consts;
pub mod effect;
pub mod error;
pub mod filters;
pub mod io;
pub mod raster;
