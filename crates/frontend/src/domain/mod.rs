pub mod a001_metric;
pub mod a002_caliber;
pub mod a003_dimension;
