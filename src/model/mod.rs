pub mod dataset;
pub mod region;
pub mod regulation;
pub mod table;
pub mod thresholds;
