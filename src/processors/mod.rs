pub mod data_merger;

pub use data_merger::{merge_data, DataMerger};
