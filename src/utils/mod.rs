pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{dms_to_decimal, DmsCoordinate};
pub use filename::generate_default_output_filename;
pub use progress::ProgressReporter;
