pub mod department;
pub mod joined;
pub mod name;

pub use department::{CoordinateTable, DeptCoordinate};
pub use joined::{JoinedRecord, JoinedTable};
pub use name::NameRecord;
