// Source loaders: read each raw input and coerce it into the data model.
// A missing or unreadable input never fails the run; it is replaced by an
// empty default and recorded in the LoadReport.

pub mod array;
pub mod layout;
pub mod loaders;
pub mod npy;
pub mod report;
pub mod table;

pub use array::{ArrayLoader, ArrayPayload, FsArrayLoader};
pub use layout::SourceLayout;
pub use loaders::{load_all, SourceBundle};
pub use report::{LoadReport, SourceStatus};
