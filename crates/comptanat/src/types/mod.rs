mod record;
mod series;
mod table;
mod value;

pub use record::Record;
pub use series::{Series, SeriesFrame};
pub use table::Table;
pub use value::FieldValue;
