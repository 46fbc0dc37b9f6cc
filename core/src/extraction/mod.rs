pub mod pixels;
pub mod record;
pub mod tags;

pub use pixels::load_image_sample;
pub use record::{AttributeRecord, Outcome, RecordExtractor};
pub use tags::*;
