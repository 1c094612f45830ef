pub mod record;

pub use record::ApiCallRecord;
