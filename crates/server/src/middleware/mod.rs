pub mod access_log;

pub use access_log::{REQUEST_ID_HEADER, RequestId, access_log};
