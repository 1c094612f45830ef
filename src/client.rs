pub mod dispatcher;
pub mod endpoint;
pub mod headers;

pub use dispatcher::{ApiClient, RawResponse};
pub use endpoint::{BaseUrls, Endpoint, Host};
pub use headers::default_headers;
