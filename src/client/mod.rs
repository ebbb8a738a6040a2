//! 客户端层：限定名解析、请求组装、传输抽象与回执归一化

pub mod http;
pub mod invoker;
pub mod mock;
pub mod name;
pub mod reply;
pub mod request;
pub mod traits;

pub use http::HttpTransport;
pub use invoker::{Client, Credentials};
pub use mock::{MockOutcome, MockTransport};
pub use name::QualifiedName;
pub use reply::Reply;
pub use request::{EntityKind, WireRequest, WireResponse};
pub use traits::Transport;
