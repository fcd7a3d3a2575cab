pub mod common;
pub mod host;
pub mod hostgroup;
pub mod interface;
pub mod item;
pub mod rpc;

// Re-export commonly used types for convenience
pub use common::*;
pub use host::*;
pub use hostgroup::*;
pub use interface::*;
pub use item::*;
pub use rpc::{JsonRpcRequest, JsonRpcResponse, LoginRequest};
