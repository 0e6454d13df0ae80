//! gRPC transport - `session.SessionService`

mod convert;
pub mod proto;
mod server;
mod service;
mod status;

pub use convert::{map_to_struct, struct_to_map};
pub use server::serve_grpc;
pub use service::SessionGrpcService;
