//! Generates the `session.SessionService` gRPC server from the hand-written
//! prost messages in `src/grpc/proto.rs`.

use tonic_build::manual::{Builder, Method, Service};

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::grpc::proto::{}", input))
        .output_type(format!("crate::grpc::proto::{}", output))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    let service = Service::builder()
        .name("SessionService")
        .package("session")
        .method(unary("set_session", "SetSession", "SetSessionRequest", "Empty"))
        .method(unary(
            "get_session",
            "GetSession",
            "GetSessionRequest",
            "GetSessionResponse",
        ))
        .method(unary(
            "delete_session",
            "DeleteSession",
            "DeleteSessionRequest",
            "Empty",
        ))
        .build();

    Builder::new()
        .build_client(true)
        .build_server(true)
        .compile(&[service]);

    println!("cargo:rerun-if-changed=build.rs");
}
