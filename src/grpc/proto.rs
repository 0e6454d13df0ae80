//! Wire messages of the `session` package and the generated service stubs

use prost_types::Struct;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Session {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(message, optional, tag = "2")]
    pub value: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetSessionRequest {
    #[prost(message, optional, tag = "1")]
    pub session: Option<Session>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSessionRequest {
    #[prost(string, tag = "1")]
    pub key: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSessionResponse {
    #[prost(message, optional, tag = "1")]
    pub session: Option<Session>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteSessionRequest {
    #[prost(string, tag = "1")]
    pub key: String,
}

/// Same encoding as `google.protobuf.Empty`
#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}

include!(concat!(env!("OUT_DIR"), "/session.SessionService.rs"));
