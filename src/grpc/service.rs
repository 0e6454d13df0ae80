//! `session.SessionService` implementation over the application façade

use std::time::Instant;

use tonic::{Code, Request, Response, Status};
use tracing::debug;

use super::convert::{map_to_struct, struct_to_map};
use super::proto::session_service_server::SessionService;
use super::proto::{
    DeleteSessionRequest, Empty, GetSessionRequest, GetSessionResponse, Session,
    SetSessionRequest,
};
use crate::app::{Application, DeleteSession, GetSession, SetSession};
use crate::domain::{
    validate_session_key, validate_session_value, DomainError, SessionValue, StoredValue,
};
use crate::infrastructure::observability::record_grpc_request;

#[derive(Debug, Clone)]
pub struct SessionGrpcService {
    app: Application,
}

impl SessionGrpcService {
    pub fn new(app: Application) -> Self {
        Self { app }
    }

    async fn set(&self, request: SetSessionRequest) -> Result<Empty, Status> {
        let session = request
            .session
            .ok_or_else(|| DomainError::validation("Session cannot be empty"))?;

        validate_session_key(&session.key).map_err(DomainError::from)?;
        let value = validate_session_value(session.value).map_err(DomainError::from)?;
        let value = SessionValue::from_map(struct_to_map(value)?);

        self.app
            .commands
            .set_session
            .handle(SetSession::new(session.key, value))
            .await?;

        Ok(Empty {})
    }

    async fn get(&self, request: GetSessionRequest) -> Result<GetSessionResponse, Status> {
        validate_session_key(&request.key).map_err(DomainError::from)?;

        let stored = self
            .app
            .queries
            .get_session
            .handle(GetSession::new(request.key.clone()))
            .await?;

        let data = match stored {
            StoredValue::Found(data) => data,
            StoredValue::NotFound => {
                return Err(Status::not_found(format!(
                    "Session '{}' not found",
                    request.key
                )));
            }
        };

        let value = SessionValue::decode(&data)?;

        Ok(GetSessionResponse {
            session: Some(Session {
                key: request.key,
                value: Some(map_to_struct(value.into_map())),
            }),
        })
    }

    async fn delete(&self, request: DeleteSessionRequest) -> Result<Empty, Status> {
        validate_session_key(&request.key).map_err(DomainError::from)?;

        self.app
            .commands
            .delete_session
            .handle(DeleteSession::new(request.key))
            .await?;

        Ok(Empty {})
    }
}

fn observe<T>(method: &'static str, start: Instant, result: Result<T, Status>) -> Result<Response<T>, Status> {
    let code = match &result {
        Ok(_) => Code::Ok,
        Err(status) => status.code(),
    };
    record_grpc_request(method, code, start.elapsed());
    debug!(method, code = ?code, "gRPC call completed");

    result.map(Response::new)
}

#[tonic::async_trait]
impl SessionService for SessionGrpcService {
    async fn set_session(
        &self,
        request: Request<SetSessionRequest>,
    ) -> Result<Response<Empty>, Status> {
        let start = Instant::now();
        observe("SetSession", start, self.set(request.into_inner()).await)
    }

    async fn get_session(
        &self,
        request: Request<GetSessionRequest>,
    ) -> Result<Response<GetSessionResponse>, Status> {
        let start = Instant::now();
        observe("GetSession", start, self.get(request.into_inner()).await)
    }

    async fn delete_session(
        &self,
        request: Request<DeleteSessionRequest>,
    ) -> Result<Response<Empty>, Status> {
        let start = Instant::now();
        observe("DeleteSession", start, self.delete(request.into_inner()).await)
    }
}
