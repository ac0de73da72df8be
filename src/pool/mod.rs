//! Pool features: schedule, picks, results, survivor and administration. Each
//! submodule is a thin typed wrapper over [`crate::api::ApiClient`] that keeps
//! endpoint paths in one place; the server remains the authority on access and
//! validation.

pub mod admin;
pub mod games;
pub mod picks;
pub mod results;
pub mod survivor;
pub mod types;
pub mod users;

#[cfg(test)]
pub(crate) mod testing {
    use crate::{
        api::{ApiClient, ClientConfig},
        session::MemorySessionStore,
    };
    use std::{net::TcpListener, sync::Arc};
    use wiremock::MockServer;

    pub fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    pub fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &ClientConfig::new(server.uri()),
            Arc::new(MemorySessionStore::default()),
        )
        .expect("client")
    }
}
