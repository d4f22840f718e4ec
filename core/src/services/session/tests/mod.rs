
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::RemoteError;
use crate::services::session::{
    MemoryConnector, RemoteSession, SessionBroker, SessionBrokerConfig, SessionOperation,
};

pub(super) fn broker(connector: &MemoryConnector, config: SessionBrokerConfig) -> SessionBroker {
    SessionBroker::new(Arc::new(connector.clone()), config)
}

/// Touches the session, then hangs
pub(super) struct Stall;

#[async_trait(?Send)]
impl SessionOperation for Stall {
    type Output = ();

    async fn run(&mut self, session: &mut dyn RemoteSession) -> Result<(), RemoteError> {
        session.list("/").await?;
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}
