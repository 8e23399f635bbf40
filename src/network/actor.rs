//! Network actor - runs gateway calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ApiResult, Tablero};
use crate::network::client::TableroGateway;

/// Network actor that turns commands into gateway calls
pub struct NetworkActor {
    gateway: TableroGateway,
    fetch_attempts: u32,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        gateway: TableroGateway,
        fetch_attempts: u32,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            gateway,
            fetch_attempts: fetch_attempts.max(1),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
        // In-flight calls are not cancelled; let them finish on their own
        self.active_requests.detach_all();
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let gateway = self.gateway.clone();
        let response_tx = self.response_tx.clone();
        let attempts = self.fetch_attempts;

        self.active_requests.spawn(async move {
            if let Some(response) = execute(&gateway, cmd, attempts).await {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Execute one command against the gateway
pub async fn execute(
    gateway: &TableroGateway,
    cmd: NetworkCommand,
    fetch_attempts: u32,
) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::ListTableros { id } => {
            tracing::info!(id, url = %gateway.collection_url(), "Listing tableros");
            let result = list_with_retry(gateway, fetch_attempts).await;
            NetworkResponse::Listed { id, result }
        }
        NetworkCommand::CreateTablero { id, payload } => {
            tracing::info!(id, nombre = %payload.nombre, "Creating tablero");
            let result = gateway.create(&payload).await;
            NetworkResponse::Created { id, result }
        }
        NetworkCommand::UpdateTablero { id, tablero_id, payload } => {
            tracing::info!(id, tablero = %tablero_id, "Updating tablero");
            let result = gateway.update(&tablero_id, &payload).await;
            NetworkResponse::Updated { id, result }
        }
        NetworkCommand::DeleteTablero { id, tablero_id } => {
            tracing::info!(id, tablero = %tablero_id, "Deleting tablero");
            let result = gateway.delete(&tablero_id).await;
            NetworkResponse::Deleted { id, tablero_id, result }
        }
        NetworkCommand::Shutdown => return None,
    };
    tracing::info!(id = response.id(), success = response.is_success(), "Request completed");
    Some(response)
}

/// List queries get up to `attempts` tries, back to back
async fn list_with_retry(gateway: &TableroGateway, attempts: u32) -> ApiResult<Vec<Tablero>> {
    let mut attempt = 1;
    loop {
        let result = gateway.list().await;
        if result.success || attempt >= attempts {
            return result;
        }
        tracing::warn!(attempt, error = ?result.error, "List failed, retrying");
        attempt += 1;
    }
}
