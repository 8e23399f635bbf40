//! Network messages - communication between App and Network layers

use crate::models::{ApiResult, NewTablero, Tablero, TableroId};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the whole collection (retried per the fetch policy)
    ListTableros { id: u64 },
    /// Create a new record
    CreateTablero { id: u64, payload: NewTablero },
    /// Resubmit a full record
    UpdateTablero {
        id: u64,
        tablero_id: TableroId,
        payload: NewTablero,
    },
    /// Remove a record
    DeleteTablero { id: u64, tablero_id: TableroId },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Listed {
        id: u64,
        result: ApiResult<Vec<Tablero>>,
    },
    Created {
        id: u64,
        result: ApiResult<Tablero>,
    },
    Updated {
        id: u64,
        result: ApiResult<Tablero>,
    },
    Deleted {
        id: u64,
        tablero_id: TableroId,
        result: ApiResult<Option<serde_json::Value>>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Listed { id, .. } => *id,
            NetworkResponse::Created { id, .. } => *id,
            NetworkResponse::Updated { id, .. } => *id,
            NetworkResponse::Deleted { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            NetworkResponse::Listed { result, .. } => result.success,
            NetworkResponse::Created { result, .. } => result.success,
            NetworkResponse::Updated { result, .. } => result.success,
            NetworkResponse::Deleted { result, .. } => result.success,
        }
    }

    /// True for responses to create, update or delete
    pub fn is_mutation(&self) -> bool {
        !matches!(self, NetworkResponse::Listed { .. })
    }
}
