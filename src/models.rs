use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier. The API may hand out numbers or strings,
/// so the original form is kept and echoed back in paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableroId {
    Int(i64),
    Text(String),
}

impl fmt::Display for TableroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableroId::Int(n) => write!(f, "{}", n),
            TableroId::Text(s) => f.write_str(s),
        }
    }
}

/// Operational status of a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Estado {
    #[default]
    Operativo,
    Mantenimiento,
    #[serde(rename = "Fuera de servicio")]
    FueraDeServicio,
}

impl Estado {
    pub const ALL: [Estado; 3] = [
        Estado::Operativo,
        Estado::Mantenimiento,
        Estado::FueraDeServicio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Operativo => "Operativo",
            Estado::Mantenimiento => "Mantenimiento",
            Estado::FueraDeServicio => "Fuera de servicio",
        }
    }

    pub fn next(&self) -> Estado {
        match self {
            Estado::Operativo => Estado::Mantenimiento,
            Estado::Mantenimiento => Estado::FueraDeServicio,
            Estado::FueraDeServicio => Estado::Operativo,
        }
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tablero as returned by the server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tablero {
    pub id: TableroId,
    pub nombre: String,
    pub ubicacion: String,
    pub marca: String,
    pub capacidad_amperios: i64,
    pub ano_fabricacion: i32,
    pub ano_instalacion: i32,
    pub estado: Estado,
}

/// Full record minus id, sent on POST and PATCH
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTablero {
    pub nombre: String,
    pub ubicacion: String,
    pub marca: String,
    pub capacidad_amperios: i64,
    pub ano_fabricacion: i32,
    pub ano_instalacion: i32,
    pub estado: Estado,
}

/// Candidate record as typed by the user; numeric fields may be missing
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableroDraft {
    pub nombre: String,
    pub ubicacion: String,
    pub marca: String,
    pub capacidad_amperios: Option<i64>,
    pub ano_fabricacion: Option<i32>,
    pub ano_instalacion: Option<i32>,
    pub estado: Estado,
}

impl TableroDraft {
    /// Build a draft from raw form text. Numbers that are empty or do not
    /// parse are treated as absent.
    pub fn from_text(
        nombre: &str,
        ubicacion: &str,
        marca: &str,
        capacidad: &str,
        ano_fabricacion: &str,
        ano_instalacion: &str,
        estado: Estado,
    ) -> Self {
        TableroDraft {
            nombre: nombre.to_string(),
            ubicacion: ubicacion.to_string(),
            marca: marca.to_string(),
            capacidad_amperios: capacidad.trim().parse().ok(),
            ano_fabricacion: ano_fabricacion.trim().parse().ok(),
            ano_instalacion: ano_instalacion.trim().parse().ok(),
            estado,
        }
    }

    /// Payload for the gateway, only when every rule holds
    pub fn to_payload(&self) -> Option<NewTablero> {
        if !crate::validation::validate(self).valid {
            return None;
        }
        Some(NewTablero {
            nombre: self.nombre.trim().to_string(),
            ubicacion: self.ubicacion.trim().to_string(),
            marca: self.marca.trim().to_string(),
            capacidad_amperios: self.capacidad_amperios?,
            ano_fabricacion: self.ano_fabricacion?,
            ano_instalacion: self.ano_instalacion?,
            estado: self.estado,
        })
    }
}

/// Uniform gateway result
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        ApiResult {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Success that carries no body (empty DELETE response)
    pub fn empty() -> Self {
        ApiResult {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        ApiResult {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
