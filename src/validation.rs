//! Record validation - field presence and numeric range rules
//!
//! Every rule is checked; nothing short-circuits.

use crate::constants::MIN_YEAR;
use crate::models::TableroDraft;

pub const NOMBRE_REQUIRED: &str = "El nombre es obligatorio";
pub const UBICACION_REQUIRED: &str = "La ubicación es obligatoria";
pub const MARCA_REQUIRED: &str = "La marca es obligatoria";
pub const CAPACIDAD_POSITIVE: &str = "La capacidad debe ser mayor a 0 amperios";
pub const FABRICACION_MIN: &str = "El año de fabricación debe ser 1900 o posterior";
pub const INSTALACION_MIN: &str = "El año de instalación debe ser 1900 o posterior";
pub const INSTALACION_ORDER: &str =
    "El año de instalación no puede ser anterior al de fabricación";

/// Outcome of validating a draft
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// All messages joined for display
    pub fn message(&self) -> String {
        self.errors.join("\n")
    }
}

pub fn validate(draft: &TableroDraft) -> ValidationResult {
    let mut errors = Vec::new();

    if draft.nombre.trim().is_empty() {
        errors.push(NOMBRE_REQUIRED.to_string());
    }
    if draft.ubicacion.trim().is_empty() {
        errors.push(UBICACION_REQUIRED.to_string());
    }
    if draft.marca.trim().is_empty() {
        errors.push(MARCA_REQUIRED.to_string());
    }
    if !matches!(draft.capacidad_amperios, Some(c) if c > 0) {
        errors.push(CAPACIDAD_POSITIVE.to_string());
    }
    if !matches!(draft.ano_fabricacion, Some(y) if y >= MIN_YEAR) {
        errors.push(FABRICACION_MIN.to_string());
    }
    if !matches!(draft.ano_instalacion, Some(y) if y >= MIN_YEAR) {
        errors.push(INSTALACION_MIN.to_string());
    }
    // Missing years are already reported above
    if let (Some(fab), Some(inst)) = (draft.ano_fabricacion, draft.ano_instalacion) {
        if inst < fab {
            errors.push(INSTALACION_ORDER.to_string());
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Estado;

    fn good() -> TableroDraft {
        TableroDraft {
            nombre: "Tablero Piso 1 - Ala Norte".into(),
            ubicacion: "Piso 1".into(),
            marca: "Schneider".into(),
            capacidad_amperios: Some(100),
            ano_fabricacion: Some(2018),
            ano_instalacion: Some(2019),
            estado: Estado::Operativo,
        }
    }

    #[test]
    fn test_valid_draft() {
        let result = validate(&good());
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.message(), "");
    }

    #[test]
    fn test_zero_capacity_reports_only_capacity() {
        let mut draft = good();
        draft.capacidad_amperios = Some(0);
        let result = validate(&draft);
        assert!(!result.valid);
        assert_eq!(result.errors, vec![CAPACIDAD_POSITIVE.to_string()]);
    }

    #[test]
    fn test_installation_before_manufacture() {
        let mut draft = good();
        draft.ano_fabricacion = Some(2021);
        draft.ano_instalacion = Some(2019);
        let result = validate(&draft);
        assert_eq!(result.errors, vec![INSTALACION_ORDER.to_string()]);
    }

    #[test]
    fn test_whitespace_only_text_is_empty() {
        let mut draft = good();
        draft.nombre = "   ".into();
        draft.marca = "\t".into();
        let result = validate(&draft);
        assert_eq!(
            result.errors,
            vec![NOMBRE_REQUIRED.to_string(), MARCA_REQUIRED.to_string()]
        );
    }

    #[test]
    fn test_every_rule_reported_once() {
        let draft = TableroDraft {
            ano_fabricacion: Some(1850),
            ano_instalacion: Some(1800),
            ..Default::default()
        };
        let result = validate(&draft);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 7);
        assert_eq!(result.message().lines().count(), 7);
    }

    #[test]
    fn test_missing_years_skip_ordering_rule() {
        let mut draft = good();
        draft.ano_fabricacion = None;
        let result = validate(&draft);
        assert_eq!(result.errors, vec![FABRICACION_MIN.to_string()]);
    }

    #[test]
    fn test_year_boundary() {
        let mut draft = good();
        draft.ano_fabricacion = Some(1900);
        draft.ano_instalacion = Some(1900);
        assert!(validate(&draft).valid);

        draft.ano_fabricacion = Some(1899);
        assert_eq!(validate(&draft).errors, vec![FABRICACION_MIN.to_string()]);
    }
}
