// 🏢 Empresa - Registered company profiles
// Persisted as an ordered JSON list under "registrosEmpresas".
// Email is the de facto lookup key; nothing enforces uniqueness.

use crate::storage::{self, keys, StorageBackend};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// COMPANY PROFILE
// ============================================================================

/// Company profile as stored by the registration flow.
///
/// Field names follow the persisted camelCase layout so records written by
/// the dashboard decode unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    #[serde(rename = "nombreEmpresa")]
    pub nombre_empresa: String,

    /// Tax id (RFC).
    pub rfc: String,

    #[serde(rename = "nombreDueno")]
    pub nombre_dueno: String,

    pub ubicacion: String,

    /// Client-volume bracket, e.g. "51-200".
    #[serde(rename = "numClientes")]
    pub num_clientes: String,

    pub nicho: String,

    pub email: String,

    pub telefono: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    #[serde(rename = "metodoPago", default, skip_serializing_if = "Option::is_none")]
    pub metodo_pago: Option<String>,

    /// Stored in plaintext; this is mock/demo data, not a credential store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(rename = "fechaRegistro", default, skip_serializing_if = "Option::is_none")]
    pub fecha_registro: Option<String>,
}

impl Empresa {
    /// Case-insensitive email match against a login attempt.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

// ============================================================================
// REGISTRATION VALIDATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate a registration form submission.
///
/// Only field presence is checked; login never validates and compares
/// whatever was stored.
pub fn validar_registro(empresa: &Empresa) -> ValidationResult {
    let mut errors = Vec::new();

    let required = [
        ("nombreEmpresa", &empresa.nombre_empresa),
        ("rfc", &empresa.rfc),
        ("nombreDueno", &empresa.nombre_dueno),
        ("ubicacion", &empresa.ubicacion),
        ("numClientes", &empresa.num_clientes),
        ("nicho", &empresa.nicho),
        ("email", &empresa.email),
        ("telefono", &empresa.telefono),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError {
                field: field.to_string(),
                message: "Required field is empty".to_string(),
            });
        }
    }

    if !empresa.email.is_empty() && !empresa.email.contains('@') {
        errors.push(ValidationError {
            field: "email".to_string(),
            message: "Not a valid email address".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// EMPRESA REGISTRY
// ============================================================================

/// Registry over the persisted company list.
///
/// Append-only in practice: registration pushes to the end, nothing removes.
pub struct EmpresaRegistry {
    storage: Arc<dyn StorageBackend>,
}

impl EmpresaRegistry {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        EmpresaRegistry { storage }
    }

    /// All registered companies. Absent or malformed data reads as empty.
    pub fn all(&self) -> Vec<Empresa> {
        storage::get_json(self.storage.as_ref(), keys::REGISTROS_EMPRESAS).unwrap_or_default()
    }

    /// Append a company and persist the list.
    ///
    /// Stamps `fechaRegistro` when the caller left it unset. Does not check
    /// for duplicate emails.
    pub fn register(&self, mut empresa: Empresa) -> Result<()> {
        if empresa.fecha_registro.is_none() {
            empresa.fecha_registro = Some(Utc::now().to_rfc3339());
        }

        let mut registros = self.all();
        registros.push(empresa);
        storage::set_json(self.storage.as_ref(), keys::REGISTROS_EMPRESAS, &registros)
    }

    /// First entry whose email matches, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<Empresa> {
        self.all().into_iter().find(|e| e.matches_email(email))
    }

    /// First persisted entry, in insertion order.
    pub fn first(&self) -> Option<Empresa> {
        self.all().into_iter().next()
    }

    pub fn count(&self) -> usize {
        self.all().len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
