// 💳 Mock Transactions - Synthetic payment activity
// Every generated transaction is reported as "Procesando"; the real outcome
// is drawn up front and attached as metadata for later display.

use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// MOCK CLIENT CATALOG
// ============================================================================

/// Immutable catalog entry: a synthetic client with the amounts and payment
/// methods their transactions can draw from.
#[derive(Debug, Clone, Copy)]
pub struct MockClient {
    pub nombre: &'static str,
    pub concepto: &'static str,
    pub montos: &'static [f64],
    pub metodos: &'static [&'static str],
}

pub const CLIENTES_MOCK: &[MockClient] = &[
    MockClient {
        nombre: "Carlos Mendoza",
        concepto: "Mensualidad Gimnasio",
        montos: &[450.0, 550.0, 650.0],
        metodos: &["SPEI", "Tarjeta de débito"],
    },
    MockClient {
        nombre: "Ana Gutiérrez",
        concepto: "Plan Anual",
        montos: &[4800.0, 5400.0],
        metodos: &["Tarjeta de crédito", "SPEI"],
    },
    MockClient {
        nombre: "Jorge Ramírez",
        concepto: "Clases de CrossFit",
        montos: &[800.0, 950.0, 1100.0],
        metodos: &["Efectivo", "Tarjeta de débito", "SPEI"],
    },
    MockClient {
        nombre: "María Fernanda López",
        concepto: "Mensualidad Premium",
        montos: &[890.0, 990.0],
        metodos: &["Domiciliación", "Tarjeta de crédito"],
    },
    MockClient {
        nombre: "Luis Hernández",
        concepto: "Renta de Cancha",
        montos: &[300.0, 350.0, 400.0],
        metodos: &["Efectivo", "SPEI"],
    },
    MockClient {
        nombre: "Sofía Castillo",
        concepto: "Nutrición Deportiva",
        montos: &[600.0, 750.0],
        metodos: &["Tarjeta de crédito", "Tarjeta de débito"],
    },
    MockClient {
        nombre: "Ricardo Peña",
        concepto: "Mensualidad Gimnasio",
        montos: &[450.0, 500.0],
        metodos: &["Domiciliación", "Efectivo"],
    },
    MockClient {
        nombre: "Valeria Ríos",
        concepto: "Entrenamiento Personal",
        montos: &[1200.0, 1500.0, 1800.0],
        metodos: &["SPEI", "Tarjeta de crédito"],
    },
];

/// Rejection reasons a failed charge can carry.
pub const MOTIVOS_RECHAZO: [&str; 4] = [
    "Fondos insuficientes",
    "Cuenta inexistente",
    "Límite de transferencia excedido",
    "Rechazada por el banco emisor",
];

// ============================================================================
// TRANSACTION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estado {
    #[serde(rename = "Procesando")]
    Procesando,

    #[serde(rename = "Exitosa")]
    Exitosa,

    #[serde(rename = "Rechazada")]
    Rechazada,

    #[serde(rename = "Conciliación Manual")]
    ConciliacionManual,
}

impl Estado {
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Procesando => "Procesando",
            Estado::Exitosa => "Exitosa",
            Estado::Rechazada => "Rechazada",
            Estado::ConciliacionManual => "Conciliación Manual",
        }
    }
}

impl std::fmt::Display for Estado {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION RECORD
// ============================================================================

/// Display-only record; never persisted, id sequencing is the caller's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaccion {
    pub id: u64,

    pub referencia: String,

    pub cliente: String,

    pub concepto: String,

    pub monto: f64,

    #[serde(rename = "metodoPago")]
    pub metodo_pago: String,

    /// Always `Procesando` at creation.
    pub estado: Estado,

    /// Local wall-clock display string, "%d/%m/%Y %H:%M".
    pub fecha: String,

    /// Outcome decided at creation time, surfaced later by the UI.
    #[serde(rename = "estadoFinal")]
    pub estado_final: Estado,

    /// Present exactly when `estado_final` is `Rechazada`.
    #[serde(rename = "motivoRechazo", default, skip_serializing_if = "Option::is_none")]
    pub motivo_rechazo: Option<String>,
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Randomized transaction source over the fixed client catalog.
///
/// Outcome weights: 50% Exitosa, 30% Rechazada, 20% Conciliación Manual.
pub struct TransactionGenerator {
    rng: StdRng,
}

impl TransactionGenerator {
    pub fn new() -> Self {
        TransactionGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests and reproducible demos.
    pub fn with_seed(seed: u64) -> Self {
        TransactionGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce one transaction under the caller-supplied id.
    pub fn generate(&mut self, id: u64) -> Transaccion {
        // Catalog is non-empty, as are each client's sets
        let cliente = CLIENTES_MOCK.choose(&mut self.rng).unwrap();
        let monto = *cliente.montos.choose(&mut self.rng).unwrap();
        let metodo = *cliente.metodos.choose(&mut self.rng).unwrap();

        let draw: f64 = self.rng.gen();
        let (estado_final, motivo_rechazo) = if draw < 0.5 {
            (Estado::Exitosa, None)
        } else if draw < 0.8 {
            let motivo = *MOTIVOS_RECHAZO.choose(&mut self.rng).unwrap();
            (Estado::Rechazada, Some(motivo.to_string()))
        } else {
            (Estado::ConciliacionManual, None)
        };

        Transaccion {
            id,
            referencia: reference_code(id),
            cliente: cliente.nombre.to_string(),
            concepto: cliente.concepto.to_string(),
            monto,
            metodo_pago: metodo.to_string(),
            estado: Estado::Procesando,
            fecha: Local::now().format("%d/%m/%Y %H:%M").to_string(),
            estado_final,
            motivo_rechazo,
        }
    }

    /// Convenience: a batch of `n` transactions with sequential ids from
    /// `start_id`.
    pub fn generate_batch(&mut self, start_id: u64, n: usize) -> Vec<Transaccion> {
        (0..n as u64).map(|i| self.generate(start_id + i)).collect()
    }
}

impl Default for TransactionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Short display reference, e.g. "REF-3F2A9C1B".
fn reference_code(id: u64) -> String {
    let nanos = Local::now().timestamp_nanos_opt().unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}", id, nanos));
    let digest = format!("{:X}", hasher.finalize());
    format!("REF-{}", &digest[..8])
}

// ============================================================================
// TESTS
// ============================================================================
