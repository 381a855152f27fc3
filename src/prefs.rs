// ⚙️ Preferences - Currency and theme tokens
// Stored as bare strings, not JSON. Unknown or missing tokens fall back to
// the defaults the dashboard ships with (MXN, light).

use crate::storage::{keys, StorageBackend};
use anyhow::Result;

// ============================================================================
// CURRENCY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Moneda {
    #[default]
    Mxn,
    Usd,
}

impl Moneda {
    pub fn as_str(&self) -> &'static str {
        match self {
            Moneda::Mxn => "MXN",
            Moneda::Usd => "USD",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "MXN" => Some(Moneda::Mxn),
            "USD" => Some(Moneda::Usd),
            _ => None,
        }
    }
}

// ============================================================================
// THEME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tema {
    #[default]
    Claro,
    Oscuro,
}

impl Tema {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tema::Claro => "light",
            Tema::Oscuro => "dark",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "light" => Some(Tema::Claro),
            "dark" => Some(Tema::Oscuro),
            _ => None,
        }
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

pub fn load_moneda(storage: &dyn StorageBackend) -> Moneda {
    storage
        .get(keys::CURRENCY)
        .ok()
        .flatten()
        .and_then(|t| Moneda::parse(&t))
        .unwrap_or_default()
}

pub fn save_moneda(storage: &dyn StorageBackend, moneda: Moneda) -> Result<()> {
    storage.set(keys::CURRENCY, moneda.as_str())
}

pub fn load_tema(storage: &dyn StorageBackend) -> Tema {
    storage
        .get(keys::THEME)
        .ok()
        .flatten()
        .and_then(|t| Tema::parse(&t))
        .unwrap_or_default()
}

pub fn save_tema(storage: &dyn StorageBackend, tema: Tema) -> Result<()> {
    storage.set(keys::THEME, tema.as_str())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_when_absent() {
        let storage = MemoryStorage::new();

        assert_eq!(load_moneda(&storage), Moneda::Mxn);
        assert_eq!(load_tema(&storage), Tema::Claro);
    }

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();

        save_moneda(&storage, Moneda::Usd).unwrap();
        save_tema(&storage, Tema::Oscuro).unwrap();

        assert_eq!(load_moneda(&storage), Moneda::Usd);
        assert_eq!(load_tema(&storage), Tema::Oscuro);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_unknown_tokens_fall_back() {
        let storage = MemoryStorage::new();

        storage.set(keys::CURRENCY, "EUR").unwrap();
        storage.set(keys::THEME, "solarized").unwrap();

        assert_eq!(load_moneda(&storage), Moneda::Mxn);
        assert_eq!(load_tema(&storage), Tema::Claro);
    }
}
