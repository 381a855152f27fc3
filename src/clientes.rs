// 👥 Clientes - Dashboard client roster
// Persisted as a JSON list under "clients", with "clientsCount" kept in
// step so list views can show a count without decoding the whole list.

use crate::storage::{self, keys, StorageBackend};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// CLIENT RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    /// Stable identity (UUID), assigned at creation.
    pub id: String,

    pub nombre: String,

    pub email: String,

    pub telefono: String,

    /// Subscription plan label, e.g. "Mensual" or "Anual".
    pub plan: String,

    /// Display status, e.g. "Activo" / "Moroso" / "Inactivo".
    pub estado: String,

    #[serde(rename = "fechaRegistro")]
    pub fecha_registro: String,
}

impl Cliente {
    pub fn new(nombre: &str, email: &str, telefono: &str, plan: &str) -> Self {
        Cliente {
            id: uuid::Uuid::new_v4().to_string(),
            nombre: nombre.to_string(),
            email: email.to_string(),
            telefono: telefono.to_string(),
            plan: plan.to_string(),
            estado: "Activo".to_string(),
            fecha_registro: Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// CLIENT STORE
// ============================================================================

pub struct ClienteStore {
    storage: Arc<dyn StorageBackend>,
}

impl ClienteStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        ClienteStore { storage }
    }

    /// Full roster. Absent or malformed data reads as empty.
    pub fn all(&self) -> Vec<Cliente> {
        storage::get_json(self.storage.as_ref(), keys::CLIENTS).unwrap_or_default()
    }

    /// Cached count when present, list length otherwise.
    pub fn count(&self) -> usize {
        self.storage
            .get(keys::CLIENTS_COUNT)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| self.all().len())
    }

    pub fn add(&self, cliente: Cliente) -> Result<()> {
        let mut clientes = self.all();
        clientes.push(cliente);
        self.save(&clientes)
    }

    /// Apply `update_fn` to the client with `id`. Returns whether a client
    /// was found.
    pub fn update<F>(&self, id: &str, update_fn: F) -> Result<bool>
    where
        F: FnOnce(&mut Cliente),
    {
        let mut clientes = self.all();

        match clientes.iter_mut().find(|c| c.id == id) {
            Some(cliente) => {
                update_fn(cliente);
                self.save(&clientes)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove by id. Returns whether a client was removed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut clientes = self.all();
        let before = clientes.len();
        clientes.retain(|c| c.id != id);

        if clientes.len() == before {
            return Ok(false);
        }

        self.save(&clientes)?;
        Ok(true)
    }

    pub fn find(&self, id: &str) -> Option<Cliente> {
        self.all().into_iter().find(|c| c.id == id)
    }

    fn save(&self, clientes: &[Cliente]) -> Result<()> {
        storage::set_json(self.storage.as_ref(), keys::CLIENTS, &clientes)?;
        self.storage
            .set(keys::CLIENTS_COUNT, &clientes.len().to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn create_test_cliente(nombre: &str) -> Cliente {
        Cliente::new(nombre, "cliente@x.mx", "5512345678", "Mensual")
    }

    fn setup() -> (Arc<MemoryStorage>, ClienteStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClienteStore::new(storage.clone() as Arc<dyn StorageBackend>);
        (storage, store)
    }

    #[test]
    fn test_add_and_list() {
        let (_, store) = setup();

        store.add(create_test_cliente("Carlos")).unwrap();
        store.add(create_test_cliente("Ana")).unwrap();

        let clientes = store.all();
        assert_eq!(clientes.len(), 2);
        assert_eq!(clientes[0].nombre, "Carlos");
        assert_eq!(clientes[0].estado, "Activo");
    }

    #[test]
    fn test_count_tracks_roster() {
        let (storage, store) = setup();

        assert_eq!(store.count(), 0);

        let cliente = create_test_cliente("Carlos");
        let id = cliente.id.clone();
        store.add(cliente).unwrap();
        store.add(create_test_cliente("Ana")).unwrap();

        assert_eq!(storage.get(keys::CLIENTS_COUNT).unwrap().as_deref(), Some("2"));
        assert_eq!(store.count(), 2);

        store.remove(&id).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_count_falls_back_to_list_length() {
        let (storage, store) = setup();
        store.add(create_test_cliente("Carlos")).unwrap();

        // Stale or garbage cached count is ignored
        storage.set(keys::CLIENTS_COUNT, "many").unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_update_existing() {
        let (_, store) = setup();

        let cliente = create_test_cliente("Carlos");
        let id = cliente.id.clone();
        store.add(cliente).unwrap();

        let found = store.update(&id, |c| c.estado = "Moroso".to_string()).unwrap();
        assert!(found);
        assert_eq!(store.find(&id).unwrap().estado, "Moroso");
    }

    #[test]
    fn test_update_missing_is_false() {
        let (_, store) = setup();
        let found = store.update("no-such-id", |c| c.estado.clear()).unwrap();
        assert!(!found);
    }

    #[test]
    fn test_remove_missing_is_false() {
        let (_, store) = setup();
        store.add(create_test_cliente("Carlos")).unwrap();

        assert!(!store.remove("no-such-id").unwrap());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_malformed_roster_reads_as_empty() {
        let (storage, store) = setup();
        storage.set(keys::CLIENTS, "[{]").unwrap();

        assert!(store.all().is_empty());
    }
}
