// Cobrix Core - Library
// Behavioral core of the Cobrix payment dashboard: session store, company
// registry, mock transaction generator, and the key-value storage they share.

pub mod storage;
pub mod empresa;
pub mod session;
pub mod transactions;
pub mod clientes;
pub mod prefs;
pub mod report;

// Re-export commonly used types
pub use storage::{
    get_json, keys, set_json, MemoryStorage, SqliteStorage, StorageBackend,
};
pub use empresa::{
    validar_registro, Empresa, EmpresaRegistry, ValidationError, ValidationResult,
};
pub use session::{SessionState, SessionStore};
pub use transactions::{
    Estado, MockClient, Transaccion, TransactionGenerator, CLIENTES_MOCK, MOTIVOS_RECHAZO,
};
pub use clientes::{Cliente, ClienteStore};
pub use prefs::{load_moneda, load_tema, save_moneda, save_tema, Moneda, Tema};
pub use report::{export_csv, ResumenTransacciones};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
