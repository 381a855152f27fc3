use anyhow::Result;
use std::env;
use std::sync::Arc;

use cobrix::{
    export_csv, Empresa, EmpresaRegistry, ResumenTransacciones, SessionStore, SqliteStorage,
    StorageBackend, TransactionGenerator,
};

const STORE_PATH: &str = "cobrix.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("seed") => run_seed()?,
        Some("login") if args.len() == 4 => run_login(&args[2], &args[3])?,
        Some("gen") => {
            let n = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .unwrap_or(20);
            run_generate(n)?;
        }
        _ => print_usage(),
    }

    Ok(())
}

fn print_usage() {
    println!("Cobrix Core v{}", cobrix::VERSION);
    println!();
    println!("Usage:");
    println!("  cobrix seed                    Register the demo company");
    println!("  cobrix login <email> <pass>    Try a login against the store");
    println!("  cobrix gen [n]                 Generate n mock transactions (default 20)");
}

fn open_storage() -> Result<Arc<dyn StorageBackend>> {
    Ok(Arc::new(SqliteStorage::open(STORE_PATH)?))
}

fn run_seed() -> Result<()> {
    println!("🏢 Seeding demo company...");

    let storage = open_storage()?;
    let registry = EmpresaRegistry::new(storage);

    let demo = Empresa {
        nombre_empresa: "Gimnasio Demo".to_string(),
        rfc: "GDE010101AA1".to_string(),
        nombre_dueno: "Demo Owner".to_string(),
        ubicacion: "CDMX".to_string(),
        num_clientes: "51-200".to_string(),
        nicho: "Gimnasio".to_string(),
        email: "demo@cobrix.mx".to_string(),
        telefono: "5500000000".to_string(),
        plan: Some("Pro".to_string()),
        metodo_pago: Some("Tarjeta de crédito".to_string()),
        password: Some("demo123".to_string()),
        fecha_registro: None,
    };

    if let Err(errors) = cobrix::validar_registro(&demo) {
        for error in errors {
            eprintln!("  ✗ {}", error);
        }
        anyhow::bail!("Demo company failed validation");
    }

    registry.register(demo)?;
    println!("✓ Registered. Companies in store: {}", registry.count());
    println!("  Login with: cobrix login demo@cobrix.mx demo123");

    Ok(())
}

fn run_login(email: &str, password: &str) -> Result<()> {
    let storage = open_storage()?;
    let mut session = SessionStore::new(storage);
    session.initialize_session()?;

    if session.login(email, password)? {
        let empresa = session.empresa().map(|e| e.nombre_empresa.clone());
        println!("✓ Logged in as {}", empresa.unwrap_or_default());
    } else {
        println!("✗ Invalid credentials");
    }

    Ok(())
}

fn run_generate(n: usize) -> Result<()> {
    println!("💳 Generating {} mock transactions...", n);

    let mut generator = TransactionGenerator::new();
    let batch = generator.generate_batch(1, n);

    let resumen = ResumenTransacciones::from_batch(&batch);
    println!("✓ Generated: {}", resumen.total);
    println!("  Exitosas:            {}", resumen.exitosas);
    println!("  Rechazadas:          {}", resumen.rechazadas);
    println!("  Conciliación Manual: {}", resumen.conciliacion_manual);
    println!(
        "  Monto exitoso:       ${:.2}",
        ResumenTransacciones::monto_exitoso(&batch)
    );

    let out = "transacciones.csv";
    export_csv(&batch, out)?;
    println!("✓ Exported to {}", out);

    Ok(())
}
