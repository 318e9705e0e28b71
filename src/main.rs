use clap::Parser;
use ward_atlas::locality::{FileFetcher, LocalityResolver, Role, DEFAULT_DATASET_URL};
use ward_atlas::server;

/// Ward Atlas — pincode-to-representative lookup for civic complaint reporting.
///
/// Answers "which localities are under this pincode?" and "who represents
/// this locality?" (ward councillor, MLA, MP) from the versioned locality
/// dataset published by the data pipeline.
///
/// Examples:
///   atlas 560001
///   atlas 560001 --locality Indiranagar
///   atlas --pincode 110001 --reload
///   atlas 560038 --offline
///   atlas --serve --port 8787
#[derive(Parser)]
#[command(name = "atlas", version, about, long_about = None)]
struct Cli {
    /// Pincode (positional). Example: atlas 560001
    #[arg(index = 1)]
    pincode_positional: Option<String>,

    /// Pincode (named). Example: --pincode 560001
    #[arg(long)]
    pincode: Option<String>,

    /// Locality name — prints the full representative record.
    #[arg(long, short = 'l')]
    locality: Option<String>,

    /// Dataset artifact URL.
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    dataset_url: String,

    /// Read the dataset from a local JSON file instead of over HTTP.
    #[arg(long)]
    dataset_file: Option<std::path::PathBuf>,

    /// Offline mode: use the default local dataset (~/.ward-atlas/dataset.json).
    #[arg(long)]
    offline: bool,

    /// Force a fresh fetch of the dataset artifact.
    #[arg(long)]
    reload: bool,

    /// Run the HTTP API server instead of a one-shot lookup.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    let resolver = build_resolver(&cli);

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(resolver, &cli.host, cli.port));
        return;
    }

    // ── One-shot lookup ─────────────────────────────────────────

    let pincode = match cli.pincode.as_ref().or(cli.pincode_positional.as_ref()) {
        Some(p) => p.clone(),
        None => {
            eprintln!("Error: No pincode specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  atlas 560001");
            eprintln!("  atlas 560001 --locality Indiranagar");
            eprintln!("  atlas 560038 --offline");
            eprintln!("  atlas --serve --port 8787");
            std::process::exit(1);
        }
    };

    if cli.reload {
        resolver.load_dataset(true).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    }

    match &cli.locality {
        Some(name) => {
            let record = resolver
                .get_locality_details(&pincode, name)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });

            match record {
                Some(record) => {
                    eprintln!("  {} / {}", record.name, record.pincode);
                    eprintln!("  Ward: {}", record.representative_summary(Role::Ward));
                    eprintln!("  MLA:  {}", record.representative_summary(Role::Mla));
                    eprintln!("  MP:   {}", record.representative_summary(Role::Mp));
                    println!("{}", serde_json::to_string_pretty(&record).unwrap());
                }
                None => {
                    // Not an error: the locality is simply not in the dataset.
                    eprintln!("No locality '{}' under pincode {}.", name, pincode);
                    println!("null");
                }
            }
        }
        None => {
            let names = resolver.list_localities(&pincode).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });

            if names.is_empty() {
                eprintln!("Pincode {} is not in the dataset.", pincode);
            } else {
                eprintln!("  {} localities under {}", names.len(), pincode);
            }
            println!("{}", serde_json::to_string_pretty(&names).unwrap());
        }
    }
}

fn build_resolver(cli: &Cli) -> LocalityResolver {
    if let Some(path) = &cli.dataset_file {
        LocalityResolver::from_file(path.clone())
    } else if cli.offline {
        LocalityResolver::from_file(FileFetcher::default_path())
    } else {
        LocalityResolver::from_url(cli.dataset_url.clone())
    }
}
