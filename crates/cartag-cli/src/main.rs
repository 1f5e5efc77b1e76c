//! Cartag CLI - Command-line interface for record digests, premiums and sealed envelopes.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{canonicalize, digest, fields, keygen, list, price, seal, unseal, verify};

#[derive(Parser)]
#[command(name = "cartag")]
#[command(about = "Vehicle record integrity, pricing and sealing CLI")]
struct Cli {
    /// Log filter directive, e.g. `debug` or `cartag_store=debug`
    #[arg(long, global = true, default_value = "warn")]
    log: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records
    List {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a record field by field, in canonical key order
    Fields {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// NFT token of the record
        token: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical bytes of a record
    Canonicalize {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// NFT token of the record
        token: String,
    },
    /// Print the SHA-256 digest of a record
    Digest {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// NFT token of the record
        token: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a claimed digest against a record
    Verify {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// NFT token of the record
        token: String,
        /// Claimed digest as hex
        #[arg(long)]
        digest: String,
        /// Exit with error code on mismatch
        #[arg(long)]
        strict: bool,
    },
    /// Compute the premium for a record
    Price {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// NFT token of the record
        token: String,
        /// YAML rating table (standard table if omitted)
        #[arg(long)]
        rating_table: Option<String>,
        /// Show every applied factor
        #[arg(long)]
        explain: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Seal a record for a recipient public key
    Seal {
        /// JSON records file (built-in samples if omitted)
        #[arg(long)]
        records: Option<String>,
        /// NFT token of the record
        token: String,
        /// Recipient public key (PEM, SPKI)
        #[arg(long)]
        public_key: String,
        /// Write raw ciphertext to FILE instead of base64 to stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Open a sealed envelope and print the canonical record
    Unseal {
        /// Recipient private key (PEM, PKCS#8)
        #[arg(long)]
        private_key: String,
        /// Envelope file (or stdin if not provided)
        input: Option<String>,
        /// Input is raw ciphertext rather than base64
        #[arg(long)]
        raw: bool,
    },
    /// Generate a recipient key pair
    Keygen {
        /// Directory receiving recipient.pem and recipient.pub.pem
        #[arg(long)]
        out_dir: String,
        /// Modulus size in bits
        #[arg(long, default_value_t = 2048)]
        bits: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::List { records, json } => list::run(records, json),
        Commands::Fields {
            records,
            token,
            json,
        } => fields::run(records, token, json),
        Commands::Canonicalize { records, token } => canonicalize::run(records, token),
        Commands::Digest {
            records,
            token,
            json,
        } => digest::run(records, token, json),
        Commands::Verify {
            records,
            token,
            digest,
            strict,
        } => verify::run(records, token, digest, strict),
        Commands::Price {
            records,
            token,
            rating_table,
            explain,
            json,
        } => price::run(records, token, rating_table, explain, json),
        Commands::Seal {
            records,
            token,
            public_key,
            out,
        } => seal::run(records, token, public_key, out),
        Commands::Unseal {
            private_key,
            input,
            raw,
        } => unseal::run(private_key, input, raw),
        Commands::Keygen { out_dir, bits } => keygen::run(out_dir, bits),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
