//! A thin command-line front end over the `pgp_verify` library.
//!
//! Two verbs: `dearmor` prints a normalized description of an armored
//! message's packets, and `verify` checks a detached RSA signature
//! against a public key and a file.

use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use serde_json::json;

use pgp_verify::armor;
use pgp_verify::packet::Tag;

#[derive(Parser)]
#[command(name = "pgp-verify", about = "Parse and verify ASCII-armored OpenPGP signatures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// De-armor a file and print a normalized JSON description of it.
    Dearmor {
        #[arg(long)]
        file: PathBuf,
    },
    /// Verify a detached signature over a file.
    Verify {
        #[arg(long)]
        keyfile: PathBuf,
        #[arg(long)]
        sigfile: PathBuf,
        #[arg(long)]
        file: PathBuf,
    },
}

fn tag_name(tag: Tag) -> String {
    match tag {
        Tag::Signature => "signature".to_string(),
        Tag::PublicKey => "public-key".to_string(),
        Tag::UserId => "user-id".to_string(),
        Tag::Unknown(id) => format!("unknown({id})"),
    }
}

fn run_dearmor(file: &PathBuf) -> pgp_verify::Result<()> {
    let msg = armor::dearmor_file(file, armor::DEFAULT_MAX_BYTES)?;
    let description = json!({
        "kind": format!("{:?}", msg.asc_type),
        "packet_count": msg.packets.len(),
        "packets": msg.packets.iter().map(|p| tag_name(p.tag)).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Dearmor { file } => run_dearmor(file),
        Command::Verify {
            keyfile,
            sigfile,
            file,
        } => pgp_verify::verify(keyfile, sigfile, file),
    };

    match result {
        Ok(()) => exit(0),
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    }
}
