//! llcreg: generates the LLC configuration register artifacts from four
//! sizing parameters.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use llcreg_emit::Artifact;
use tracing::subscriber::set_global_default;
use tracing_subscriber::EnvFilter;

use commands::ParamArgs;

#[derive(Parser)]
#[command(name = "llcreg", version, about = "LLC configuration register layout generator")]
struct Cli {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render register artifacts into the output directory
    Generate {
        #[command(flatten)]
        params: ParamArgs,
        /// Output directory (default: [output] dir of llcreg.toml, or ./out)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Artifact to generate, repeatable (default: all applicable)
        #[arg(long = "artifact")]
        artifacts: Vec<Artifact>,
    },
    /// Print the resolved register table
    Show {
        #[command(flatten)]
        params: ParamArgs,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Resolve parameters and print derived constants, size and fingerprint
    Check {
        #[command(flatten)]
        params: ParamArgs,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Write a template llcreg.toml
    Init {
        /// Directory to write into (default: current directory)
        dir: Option<PathBuf>,
        /// Overwrite an existing llcreg.toml
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Generate {
            params,
            out_dir,
            artifacts,
        } => {
            let inputs = params.resolve(&cwd)?;
            let out_dir = out_dir.map(|d| cwd.join(d));
            commands::generate::run(&inputs, out_dir.as_deref(), &artifacts)?;
            Ok(())
        }
        Commands::Show { params, format } => {
            commands::show::run(&params.resolve(&cwd)?, format.as_deref())
        }
        Commands::Check { params, format } => {
            commands::check::run(&params.resolve(&cwd)?, format.as_deref())
        }
        Commands::Init { dir, force } => {
            let dir = dir.map(|d| cwd.join(d)).unwrap_or(cwd);
            commands::init::run(&dir, force)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;

    use config::LlcregConfig;

    /// Full workflow: init → check → generate from the written config.
    #[test]
    fn init_check_generate_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("llc");

        // 1. Init
        commands::init::run(&project, false).unwrap();
        assert!(project.join("llcreg.toml").is_file());

        // 2. Check, parameters from the config
        let inputs = ParamArgs::default().resolve(&project).unwrap();
        commands::check::run(&inputs, None).unwrap();

        // 3. Generate everything into the configured directory
        let written = commands::generate::run(&inputs, None, &[]).unwrap();
        assert_eq!(written.len(), 6);
        let fingerprint = inputs.layout().unwrap().fingerprint();
        for path in &written {
            assert!(path.starts_with(project.join("out")));
            let contents = fs::read_to_string(path).unwrap();
            assert!(contents.contains(&fingerprint), "{}", path.display());
        }
    }

    /// The C header and address enum of one run agree on every address.
    #[test]
    fn artifacts_agree_on_addresses() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = ParamArgs {
            reg_width: Some("64".into()),
            num_lines: Some("256".into()),
            max_partitions: Some("16".into()),
            partitioning: Some("1".into()),
            ..ParamArgs::default()
        }
        .resolve(dir.path())
        .unwrap();
        commands::generate::run(
            &inputs,
            None,
            &[Artifact::SoftwareHeader, Artifact::AddressEnum],
        )
        .unwrap();

        let header = fs::read_to_string(dir.path().join("out/axi_llc_regs.h")).unwrap();
        let enumeration = fs::read_to_string(dir.path().join("out/axi_llc_cfg_addr.svh")).unwrap();
        assert!(header.contains("#define AXI_LLC_COMMIT_PARTITION_CFG_REG_OFFSET 0x64"));
        assert!(enumeration.contains("CommitPartitionCfg"));
        assert!(enumeration.contains("= 32'h64,"));
        assert!(header.contains("#define AXI_LLC_FLUSHED_SET_HIGH_3_REG_OFFSET 0x88"));
        assert!(enumeration.contains("FlushedSetHigh3"));
        assert!(enumeration.contains("= 32'h88\n"));
    }

    /// Module naming from the config flows into file names and macros.
    #[test]
    fn module_name_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = LlcregConfig::template().replace("name = \"axi_llc\"", "name = \"l2_cache\"");
        fs::write(dir.path().join("llcreg.toml"), config).unwrap();

        let inputs = ParamArgs::default().resolve(dir.path()).unwrap();
        commands::generate::run(&inputs, None, &[Artifact::TypedefHeader]).unwrap();
        let typedef = fs::read_to_string(dir.path().join("out/typedef.svh")).unwrap();
        assert!(typedef.contains("`define L2_CACHE_TYPEDEF_ALL("));
    }

    #[test]
    fn cli_parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "llcreg",
            "generate",
            "64",
            "256",
            "256",
            "true",
            "--style",
            "unrolled",
            "--artifact",
            "address-enum",
            "--artifact",
            "software-header",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Generate {
                params, artifacts, ..
            } => {
                assert_eq!(params.reg_width.as_deref(), Some("64"));
                assert_eq!(params.partitioning.as_deref(), Some("true"));
                assert_eq!(params.style, Some(llcreg_core::MultiregStyle::Unrolled));
                assert_eq!(artifacts, [Artifact::AddressEnum, Artifact::SoftwareHeader]);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn cli_rejects_unknown_artifact() {
        assert!(Cli::try_parse_from(["llcreg", "generate", "--artifact", "netlist"]).is_err());
        assert!(Cli::try_parse_from(["llcreg", "show", "--style", "diagonal"]).is_err());
    }
}
