//! pqrunner - a subprocess bridge for the PrimusQuery database executable.

use pqrunner::cli::{Cli, CliCommand};
use pqrunner::{logging, Config, ImportRequest, PrimusQuery, Result, Runner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    logging::init(cli.debug);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    let mut config = Config::load_from_file(&config_path)?;
    if let Some(exe) = &cli.executable {
        config.executable = exe.clone();
    }
    if cli.debug {
        config.debug = true;
    }
    info!(executable = %config.executable.display(), "using primusquery");

    let runner = Runner::new(config);

    match cli.command {
        CliCommand::Query(args) => {
            let query = PrimusQuery {
                charset: args.charset,
                host: args.target.host,
                port: args.target.port,
                user: args.target.user,
                pass: args.target.pass,
                database: args.database,
                search: args.search,
                header: args.header,
                data: args.data,
                footer: args.footer,
                ..Default::default()
            };
            let output = runner.run_ad_hoc_query(query, args.timeout).await?;
            print!("{output}");
        }
        CliCommand::Import(args) => {
            let request = ImportRequest {
                host: args.target.host,
                port: args.target.port,
                user: args.target.user,
                pass: args.target.pass,
                loader: args.loader,
            };
            if args.atomic {
                let outcome = runner.run_atomic_import(&args.path, &request).await?;
                println!(
                    "new record: {}, errors: {}",
                    outcome.new_record_id, outcome.error_count
                );
            } else {
                let output = runner.run_import(&args.path, &request).await?;
                print!("{output}");
            }
        }
        CliCommand::Update { host } => {
            runner.refresh_index(&host).await?;
            println!("index refreshed");
        }
    }

    Ok(())
}
