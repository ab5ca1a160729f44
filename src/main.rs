// src/main.rs

use raptor_dev::cli::{self, Command};
use raptor_dev::{logging, run_dev};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("raptor error: {err}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    match args.command {
        Command::Version => {
            println!("{}", cli::version_line());
            Ok(())
        }
        Command::Dev(dev_args) => {
            let root = std::env::current_dir()?;
            run_dev(root, dev_args).await?;
            Ok(())
        }
    }
}
