use anyhow::Context;
use clap::Parser;

use folio::app::App;
use folio::cache::LocalStore;
use folio::config::{Cli, Command, Config, ServeConfig, ViewArgs};
use folio::logging;
use folio::server::ProxyServer;
use folio::state::Loader;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from(cli.github);

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    match cli.command {
        Some(Command::Serve(args)) => {
            logging::init_stderr();
            let server = ProxyServer::new(&config, ServeConfig::from(args))?;
            runtime.block_on(server.serve())?;
        }
        Some(Command::View(args)) => view(&config, args, &runtime)?,
        None => view(&config, ViewArgs::default(), &runtime)?,
    }

    Ok(())
}

fn view(config: &Config, args: ViewArgs, runtime: &tokio::runtime::Runtime) -> anyhow::Result<()> {
    let store = args
        .cache_dir
        .map(LocalStore::new)
        .or_else(LocalStore::open_default);

    let _log_guard = match &store {
        Some(store) => Some(logging::init_file(store.dir()).context("failed to open log file")?),
        None => None,
    };
    if store.is_none() {
        tracing::warn!("no cache directory available, responses will not be cached");
    }

    let loader = Loader::new(config, store)?;
    let mut app = App::new(loader, runtime.handle().clone());

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result.context("terminal error")
}
