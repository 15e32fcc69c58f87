mod args;
mod logging;
mod lookup;

use clap::Parser;

use self::args::ProgramArgs;

pub fn run() -> anyhow::Result<()> {
    curl::init();

    let args = ProgramArgs::parse();

    logging::set_up_logging(&args)?;

    lookup::run(&args)
}
