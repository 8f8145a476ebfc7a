use clap::Parser;

use biangbiang::cli::Cli;

fn main() {
    let cli = Cli::parse();
    biangbiang::logging::init(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(biangbiang::run(cli)) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
