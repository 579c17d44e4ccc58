mod app;
mod cli;

fn main() {
    let cli = cli::parse();
    vidrotate::logging::init(cli.verbose);
    app::run(cli);
}
