mod cli;
mod logging;
mod app;

fn main() {
    let args = cli::parse();
    let code = app::run(args);
    std::process::exit(code.into());
}
