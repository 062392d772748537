mod templater;
mod cli;

fn main() {
    colog::init();
    let command = cli::Command::clap_parse();
    if let Err(e) = templater::Templater::run_command(command) {
        // single line on stderr, outermost context first
        let message = e.chain()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join(": ");
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}
