use clap::Parser;

/// Render templates from the environment, then exec a binary.
///
/// Directives have the form SOURCE[:REGEX:REPLACEMENT]. When REGEX and
/// REPLACEMENT are given the rendered file is written to the path produced by
/// replacing the first REGEX match in SOURCE, and SOURCE is left untouched.
/// Use `\:` for a literal colon.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Command {
    /// Render missing variables as empty strings instead of failing
    #[arg(long)]
    pub allow_missing: bool,
    /// Template file to render (repeatable)
    #[arg(short, long = "template", value_name = "DIRECTIVE")]
    pub templates: Vec<String>,
    /// Glob of template files to render (repeatable)
    #[arg(short, long = "glob", value_name = "DIRECTIVE")]
    pub globs: Vec<String>,
    /// Render templates but do not launch the binary
    #[arg(short, long)]
    pub no_exec: bool,
    /// Log rename targets and the final argv
    #[arg(short, long)]
    pub verbose: bool,
    /// Binary to execute followed by its arguments
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "BINARY"
    )]
    pub command: Vec<String>,
}

impl Command {
    // to avoid importing clap::Parser in main file
    pub fn clap_parse() -> Self {
        Command::parse()
    }

    pub fn binary(&self) -> &str {
        &self.command[0]
    }

    pub fn binary_args(&self) -> &[String] {
        &self.command[1..]
    }
}
