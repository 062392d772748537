use std::process::Command;

use super::environment::Environment;
use super::error::{Error, Result};

/// The program that takes over once templates are rendered.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub binary: String,
    pub argv: Vec<String>,
}

impl LaunchSpec {
    pub fn new(binary: &str, args: &[String]) -> Self {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(binary.to_string());
        argv.extend(args.iter().cloned());
        LaunchSpec {
            binary: binary.to_string(),
            argv,
        }
    }

    fn command(&self, env: &Environment) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(&self.argv[1..]).env_clear().envs(env.iter());
        command
    }

    /// Replaces the current process image. Only returns on failure.
    #[cfg(unix)]
    pub fn exec(&self, env: &Environment) -> Result<std::convert::Infallible> {
        use std::os::unix::process::CommandExt;

        let source = self.command(env).arg0(&self.argv[0]).exec();
        Err(Error::Exec {
            binary: self.binary.clone(),
            source,
        })
    }

    /// No image replacement here: run the child to completion and exit with
    /// its status.
    #[cfg(not(unix))]
    pub fn exec(&self, env: &Environment) -> Result<std::convert::Infallible> {
        let status = self.command(env).status().map_err(|source| Error::Exec {
            binary: self.binary.clone(),
            source,
        })?;
        std::process::exit(status.code().unwrap_or(1))
    }
}
