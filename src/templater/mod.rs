use super::cli::Command;

use anyhow::{Context, Result};

pub mod error;

mod directive;
use directive::Directive;

mod environment;
use environment::Environment;

mod expand;

mod launch;
use launch::LaunchSpec;

mod render;
use render::Renderer;

pub struct Templater {
    command: Command,
    env: Environment,
}

impl Templater {
    pub fn run_command(command: Command) -> Result<()> {
        let templater = Templater {
            command,
            env: Environment::capture(),
        };

        templater.run()
    }

    pub fn run(&self) -> Result<()> {
        let literals = parse_all(&self.command.templates)?;
        let globs = parse_all(&self.command.globs)?;

        let jobs = expand::expand(&literals, &globs).context("Failed to expand templates")?;
        if self.command.verbose {
            log::info!("Rendering {} template(s)", jobs.len());
        }

        let renderer = Renderer::new(&self.env, self.command.allow_missing);
        renderer.render_all(&jobs, self.command.verbose)?;

        let launch = LaunchSpec::new(self.command.binary(), self.command.binary_args());
        if self.command.no_exec {
            log::info!("Not executing {}", launch.binary);
            return Ok(());
        }
        if self.command.verbose {
            log::info!("Executing {:?}", launch.argv);
        }

        match launch.exec(&self.env)? {}
    }
}

fn parse_all(raw: &[String]) -> Result<Vec<Directive>> {
    raw.iter()
        .map(|raw| Directive::parse(raw).map_err(anyhow::Error::from))
        .collect()
}
