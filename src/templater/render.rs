use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

use handlebars::Handlebars;

use super::environment::Environment;
use super::error::{Error, Result};
use super::expand::RenderJob;

/// Renders templates against a fixed set of environment bindings.
pub struct Renderer {
    handlebars: Handlebars<'static>,
    bindings: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(env: &Environment, allow_missing: bool) -> Self {
        let mut handlebars = Handlebars::new();
        // unresolved variables are an error unless explicitly allowed
        handlebars.set_strict_mode(!allow_missing);
        handlebars.register_escape_fn(mustache_escape);

        Renderer {
            handlebars,
            bindings: env.bindings(),
        }
    }

    pub fn render_str(&self, template: &str) -> std::result::Result<String, handlebars::RenderError> {
        self.handlebars.render_template(template, &self.bindings)
    }

    /// Renders one job and writes it out with the source's permissions.
    /// The source is left alone when the output path differs.
    pub fn render(&self, job: &RenderJob) -> Result<()> {
        let permissions = fs::metadata(&job.source)
            .map_err(Error::io("Failed to stat", &job.source))?
            .permissions();
        let template = fs::read_to_string(&job.source)
            .map_err(Error::io("Failed to read", &job.source))?;

        let rendered = self.render_str(&template).map_err(|source| Error::Render {
            path: job.source.clone(),
            source,
        })?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(permissions.mode() & 0o7777);
        }
        let mut output = options
            .open(&job.output)
            .map_err(Error::io("Failed to open", &job.output))?;
        // existing outputs keep their old mode through open
        output
            .set_permissions(permissions)
            .map_err(Error::io("Failed to set permissions on", &job.output))?;
        output
            .write_all(rendered.as_bytes())
            .map_err(Error::io("Failed to write", &job.output))?;
        Ok(())
    }

    /// Runs jobs in order, stopping at the first failure.
    pub fn render_all(&self, jobs: &[RenderJob], verbose: bool) -> Result<()> {
        for job in jobs {
            log::info!("Filling template: {}", job.source.display());
            if verbose && job.output != job.source {
                log::info!("Writing rendered output to {}", job.output.display());
            }
            self.render(job)?;
        }
        Ok(())
    }
}

/// Mustache-style escaping: only `& < > " '` and NUL are touched, so values
/// such as `a=b` or query strings come through intact.
fn mustache_escape(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\0' => escaped.push('\u{FFFD}'),
            other => escaped.push(other),
        }
    }
    escaped
}
