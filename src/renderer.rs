//! Template parsing and rendering for Beaver.
//! Templates use MiniJinja, which accepts Jinja2 syntax.
use minijinja::{AutoEscape, Environment};

use crate::error::Result;
use crate::readers::Context;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Parses `source` into a reusable template registered under `name`.
    ///
    /// # Arguments
    /// * `name` - Name used in error messages, usually the template's path
    /// * `source` - Template text
    ///
    /// # Returns
    /// * `Result<Template>` - Parsed template, ready to render any number of times
    fn compile(&self, name: &str, source: &str) -> Result<Template>;

    /// Parses and renders `source` in one step.
    fn render(&self, source: &str, context: &Context) -> Result<String> {
        self.compile("inline", source)?.render(context)
    }
}

/// A parsed template.
///
/// Rendering does not mutate the template, so the same instance can be
/// rendered against many contexts.
#[derive(Debug, Clone)]
pub struct Template {
    env: Environment<'static>,
    name: String,
}

impl Template {
    /// Renders the template against `context`.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if evaluation fails
    pub fn render(&self, context: &Context) -> Result<String> {
        let tmpl = self.env.get_template(&self.name)?;
        Ok(tmpl.render(context)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// Base environment every compiled template starts from
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance.
    ///
    /// Output is never escaped, whatever the template's file extension.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::MinijinjaError` if the source has a syntax error
    fn compile(&self, name: &str, source: &str) -> Result<Template> {
        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), source.to_string())?;

        Ok(Template {
            env,
            name: name.to_string(),
        })
    }
}
