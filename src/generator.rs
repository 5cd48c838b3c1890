//! Core generation orchestration.
//! Reads structured input, renders the template, runs post-processors and
//! writes the result, either for one input file or for a batch of them.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::inputs::expand_patterns;
use crate::path_context::output_context;
use crate::postprocess::run_post_processors;
use crate::readers::Context;
use crate::registry::ExtensionRegistry;
use crate::renderer::{Template, TemplateRenderer};

/// Template name used for output path patterns in error messages.
const OUTPUT_TEMPLATE_NAME: &str = "output";

/// Options of a single-file generation.
#[derive(Debug, Clone, Default)]
pub struct OneOptions {
    /// Path to the template file
    pub template: String,
    /// Path to the structured input file
    pub input: String,
    /// Output path pattern; `None` returns the rendered text instead
    pub output: Option<String>,
    /// Post-processing commands, run in order
    pub post: Vec<String>,
}

/// Options of a batch generation.
#[derive(Debug, Clone, Default)]
pub struct ManyOptions {
    /// Path to the template file
    pub template: String,
    /// Output path pattern rendered once per input file
    pub output: String,
    /// Glob patterns selecting the input files
    pub inputs: Vec<String>,
    /// Post-processing commands, run in order
    pub post: Vec<String>,
}

/// What a single-file generation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// The text was written to this path.
    Written(PathBuf),
    /// No output pattern was given; the caller decides where the text goes.
    Rendered(String),
}

/// Drives generation with a fixed reader registry and template engine.
pub struct Generator<'a> {
    registry: &'a ExtensionRegistry,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a ExtensionRegistry, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { registry, renderer }
    }

    /// Generates code for one input file.
    ///
    /// When an output pattern is given it is rendered against the input's
    /// data plus the path variables of the input, with `__index__` set to 0.
    ///
    /// # Errors
    /// * `Error::InvalidPathError` if the template or input is not a file
    /// * Any reader, template, post-processor or IO error along the way
    pub fn generate_one(&self, options: &OneOptions) -> Result<Generated> {
        require_file("template", &options.template)?;
        require_file("input", &options.input)?;

        let data = self.registry.read(&options.input)?;
        let template = self.load_template(&options.template)?;
        let text = render_and_post_process(&template, &data, &options.post)?;

        match &options.output {
            None => Ok(Generated::Rendered(text)),
            Some(pattern) => {
                let output = self.renderer.compile(OUTPUT_TEMPLATE_NAME, pattern)?;
                let target = write_output(&output, &data, &options.input, 0, &text)?;
                Ok(Generated::Written(target))
            }
        }
    }

    /// Generates one output file per input matched by the input patterns.
    ///
    /// Inputs are processed sequentially in expansion order. The first
    /// failure aborts the batch; files already written stay on disk.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Written paths, one per processed input
    pub fn generate_many(&self, options: &ManyOptions) -> Result<Vec<PathBuf>> {
        require_file("template", &options.template)?;
        if options.inputs.is_empty() {
            return Err(Error::InvalidArgumentsError(
                "must specify at least one input pattern".to_string(),
            ));
        }
        if options.output.is_empty() {
            return Err(Error::InvalidArgumentsError(
                "must specify an output pattern".to_string(),
            ));
        }

        let inputs = expand_patterns(&options.inputs)?;
        let output = self.renderer.compile(OUTPUT_TEMPLATE_NAME, &options.output)?;
        if inputs.is_empty() {
            warn!("No input files matched; nothing to generate");
            return Ok(Vec::new());
        }

        let template = self.load_template(&options.template)?;

        let mut written = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let input = input.to_string_lossy();
            debug!("Processing input #{index}: '{input}'");

            let data = self.registry.read(&input)?;
            let text = render_and_post_process(&template, &data, &options.post)?;
            written.push(write_output(&output, &data, &input, index, &text)?);
        }

        Ok(written)
    }

    fn load_template(&self, path: &str) -> Result<Template> {
        let source = fs::read_to_string(path)?;
        self.renderer.compile(path, &source)
    }
}

fn require_file(argument: &str, path: &str) -> Result<()> {
    if Path::new(path).is_file() {
        Ok(())
    } else {
        Err(Error::InvalidPathError {
            argument: argument.to_string(),
            path: path.to_string(),
        })
    }
}

fn render_and_post_process(template: &Template, data: &Context, post: &[String]) -> Result<String> {
    let rendered = template.render(data)?;
    run_post_processors(post, rendered)
}

/// Resolves the output path for `input` and writes `text` to it.
fn write_output(
    output: &Template,
    data: &Context,
    input: &str,
    index: usize,
    text: &str,
) -> Result<PathBuf> {
    let context = output_context(data, input, index);
    let rendered = output.render(&context)?;
    if rendered.trim().is_empty() {
        return Err(Error::InvalidPathError {
            argument: "output".to_string(),
            path: rendered,
        });
    }

    let target = PathBuf::from(rendered);
    debug!("Output path for '{input}' is '{}'", target.display());
    write_file(&target, text)?;
    info!("Generated '{}'", target.display());
    Ok(target)
}

/// Writes `content` to `path`, creating parent directories and truncating
/// an existing file.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaRenderer;
    use tempfile::TempDir;

    #[test]
    fn test_require_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("t.j2");
        fs::write(&file, "").unwrap();

        assert!(require_file("template", &file.display().to_string()).is_ok());
        match require_file("input", &dir.path().display().to_string()) {
            Err(Error::InvalidPathError { argument, .. }) => assert_eq!(argument, "input"),
            other => panic!("Expected InvalidPathError, got {other:?}"),
        }
    }

    #[test]
    fn test_write_file_creates_parents_and_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/out.txt");

        write_file(&path, "first version, longer").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_blank_output_path_is_rejected() {
        let engine = MiniJinjaRenderer::new();
        let output = engine.compile("output", "{{ missing }}").unwrap();

        match write_output(&output, &Context::new(), "in.json", 0, "text") {
            Err(Error::InvalidPathError { argument, .. }) => assert_eq!(argument, "output"),
            other => panic!("Expected InvalidPathError, got {other:?}"),
        }
    }
}
