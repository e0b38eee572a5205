#![allow(clippy::wrong_self_convention)]

mod context;
mod locals;

use std::io;

use serde_json::Value;

pub use crate::render::context::Context;
use crate::template::TemplateFn;
use crate::{Engine, Result, Template};

/// A renderer for a chain of templates.
///
/// This struct is created by one of the following functions:
/// - [`Engine::render`][crate::Engine::render]
/// - [`TemplateRef::render`][crate::TemplateRef::render]
#[must_use = "must call `.to_string()` or `.to_writer(..)` on the renderer"]
pub struct Renderer<'render> {
    engine: &'render Engine<'render>,
    root: Root<'render>,
    globals: Result<Value>,
    template_fn: Option<Box<TemplateFn<'render>>>,
    max_template_depth: Option<usize>,
}

enum Root<'render> {
    Named(String),
    Template(&'render str, &'render dyn Template),
}

impl<'render> Renderer<'render> {
    fn new<S>(engine: &'render Engine<'render>, root: Root<'render>, globals: S) -> Self
    where
        S: serde::Serialize,
    {
        Self {
            engine,
            root,
            globals: serde_json::to_value(globals).map_err(Into::into),
            template_fn: None,
            max_template_depth: None,
        }
    }

    pub(crate) fn with_name<S>(engine: &'render Engine<'render>, name: &str, globals: S) -> Self
    where
        S: serde::Serialize,
    {
        Self::new(engine, Root::Named(name.to_owned()), globals)
    }

    pub(crate) fn with_template<S>(
        engine: &'render Engine<'render>,
        name: &'render str,
        template: &'render dyn Template,
        globals: S,
    ) -> Self
    where
        S: serde::Serialize,
    {
        Self::new(engine, Root::Template(name, template), globals)
    }

    /// Set a function that is called when a template is looked up.
    ///
    /// This replaces the engine's own templates for this render, including
    /// the lookup of the first template when the render was started by name.
    /// Use it to render templates from a custom store.
    pub fn with_template_fn<F>(mut self, template_fn: F) -> Self
    where
        F: FnMut(&str) -> std::result::Result<&'render dyn Template, String> + 'render,
    {
        self.template_fn = Some(Box::new(template_fn));
        self
    }

    /// Set the maximum number of nested templates.
    ///
    /// Every extended layout and every included template counts, as measured
    /// from the first template. Rendering deeper than this fails, which stops
    /// layouts that extend themselves.
    ///
    /// Defaults to the engine setting.
    pub fn with_max_template_depth(mut self, depth: usize) -> Self {
        self.max_template_depth = Some(depth);
        self
    }

    /// Render the templates to a string.
    pub fn to_string(self) -> Result<String> {
        let max_template_depth = self
            .max_template_depth
            .unwrap_or(self.engine.max_template_depth);
        let globals = self.globals?;
        let mut cx = Context::new(self.engine, self.template_fn, max_template_depth, globals);
        match self.root {
            Root::Named(name) => {
                let _span = tracing::debug_span!("render", template = %name).entered();
                cx.render_root(&name)
            }
            Root::Template(name, template) => {
                let _span = tracing::debug_span!("render", template = %name).entered();
                cx.render_root_template(name, template)
            }
        }
    }

    /// Render the templates to the given writer.
    pub fn to_writer<W>(self, mut w: W) -> Result<()>
    where
        W: io::Write,
    {
        let s = self.to_string()?;
        w.write_all(s.as_bytes())?;
        w.flush()?;
        Ok(())
    }
}
