use std::borrow::Cow;
use std::mem;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::area::{self, Instruction, Ledger, Op};
use crate::render::locals;
use crate::template::TemplateFn;
use crate::{Content, Engine, Error, Result, Template};

/// The state of a single render.
///
/// A context is created fresh for every call to
/// [`Renderer::to_string`][crate::Renderer::to_string] or
/// [`Renderer::to_writer`][crate::Renderer::to_writer] and dropped when it
/// returns, so nothing recorded in one render can leak into another. It is
/// passed to every template and block, which use it to declare and modify
/// areas and to extend layouts.
///
/// # Areas
///
/// Layouts declare areas with [`declare_area`][Context::declare_area].
/// Templates that extend a layout modify those areas with
/// [`append`][Context::append], [`prepend`][Context::prepend],
/// [`replace`][Context::replace] and [`purge`][Context::purge]. Because a
/// child template runs before the layout it extends, modifications are
/// recorded and only replayed when the layout declares the area. Replay
/// applies the outermost layout's content first and the innermost child's
/// modifications last, no matter how many layouts are in between.
///
/// # Examples
///
/// ```
/// use strata::{Context, Engine};
///
/// let mut engine = Engine::new();
/// engine.add_template("layouts/global", |cx: &mut Context<'_>, _: &_| {
///     let title = cx.declare_area("title", "Site")?;
///     Ok(format!("<title>{title}</title>{}", cx.take_inherited()))
/// });
/// engine.add_template("posts/index", |cx: &mut Context<'_>, _: &_| {
///     cx.extend("global", |cx| {
///         cx.prepend("title", "Posts :: ")?;
///         Ok(String::from("<p>posts</p>"))
///     })
/// });
///
/// let result = engine.render("posts/index", ()).to_string()?;
/// assert_eq!(result, "<title>Posts :: Site</title><p>posts</p>");
/// # Ok::<(), strata::Error>(())
/// ```
pub struct Context<'render> {
    engine: &'render Engine<'render>,
    template_fn: Option<Box<TemplateFn<'render>>>,
    max_template_depth: usize,
    globals: Rc<Value>,
    ledger: Ledger,
    /// The captured body of the child being extended.
    inherited: Option<String>,
    /// The current recording segment, advanced whenever an extended layout
    /// starts or finishes rendering.
    segment: usize,
    /// The number of templates currently rendering.
    depth: usize,
}

impl<'render> Context<'render> {
    pub(crate) fn new(
        engine: &'render Engine<'render>,
        template_fn: Option<Box<TemplateFn<'render>>>,
        max_template_depth: usize,
        globals: Value,
    ) -> Self {
        Self {
            engine,
            template_fn,
            max_template_depth,
            globals: Rc::new(globals),
            ledger: Ledger::new(),
            inherited: None,
            segment: 0,
            depth: 0,
        }
    }

    /// Returns the data the render was started with.
    pub fn globals(&self) -> &Value {
        &self.globals
    }

    ////////////////////////////////////////////////////////////////////////
    // Areas
    ////////////////////////////////////////////////////////////////////////

    /// Declare an area and return its final content.
    ///
    /// The given content, if any, seeds the area. Then all instructions
    /// recorded for the area by this template and by the templates
    /// extending it are replayed.
    ///
    /// An area that nothing contributed to renders as an empty string.
    ///
    /// # Errors
    ///
    /// If the area was already declared in this render, or if the content
    /// block fails.
    pub fn declare_area<'a, C>(&mut self, name: &str, content: C) -> Result<String>
    where
        C: Into<Content<'a, 'render>>,
    {
        if self.ledger.is_declared(name) {
            return Err(Error::area_redeclared(name));
        }
        self.instruct(name, Op::Append, content.into())?;
        if !self.ledger.mark_declared(name) {
            return Err(Error::area_redeclared(name));
        }
        let instrs = self.ledger.instructions(name);
        debug!(area = name, instructions = instrs.len(), "rendering area");
        Ok(area::replay(instrs))
    }

    /// Append content to an area declared by a layout.
    pub fn append<'a, C>(&mut self, name: &str, content: C) -> Result<()>
    where
        C: Into<Content<'a, 'render>>,
    {
        self.instruct(name, Op::Append, content.into())
    }

    /// Prepend content to an area declared by a layout.
    pub fn prepend<'a, C>(&mut self, name: &str, content: C) -> Result<()>
    where
        C: Into<Content<'a, 'render>>,
    {
        self.instruct(name, Op::Prepend, content.into())
    }

    /// Replace the content of an area declared by a layout.
    ///
    /// Content from the layouts being extended is discarded, content added
    /// after this by templates extending this one is kept.
    pub fn replace<'a, C>(&mut self, name: &str, content: C) -> Result<()>
    where
        C: Into<Content<'a, 'render>>,
    {
        self.instruct(name, Op::Replace, content.into())
    }

    /// Purge the content of the given areas.
    ///
    /// This is the same as replacing each area with empty content.
    pub fn purge<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.record(name.as_ref(), Op::Replace, None);
        }
    }

    fn instruct(&mut self, name: &str, op: Op, content: Content<'_, 'render>) -> Result<()> {
        let content = content.resolve(self)?;
        self.record(name, op, content);
        Ok(())
    }

    fn record(&mut self, name: &str, op: Op, content: Option<String>) {
        trace!(area = name, ?op, segment = self.segment, "recording instruction");
        self.ledger.record(
            name,
            Instruction {
                op,
                segment: self.segment,
                content,
            },
        );
    }

    ////////////////////////////////////////////////////////////////////////
    // Templates
    ////////////////////////////////////////////////////////////////////////

    /// Run a block and return its output instead of emitting it.
    #[inline]
    pub fn capture<F>(&mut self, f: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<String>,
    {
        f(self)
    }

    /// Extend a layout.
    ///
    /// The body is run first and its output is staged for the layout, which
    /// retrieves it with [`take_inherited`][Context::take_inherited]. Then
    /// the layout is rendered and its output is returned. Area instructions
    /// recorded by the body, including those of any partials it includes,
    /// are replayed after the layout's own.
    ///
    /// A layout name without a `/` is looked up in the engine's layout
    /// namespace, so `"admin"` renders `"layouts/admin"` by default.
    ///
    /// The layout receives the render globals as its locals.
    pub fn extend<F>(&mut self, layout: &str, body: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<String>,
    {
        let locals = Rc::clone(&self.globals);
        self.extend_impl(layout, &locals, body)
    }

    /// Extend a layout, passing extra locals to it.
    ///
    /// If the locals serialize to a map they are merged over the render
    /// globals, otherwise they replace them.
    pub fn extend_with<S, F>(&mut self, layout: &str, locals: S, body: F) -> Result<String>
    where
        S: serde::Serialize,
        F: FnOnce(&mut Self) -> Result<String>,
    {
        let locals = locals::merge(&self.globals, serde_json::to_value(locals)?);
        self.extend_impl(layout, &locals, body)
    }

    fn extend_impl<F>(&mut self, layout: &str, locals: &Value, body: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<String>,
    {
        let path = self.layout_path(layout);
        let body = self.capture(body)?;
        let prev = mem::replace(&mut self.inherited, Some(body));

        self.segment += 1;
        debug!(layout = %path, segment = self.segment, "extending layout");
        let result = self.render_template(&path, locals);
        self.segment += 1;

        // The layout owned the staged body, anything staged before the
        // extension is still pending for the template that staged it.
        self.inherited = prev;
        result
    }

    /// Take the body captured from the template extending this one.
    ///
    /// The body is handed out once, later calls return an empty string.
    pub fn take_inherited(&mut self) -> String {
        self.inherited.take().unwrap_or_default()
    }

    /// Render another template.
    ///
    /// The template shares this context, so it can declare or modify areas
    /// and extend other templates. It receives the render globals as its
    /// locals.
    pub fn include(&mut self, name: &str) -> Result<String> {
        let locals = Rc::clone(&self.globals);
        self.render_template(name, &locals)
    }

    /// Render another template with extra locals.
    ///
    /// See [`include`][Context::include] and
    /// [`extend_with`][Context::extend_with].
    pub fn include_with<S>(&mut self, name: &str, locals: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        let locals = locals::merge(&self.globals, serde_json::to_value(locals)?);
        self.render_template(name, &locals)
    }

    pub(crate) fn render_root(&mut self, name: &str) -> Result<String> {
        let locals = Rc::clone(&self.globals);
        self.render_template(name, &locals)
    }

    pub(crate) fn render_root_template(
        &mut self,
        name: &str,
        template: &'render dyn Template,
    ) -> Result<String> {
        let locals = Rc::clone(&self.globals);
        self.render_one(name, template, &locals)
    }

    fn render_template(&mut self, name: &str, locals: &Value) -> Result<String> {
        let template = self.get_template(name)?;
        self.render_one(name, template, locals)
    }

    fn render_one(
        &mut self,
        name: &str,
        template: &'render dyn Template,
        locals: &Value,
    ) -> Result<String> {
        if self.depth >= self.max_template_depth {
            return Err(Error::max_template_depth(self.max_template_depth));
        }
        self.depth += 1;
        let result = template.render(self, locals);
        self.depth -= 1;
        result.map_err(|err| err.with_template_name(name))
    }

    fn get_template(&mut self, name: &str) -> Result<&'render dyn Template> {
        let engine = self.engine;
        match &mut self.template_fn {
            Some(template_fn) => {
                template_fn(name).map_err(|err| Error::template_store(name, err))
            }
            None => engine
                .templates
                .get(name)
                .map(|t| &**t as &'render dyn Template)
                .ok_or_else(|| Error::unknown_template(name)),
        }
    }

    fn layout_path<'a>(&self, layout: &'a str) -> Cow<'a, str> {
        let namespace = &self.engine.layout_namespace;
        if layout.contains('/') || namespace.is_empty() {
            Cow::Borrowed(layout)
        } else {
            Cow::Owned(format!("{namespace}/{layout}"))
        }
    }
}
