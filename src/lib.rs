//! Layered content areas for multi-level template inheritance.
//!
//! Layouts declare named *areas* of output. Templates that extend a layout
//! modify those areas, appending, prepending, replacing or purging their
//! content, without redeclaring the layout's structure. Layouts can extend
//! other layouts, to any depth.
//!
//! This crate is not a templating language. Templates are plain Rust
//! functions or closures, or anything else implementing [`Template`], so it
//! can sit on top of whatever produces your markup. What it provides is the
//! bookkeeping that makes the ordering come out right: a child template runs
//! *before* the layout it extends, so its modifications are recorded and only
//! replayed when the layout declares the area, outermost layout first.
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the
//! templates and a few settings. Generally, you only need to construct one
//! engine during the lifetime of a program.
//!
//! ```
//! let engine = strata::Engine::new();
//! ```
//!
//! Next, [`.add_template`][Engine::add_template] is used to store a template
//! in the engine. Templates receive the render [`Context`] and their locals.
//! Layouts declare areas using [`Context::declare_area`] and place the body
//! of the template extending them using [`Context::take_inherited`].
//!
//! ```
//! use strata::Context;
//! use serde_json::Value;
//!
//! # let mut engine = strata::Engine::new();
//! engine.add_template("layouts/global", |cx: &mut Context<'_>, _: &Value| {
//!     let title = cx.declare_area("title", "MySite.com")?;
//!     let sidebar = cx.declare_area("sidebar", "<h2>About</h2>")?;
//!     let body = cx.take_inherited();
//!     Ok(format!("<title>{title}</title><main>{body}</main><aside>{sidebar}</aside>"))
//! });
//! ```
//!
//! Templates extend a layout with [`Context::extend`]. Layout names without
//! a `/` are looked up under `layouts/`. Inside the body the areas declared
//! by the layout can be modified.
//!
//! ```
//! # use strata::Context;
//! # use serde_json::Value;
//! # let mut engine = strata::Engine::new();
//! engine.add_template("layouts/admin", |cx: &mut Context<'_>, _: &Value| {
//!     cx.extend("global", |cx| {
//!         cx.prepend("title", "Admin :: ")?;
//!         cx.replace("sidebar", "<h2>Quick Links</h2>")?;
//!         Ok(cx.take_inherited())
//!     })
//! });
//!
//! engine.add_template("posts/index", |cx: &mut Context<'_>, locals: &Value| {
//!     cx.extend("admin", |cx| {
//!         cx.prepend("title", "Posts :: ")?;
//!         Ok(format!("<p>{} posts</p>", locals["count"]))
//!     })
//! });
//! ```
//!
//! Finally, the template is rendered using [`.render`][Engine::render]. Any
//! [`serde`] serializable value can be passed as the render data.
//!
//! ```
//! # use strata::Context;
//! # use serde_json::Value;
//! # let mut engine = strata::Engine::new();
//! # engine.add_template("layouts/global", |cx: &mut Context<'_>, _: &Value| {
//! #     let title = cx.declare_area("title", "MySite.com")?;
//! #     let sidebar = cx.declare_area("sidebar", "<h2>About</h2>")?;
//! #     let body = cx.take_inherited();
//! #     Ok(format!("<title>{title}</title><main>{body}</main><aside>{sidebar}</aside>"))
//! # });
//! # engine.add_template("layouts/admin", |cx: &mut Context<'_>, _: &Value| {
//! #     cx.extend("global", |cx| {
//! #         cx.prepend("title", "Admin :: ")?;
//! #         cx.replace("sidebar", "<h2>Quick Links</h2>")?;
//! #         Ok(cx.take_inherited())
//! #     })
//! # });
//! # engine.add_template("posts/index", |cx: &mut Context<'_>, locals: &Value| {
//! #     cx.extend("admin", |cx| {
//! #         cx.prepend("title", "Posts :: ")?;
//! #         Ok(format!("<p>{} posts</p>", locals["count"]))
//! #     })
//! # });
//! let result = engine
//!     .render("posts/index", serde_json::json!({ "count": 3 }))
//!     .to_string()?;
//!
//! assert_eq!(
//!     result,
//!     "<title>Posts :: Admin :: MySite.com</title>\
//!      <main><p>3 posts</p></main>\
//!      <aside><h2>Quick Links</h2></aside>"
//! );
//! # Ok::<(), strata::Error>(())
//! ```
//!
//! # Escaping
//!
//! Content is never escaped. Area content is assembled from the strings
//! templates hand in, so templates must escape untrusted data themselves.
//!
//! # Logging
//!
//! Renders emit [`tracing`] spans and events: one span per render, a `debug`
//! event for every extended layout and rendered area and a `trace` event for
//! every recorded instruction. No subscriber is installed by this crate.

mod area;
mod content;
mod error;
mod render;
mod template;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

pub use crate::content::Content;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::render::{Context, Renderer};
pub use crate::template::Template;

use serde_json::Value;

/// The template store and rendering engine.
pub struct Engine<'engine> {
    templates: BTreeMap<Cow<'engine, str>, Box<dyn Template + 'engine>>,
    layout_namespace: Cow<'engine, str>,
    max_template_depth: usize,
}

/// A reference to a template stored in an [`Engine`].
#[derive(Clone, Copy)]
pub struct TemplateRef<'engine> {
    engine: &'engine Engine<'engine>,
    name: &'engine str,
    template: &'engine dyn Template,
}

impl Default for Engine<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'engine> Engine<'engine> {
    /// Construct a new engine.
    #[inline]
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            layout_namespace: Cow::Borrowed("layouts"),
            max_template_depth: 64,
        }
    }

    /// Set the namespace that layout names without a `/` are looked up in.
    ///
    /// Defaults to `layouts`, so extending `"admin"` renders the template
    /// named `"layouts/admin"`. An empty namespace uses layout names as is.
    #[inline]
    pub fn set_layout_namespace<N>(&mut self, namespace: N)
    where
        N: Into<Cow<'engine, str>>,
    {
        let namespace = namespace.into();
        self.layout_namespace = match namespace.strip_suffix('/') {
            Some(s) => Cow::Owned(s.to_owned()),
            None => namespace,
        };
    }

    /// Set the maximum number of nested templates in a render.
    ///
    /// Defaults to 64. See
    /// [`Renderer::with_max_template_depth`] for details.
    #[inline]
    pub fn set_max_template_depth(&mut self, depth: usize) {
        self.max_template_depth = depth;
    }

    /// Add a template to the engine.
    ///
    /// The template is stored under the given name, replacing any template
    /// with the same name. Layouts are usually named `layouts/<name>`.
    #[inline]
    pub fn add_template<N, F>(&mut self, name: N, f: F)
    where
        N: Into<Cow<'engine, str>>,
        F: Fn(&mut Context<'_>, &Value) -> Result<String> + Send + Sync + 'engine,
    {
        self.templates.insert(name.into(), Box::new(f));
    }

    /// Remove a template from the engine.
    #[inline]
    pub fn remove_template(&mut self, name: &str) {
        self.templates.remove(name);
    }

    /// Lookup a template by name.
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<TemplateRef<'_>> {
        self.templates
            .get_key_value(name)
            .map(|(name, template)| TemplateRef {
                engine: self,
                name: &**name,
                template: &**template,
            })
    }

    /// Render a template by name using the provided value.
    ///
    /// Each call renders with a fresh [`Context`]. If no template with the
    /// name exists the returned renderer fails when it is run.
    #[inline]
    pub fn render<S>(&self, name: &str, ctx: S) -> Renderer<'_>
    where
        S: serde::Serialize,
    {
        Renderer::with_name(self, name, ctx)
    }
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("templates", &self.templates.keys())
            .field("layout_namespace", &self.layout_namespace)
            .field("max_template_depth", &self.max_template_depth)
            .finish()
    }
}

impl<'engine> TemplateRef<'engine> {
    /// Render the template using the provided value.
    #[inline]
    pub fn render<S>(&self, ctx: S) -> Renderer<'engine>
    where
        S: serde::Serialize,
    {
        Renderer::with_template(self.engine, self.name, self.template, ctx)
    }

    /// Returns the name the template is stored under.
    #[inline]
    pub fn name(&self) -> &'engine str {
        self.name
    }
}

impl fmt::Debug for TemplateRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
