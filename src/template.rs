use serde_json::Value;

use crate::{Context, Result};

/// Represents any renderable template.
///
/// Templates are the black box this crate drives: given the render
/// [`Context`] and a set of locals they produce a string. While they run they
/// call back into the context to declare and modify areas, include partials
/// and extend layouts.
///
/// [`Template`] is implemented for any function or closure with the following
/// signature, so templates are usually registered with
/// [`Engine::add_template`][crate::Engine::add_template].
///
/// ```text
/// Fn(&mut Context<'_>, &Value) -> Result<String>
/// ```
///
/// It can also be implemented for your own types, for example compiled
/// templates from another engine, and handed to a render through
/// [`Renderer::with_template_fn`][crate::Renderer::with_template_fn].
///
/// # Examples
///
/// ```
/// use strata::{Context, Result, Template};
/// use serde_json::Value;
///
/// struct Page {
///     title: &'static str,
/// }
///
/// impl Template for Page {
///     fn render(&self, cx: &mut Context<'_>, _: &Value) -> Result<String> {
///         cx.declare_area("title", self.title)
///     }
/// }
/// ```
pub trait Template: Send + Sync {
    /// Render the template within the given context.
    fn render(&self, cx: &mut Context<'_>, locals: &Value) -> Result<String>;
}

impl<F> Template for F
where
    F: Fn(&mut Context<'_>, &Value) -> Result<String> + Send + Sync,
{
    #[inline]
    fn render(&self, cx: &mut Context<'_>, locals: &Value) -> Result<String> {
        self(cx, locals)
    }
}

/// A function that looks up templates by name in a custom store.
pub(crate) type TemplateFn<'a> =
    dyn FnMut(&str) -> std::result::Result<&'a dyn Template, String> + 'a;
