//! Defines [`Content`], the literal-or-block argument taken by area operations.

use std::borrow::Cow;
use std::fmt;

use crate::{Context, Result};

type BlockFn<'a, 'render> = dyn FnOnce(&mut Context<'render>) -> Result<String> + 'a;

/// Content handed to an area operation.
///
/// Content is either nothing, a literal string, or a block that produces the
/// string when the operation runs. Blocks receive the render [`Context`] so
/// they can record their own area instructions or include partials.
///
/// Most of the time you won't construct this directly: string types and
/// options convert into it.
///
/// ```
/// # use strata::{Content, Context, Result};
/// # fn f(cx: &mut Context<'_>) -> Result<()> {
/// cx.append("title", " is awesome")?;
/// cx.append("sidebar", Content::block(|cx| cx.include("sidebar/links")))?;
/// # Ok(())
/// # }
/// ```
pub enum Content<'a, 'render> {
    /// No content. Declaring an area with this seeds nothing.
    Empty,

    /// A literal string.
    Literal(Cow<'a, str>),

    /// A block run when the operation is performed.
    Block(Box<BlockFn<'a, 'render>>),
}

impl<'a, 'render> Content<'a, 'render> {
    /// Construct content from a block.
    pub fn block<F>(f: F) -> Self
    where
        F: FnOnce(&mut Context<'render>) -> Result<String> + 'a,
    {
        Self::Block(Box::new(f))
    }

    /// Set a block on this content.
    ///
    /// The block takes precedence: any literal already set is dropped
    /// without being used.
    pub fn with_block<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut Context<'render>) -> Result<String> + 'a,
    {
        Self::block(f)
    }

    /// Resolves the content to a plain string, running the block if any.
    pub(crate) fn resolve(self, cx: &mut Context<'render>) -> Result<Option<String>> {
        match self {
            Self::Empty => Ok(None),
            Self::Literal(s) => Ok(Some(s.into_owned())),
            Self::Block(f) => cx.capture(f).map(Some),
        }
    }
}

impl Default for Content<'_, '_> {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Debug for Content<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Block(_) => f.write_str("Block(<fn>)"),
        }
    }
}

impl<'a> From<&'a str> for Content<'a, '_> {
    fn from(s: &'a str) -> Self {
        Self::Literal(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Content<'a, '_> {
    fn from(s: &'a String) -> Self {
        Self::Literal(Cow::Borrowed(s))
    }
}

impl From<String> for Content<'_, '_> {
    fn from(s: String) -> Self {
        Self::Literal(Cow::Owned(s))
    }
}

impl<'a> From<Cow<'a, str>> for Content<'a, '_> {
    fn from(s: Cow<'a, str>) -> Self {
        Self::Literal(s)
    }
}

impl<'a, 'render, T> From<Option<T>> for Content<'a, 'render>
where
    T: Into<Content<'a, 'render>>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Self::Empty)
    }
}
