#![allow(dead_code)]

mod writer;

use serde_json::Value;
use strata::{Content, Context, Engine, Result};

pub use self::writer::Writer;

/// Renders a single template with no data.
pub fn render_fn<F>(f: F) -> Result<String>
where
    F: Fn(&mut Context<'_>, &Value) -> Result<String> + Send + Sync + 'static,
{
    let mut engine = Engine::new();
    engine.add_template("test", f);
    engine.render("test", ()).to_string()
}

/// Formats the output of the `layouts/nestive` layout.
pub fn page(title: &str, empty: &str, some: &str, body: &str) -> String {
    format!(
        "<title>{title}</title>\
         <div id=\"empty-area\">{empty}</div>\
         <div id=\"some-area\">{some}</div>\
         <p>{body}</p>"
    )
}

/// Returns an engine with a small site of layouts and partials.
pub fn site() -> Engine<'static> {
    let mut engine = Engine::new();
    engine.add_template("layouts/nestive", nestive);
    engine.add_template("extended/one", extended_one);
    engine.add_template("extended/two", extended_two);
    engine.add_template("layouts/locals", locals);
    engine.add_template("features/basic", features_basic);
    engine.add_template("features/extended", features_extended);
    engine.add_template("features/item", features_item);
    engine
}

fn nestive(cx: &mut Context<'_>, _: &Value) -> Result<String> {
    let title = cx.declare_area("title", "Nestive")?;
    let empty = cx.declare_area("empty-area", Content::Empty)?;
    let some = cx.declare_area(
        "some-area",
        Content::block(|_| Ok(String::from("Some content"))),
    )?;
    let body = cx.take_inherited();
    Ok(page(&title, &empty, &some, &body))
}

fn extended_one(cx: &mut Context<'_>, _: &Value) -> Result<String> {
    cx.extend("nestive", |cx| {
        cx.replace("title", "extended: one")?;
        Ok(format!("<h2>extended: one</h2>{}", cx.take_inherited()))
    })
}

fn extended_two(cx: &mut Context<'_>, _: &Value) -> Result<String> {
    cx.extend("extended/one", |cx| {
        cx.replace("some-area", "extended: two")?;
        Ok(cx.take_inherited())
    })
}

fn locals(cx: &mut Context<'_>, locals: &Value) -> Result<String> {
    cx.extend("nestive", |cx| {
        cx.replace("title", locals["title"].as_str())?;
        cx.replace("some-area", format!("locals: {}", locals["area"].as_str().unwrap_or("")))?;
        Ok(cx.take_inherited())
    })
}

fn features_basic(cx: &mut Context<'_>, _: &Value) -> Result<String> {
    let basic = cx.declare_area("basic-features", Content::Empty)?;
    let extended = cx.declare_area("extended-features", Content::Empty)?;
    Ok(format!(
        "<h1>Features</h1>\
         <div id=\"basic-features\">{basic}</div>\
         <div id=\"extended-features\">{extended}</div>"
    ))
}

fn features_extended(cx: &mut Context<'_>, _: &Value) -> Result<String> {
    cx.extend("features/basic", |cx| {
        cx.replace("basic-features", "Basic Features")?;
        cx.replace("extended-features", "Extended Features")?;
        Ok(String::new())
    })
}

fn features_item(cx: &mut Context<'_>, locals: &Value) -> Result<String> {
    let n = locals["n"].as_i64().unwrap_or(0);
    cx.append("basic-features", format!("<i>Basic Features {n}</i>"))?;
    Ok(String::new())
}
