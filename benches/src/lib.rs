//! Fixtures for benchmarking layout chains.

use serde_json::Value;
use strata::{Content, Context, Engine, Result};

/// Returns the name of the template at the bottom of a chain.
pub fn leaf(depth: usize) -> String {
    format!("layouts/level{}", depth - 1)
}

/// Builds an engine with a chain of `depth` layouts.
///
/// `layouts/level0` declares the areas, every other level extends the one
/// below it and modifies each area once.
pub fn chain(depth: usize, areas: usize) -> Engine<'static> {
    assert!(depth > 0, "chain must have at least one level");

    let mut engine = Engine::new();
    engine.add_template("layouts/level0", move |cx: &mut Context<'_>, _: &Value| {
        let mut out = String::new();
        for n in 0..areas {
            out.push_str(&cx.declare_area(&area(n), "root")?);
        }
        out.push_str(&cx.take_inherited());
        Ok(out)
    });

    for i in 1..depth {
        let parent = format!("level{}", i - 1);
        engine.add_template(
            leaf(i + 1),
            move |cx: &mut Context<'_>, _: &Value| -> Result<String> {
                cx.extend(&parent, |cx| {
                    for n in 0..areas {
                        let name = area(n);
                        match (i + n) % 3 {
                            0 => cx.append(&name, format!(" {i}"))?,
                            1 => cx.prepend(&name, format!("{i} "))?,
                            _ => cx.append(&name, Content::block(|_| Ok(format!("<{i}>"))))?,
                        }
                    }
                    Ok(cx.take_inherited())
                })
            },
        );
    }
    engine
}

fn area(n: usize) -> String {
    format!("area{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_renders() {
        let engine = chain(3, 1);
        let result = engine.render(&leaf(3), ()).to_string().unwrap();
        // level 1 prepends, level 2 appends a block
        assert_eq!(result, "1 root<2>");
    }

    #[test]
    fn chain_single_level() {
        let engine = chain(1, 2);
        let result = engine.render(&leaf(1), ()).to_string().unwrap();
        assert_eq!(result, "rootroot");
    }
}
