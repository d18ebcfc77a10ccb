//! Display utilities

use std::fmt::{self, Display, Write};

/// Write `xs` separated with `separator`
fn sep(w: &mut impl Write, separator: &str, xs: &[impl Display]) -> fmt::Result {
    for (idx, v) in xs.iter().enumerate() {
        if idx != 0 {
            write!(w, "{}", separator)?;
        }
        write!(w, "{}", v)?;
    }
    Ok(())
}

#[inline]
pub fn commas(w: &mut impl Write, xs: &[impl Display]) -> fmt::Result {
    sep(w, ", ", xs)
}

pub fn brackets<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    write!(w, "[")?;
    middle(w)?;
    write!(w, "]")
}

#[test]
fn brackets_with_commas() {
    let mut out = String::new();
    brackets(&mut out, |w| commas(w, &[3, 2, 0])).unwrap();
    assert_eq!(out, "[3, 2, 0]");

    let mut empty = String::new();
    brackets(&mut empty, |w| commas(w, &[] as &[u32])).unwrap();
    assert_eq!(empty, "[]");
}
