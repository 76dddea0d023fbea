#![allow(dead_code)]

use sqlweave_core::{Expr, RenderOptions, SqlValue};

pub fn render(expr: &Expr, flavor: sqlweave_core::Flavor) -> (String, Vec<SqlValue>) {
    let mut gen = flavor.placeholder().generator();
    expr.build(Some(gen.as_mut()), &RenderOptions::default())
}

/// Counts the markers of a numbered flavor and checks they run 1..=n.
pub fn assert_gap_free(sql: &str, prefix: &str) -> usize {
    let mut n = 0;
    let mut rest = sql;
    while let Some(pos) = rest.find(prefix) {
        rest = &rest[pos + prefix.len()..];
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            continue;
        }
        n += 1;
        assert_eq!(digits, n.to_string(), "marker gap in: {sql}");
    }
    n
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}
