// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of `--item` values.

use cmx_domain::{LineItem, LineItemKind};
use std::str::SplitN;

fn field<'a>(fields: &mut SplitN<'a, char>, name: &str, value: &str) -> Result<&'a str, String> {
    fields
        .next()
        .map(str::trim)
        .ok_or_else(|| format!("missing {name} in '{value}'"))
}

/// Parses `KIND:QTY:PRICE:TAX:DESCRIPTION` into a line item.
///
/// `TAX` is `taxable` or `exempt`. The description is everything after the
/// fourth colon and may itself contain colons.
///
/// # Errors
///
/// Returns a message naming the first field that could not be read.
pub fn parse_line_item(value: &str) -> Result<LineItem, String> {
    let mut fields: SplitN<'_, char> = value.splitn(5, ':');

    let kind: LineItemKind = field(&mut fields, "kind", value)?
        .parse()
        .map_err(|e| format!("{e}"))?;
    let quantity: f64 = field(&mut fields, "quantity", value)?
        .parse()
        .map_err(|_| format!("quantity is not a number in '{value}'"))?;
    let unit_price: f64 = field(&mut fields, "price", value)?
        .parse()
        .map_err(|_| format!("price is not a number in '{value}'"))?;
    let is_taxable: bool = match field(&mut fields, "tax flag", value)?
        .to_ascii_lowercase()
        .as_str()
    {
        "taxable" | "tax" | "yes" | "y" => true,
        "exempt" | "notax" | "no" | "n" => false,
        other => {
            return Err(format!(
                "tax flag must be 'taxable' or 'exempt', got '{other}'"
            ));
        }
    };
    let description: String = field(&mut fields, "description", value)?.to_string();

    Ok(LineItem::new(description, quantity, unit_price, kind, is_taxable))
}
