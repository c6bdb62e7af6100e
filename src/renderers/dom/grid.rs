//! Grid (table) builder

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Node};

use super::helpers::{append, create_with_class};
use crate::html_layout::grid::{GridRow, ALTERNATE_ROW_CLASS};
use crate::html_layout::GridTable;
use crate::models::GridElement;
use crate::renderers::context::RenderContext;

pub fn build_grid(ctx: &Rc<RenderContext>, element: &GridElement) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();
    let table_model = GridTable::from_element(element);

    let table = create_with_class(document, "table", "grid-element")?;

    if let Some(header) = &table_model.header {
        let thead = document.create_element("thead")?;
        append(&thead, &build_row(document, header, "th")?)?;
        append(&table, &thead)?;
    }

    let tbody = document.create_element("tbody")?;
    for row in &table_model.body {
        append(&tbody, &build_row(document, row, "td")?)?;
    }
    append(&table, &tbody)?;

    Ok(table)
}

fn build_row(document: &Document, row: &GridRow, cell_tag: &str) -> Result<Node, JsValue> {
    let tr = document.create_element("tr")?;
    if row.alternate {
        tr.set_class_name(ALTERNATE_ROW_CLASS);
    }
    for cell in &row.cells {
        let el = document.create_element(cell_tag)?;
        if let Some(class) = cell.class_name() {
            el.set_class_name(class);
        }
        el.set_text_content(Some(&cell.text));
        append(&tr, &el)?;
    }
    Ok(tr.into())
}
