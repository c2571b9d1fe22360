//! `llcreg show`: print the resolved register table.

use anyhow::{Context, Result};
use llcreg_emit::table::{self, TableFormat};

use super::Inputs;

pub fn run(inputs: &Inputs, format: Option<&str>) -> Result<()> {
    let layout = inputs.layout()?;
    let format = TableFormat::parse(format.unwrap_or("text"));
    let output = table::render(&layout, format).context("rendering layout table")?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
