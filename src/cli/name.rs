//! Name command: preview a generated webhook name

use serde::Serialize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::output::json;
use crate::provision::generate_webhook_name;

#[derive(Serialize)]
struct GeneratedName<'a> {
    app_name: &'a str,
    webhook_name: String,
}

/// Run the name command
pub fn run(opts: &GlobalOptions, app_name: &str) -> Result<()> {
    let webhook_name = generate_webhook_name(app_name);

    match opts.format {
        OutputFormat::Table => println!("{}", webhook_name),
        OutputFormat::Json => println!(
            "{}",
            json::format_json(&GeneratedName {
                app_name,
                webhook_name,
            })?
        ),
    }

    Ok(())
}
