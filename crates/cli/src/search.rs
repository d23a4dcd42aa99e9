use crate::view::FileRow;
use modfiles_api::ResolutionOptions;
use modfiles_core::ModuleFilesTerminus;
use modfiles_core::metadata::FileMetadata;
use std::process::ExitCode;
use tabled::Table;

/// Adds the walk flags to the options forwarded to the directory expander.
pub fn with_walk_options(
    mut options: ResolutionOptions,
    recurse: Option<String>,
    ignore: Vec<String>,
) -> ResolutionOptions {
    if let Some(recurse) = recurse {
        options = options.with_option("recurse", recurse);
    }
    if !ignore.is_empty() {
        options = options.with_option("ignore", ignore);
    }
    options
}

pub fn run(
    terminus: &ModuleFilesTerminus<FileMetadata>,
    uri: &str,
    options: ResolutionOptions,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(results) = terminus.search(uri, &options)? else {
        tracing::info!("Nothing found for {}", uri);
        if json {
            println!("null");
        } else {
            println!("No module path found for {}", uri);
        }
        return Ok(ExitCode::from(1));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("{} resolved to no entries.", uri);
    } else {
        let rows: Vec<FileRow> = results.iter().map(FileRow::from_metadata).collect();
        println!("{}", Table::new(rows));
    }
    Ok(ExitCode::SUCCESS)
}
