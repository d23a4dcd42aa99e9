use crate::view::FileRow;
use modfiles_api::ResolutionOptions;
use modfiles_core::ModuleFilesTerminus;
use modfiles_core::metadata::FileMetadata;
use std::process::ExitCode;
use tabled::Table;

pub fn run(
    terminus: &ModuleFilesTerminus<FileMetadata>,
    uri: &str,
    options: &ResolutionOptions,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(meta) = terminus.find(uri, options)? else {
        tracing::info!("Nothing found for {}", uri);
        if json {
            println!("null");
        } else {
            println!("No module file found for {}", uri);
        }
        return Ok(ExitCode::from(1));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
    } else {
        println!("{}", Table::new([FileRow::from_metadata(&meta)]));
    }
    Ok(ExitCode::SUCCESS)
}
