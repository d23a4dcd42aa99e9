use modfiles_api::{Operation, ResolutionOptions};
use modfiles_core::ModuleFilesTerminus;
use modfiles_core::metadata::FileMetadata;
use std::process::ExitCode;

pub fn run(
    terminus: &ModuleFilesTerminus<FileMetadata>,
    operation: &Operation,
    uri: &str,
    options: &ResolutionOptions,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let allowed = terminus.authorized(operation, uri, options)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "operation": operation.to_string(),
                "uri": uri,
                "allowed": allowed,
            })
        );
    } else if allowed {
        println!("allowed: {} {}", operation, uri);
    } else {
        println!("denied: {} {}", operation, uri);
    }

    Ok(if allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
