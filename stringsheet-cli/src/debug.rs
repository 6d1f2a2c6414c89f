use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use stringsheet::read_resource_files;

use crate::path_glob::find_resource_documents;

/// Run the debug command: read all resource documents and output the merged model as JSON.
pub fn run_debug_command(
    input_dir: &Path,
    file_name: &str,
    output: Option<&PathBuf>,
) -> Result<(), String> {
    let files = find_resource_documents(input_dir, file_name)?;
    let translations = read_resource_files(&files)
        .map_err(|e| format!("Error reading {}: {}", input_dir.display(), e))?;

    let json = serde_json::to_string_pretty(&translations)
        .map_err(|e| format!("Error serializing to JSON: {}", e))?;

    match output {
        Some(output_path) => {
            File::create(output_path)
                .and_then(|mut f| f.write_all(json.as_bytes()))
                .map_err(|e| format!("Error writing to {}: {}", output_path.display(), e))?;
            println!("✅ Debug output written to: {}", output_path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
