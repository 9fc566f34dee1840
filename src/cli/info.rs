use anyhow::{Context, Result};
use std::path::PathBuf;

use skysurvey::reader::{DatasetId, SurveyReader};

use super::Config;

/// Display information about a survey bundle
pub fn run(dir: PathBuf, config: &Config) -> Result<()> {
    let reader = SurveyReader::open_with_config(&dir, config.reader.clone())
        .with_context(|| format!("Failed to open survey bundle {}", dir.display()))?;

    println!("Bundle: {}", dir.display());
    println!();

    println!("Files:");
    for id in DatasetId::ALL {
        let meta = reader.file_metadata(id);
        println!(
            "  {:<24} {} rows, {} row groups, {} columns (format {})",
            id.file_name(),
            meta.total_rows,
            meta.num_row_groups,
            meta.schema.fields().len(),
            meta.format_version
        );
    }
    println!();

    let summary = reader.summary().context("Failed to summarize catalog")?;
    print!("{}", summary);
    Ok(())
}
