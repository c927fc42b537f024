//! One entry point per subcommand.
//!
//! Stage order for the full pipeline is fixed: ingest converts XML to JSON,
//! combine joins the records, and the drivers index and split step both read
//! what the earlier stages wrote.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info_span;

use fdb_combine::{combine, write_combined};
use fdb_ingest::{EntityKind, convert_directory};
use fdb_model::artifacts::{DRIVER_DIR, DRIVERS_FILE, PRINTER_DIR, PRINTERS_FILE};
use fdb_output::{build_driver_index, split_catalog, write_driver_index};

use crate::cli::{DataDirArgs, IngestArgs};
use crate::types::StageSummary;

pub fn run_ingest(args: &IngestArgs) -> Result<Vec<StageSummary>> {
    let span = info_span!("ingest", source = %args.source.display());
    let _guard = span.enter();
    let data_dir = &args.data.data_dir;

    let printer_output = data_dir.join(PRINTER_DIR);
    let printer_stats = convert_directory(
        &args.source.join(PRINTER_DIR),
        &printer_output,
        EntityKind::Printer,
    )
    .context("convert printer xml")?;

    let driver_output = data_dir.join(DRIVER_DIR);
    let driver_stats = convert_directory(
        &args.source.join(DRIVER_DIR),
        &driver_output,
        EntityKind::Driver,
    )
    .context("convert driver xml")?;

    Ok(vec![
        StageSummary {
            stage: "ingest printers".to_string(),
            records: printer_stats.converted,
            skipped: printer_stats.skipped,
            output: printer_output,
        },
        StageSummary {
            stage: "ingest drivers".to_string(),
            records: driver_stats.converted,
            skipped: driver_stats.skipped,
            output: driver_output,
        },
    ])
}

pub fn run_combine(args: &DataDirArgs) -> Result<Vec<StageSummary>> {
    Ok(vec![combine_stage(&args.data_dir)?])
}

pub fn run_drivers(args: &DataDirArgs) -> Result<Vec<StageSummary>> {
    Ok(vec![drivers_stage(&args.data_dir)?])
}

pub fn run_split(args: &DataDirArgs) -> Result<Vec<StageSummary>> {
    Ok(vec![split_stage(&args.data_dir)?])
}

pub fn run_generate(args: &IngestArgs) -> Result<Vec<StageSummary>> {
    let mut stages = run_ingest(args)?;
    let data_dir = &args.data.data_dir;
    stages.push(combine_stage(data_dir)?);
    stages.push(drivers_stage(data_dir)?);
    stages.push(split_stage(data_dir)?);
    Ok(stages)
}

fn combine_stage(data_dir: &Path) -> Result<StageSummary> {
    let span = info_span!("combine", data_dir = %data_dir.display());
    let _guard = span.enter();

    let printers = combine(&data_dir.join(PRINTER_DIR), &data_dir.join(DRIVER_DIR))
        .context("combine printer and driver records")?;
    let records = printers.len();
    let output = data_dir.join(PRINTERS_FILE);
    write_combined(&output, printers).context("write combined catalog")?;

    Ok(StageSummary {
        stage: "combine".to_string(),
        records,
        skipped: 0,
        output,
    })
}

fn drivers_stage(data_dir: &Path) -> Result<StageSummary> {
    let span = info_span!("drivers", data_dir = %data_dir.display());
    let _guard = span.enter();

    let index = build_driver_index(&data_dir.join(DRIVER_DIR)).context("build driver index")?;
    let output = data_dir.join(DRIVERS_FILE);
    write_driver_index(&output, &index).context("write driver index")?;

    Ok(StageSummary {
        stage: "drivers index".to_string(),
        records: index.len(),
        skipped: 0,
        output,
    })
}

fn split_stage(data_dir: &Path) -> Result<StageSummary> {
    let span = info_span!("split", data_dir = %data_dir.display());
    let _guard = span.enter();

    let stats =
        split_catalog(&data_dir.join(PRINTERS_FILE), data_dir).context("split catalog")?;

    Ok(StageSummary {
        stage: "split".to_string(),
        records: stats.records,
        skipped: 0,
        output: stats.index_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdb_model::{PrinterCatalog, PrinterIndex};
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    /// End to end over a tiny source tree: every artifact exists and the
    /// counts line up across stages.
    #[test]
    fn test_generate_pipeline() {
        let source = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();

        write_file(
            &source.path().join(PRINTER_DIR),
            "HP-LaserJet_4.xml",
            r#"<printer id="printer/HP-LaserJet_4">
                 <make>HP</make>
                 <model>LaserJet 4</model>
                 <mechanism><laser/></mechanism>
                 <functionality>A</functionality>
                 <driver>ljet4</driver>
               </printer>"#,
        );
        write_file(
            &source.path().join(DRIVER_DIR),
            "ljet4.xml",
            r#"<driver id="driver/ljet4">
                 <name>ljet4</name>
                 <printers><printer><id>printer/HP-LaserJet_4</id></printer></printers>
               </driver>"#,
        );
        write_file(
            &source.path().join(DRIVER_DIR),
            "orphan.xml",
            r#"<driver id="driver/orphan">
                 <name>orphan</name>
                 <printers><printer>printer/Canon-BJC-85</printer></printers>
               </driver>"#,
        );

        let args = IngestArgs {
            source: source.path().to_path_buf(),
            data: DataDirArgs {
                data_dir: data.path().to_path_buf(),
            },
        };
        let stages = run_generate(&args).unwrap();
        assert_eq!(stages.len(), 5);

        let catalog: PrinterCatalog = serde_json::from_str(
            &std::fs::read_to_string(data.path().join(PRINTERS_FILE)).unwrap(),
        )
        .unwrap();
        // One real printer plus the synthesized Canon placeholder.
        assert_eq!(catalog.printers.len(), 2);

        let index: PrinterIndex = serde_json::from_str(
            &std::fs::read_to_string(data.path().join("printersMap.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(index.printers.len(), catalog.printers.len());
        assert!(data.path().join("printers/HP-LaserJet_4.json").exists());
        assert!(data.path().join("printers/Canon-BJC-85.json").exists());
        assert!(data.path().join(DRIVERS_FILE).exists());
    }
}
