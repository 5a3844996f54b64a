use std::path::{Path, PathBuf};

use anyhow::Context;
use egfr_cohort::{dataset::Dataset, presets, record::PatientRecord, subgroup::Subgroup};
use simple_excel_writer::{Row, Workbook};

use crate::{command::DatasetArg, util};

/// Excel limits worksheet names to 31 characters.
const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, derive_more::Display)]
pub(crate) enum ExportFormat {
    #[default]
    #[display("xlsx")]
    Xlsx,
    #[display("csv")]
    Csv,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
    /// Directory to write the files into (created when missing)
    #[arg(long)]
    pub(crate) out_dir: PathBuf,
    /// Spreadsheet format
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: ExportFormat,
    /// Field delimiter of CSV output
    #[arg(long, default_value_t = ';')]
    pub(crate) out_delimiter: char,
    /// Subgroups to export [default: the standard profile list]
    pub(crate) subgroups: Vec<Subgroup>,
}

pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let subgroups = if arg.subgroups.is_empty() {
        presets::profiles()
    } else {
        arg.subgroups.clone()
    };
    let delimiter = u8::try_from(arg.out_delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Invalid CSV delimiter: {:?}", arg.out_delimiter))?;

    util::ensure_dir(&arg.out_dir)?;
    for subgroup in &subgroups {
        let stem = file_stem(subgroup);
        let path = arg.out_dir.join(format!("{stem}.{}", arg.format));
        let records = dataset.select(subgroup).collect::<Vec<_>>();
        if records.is_empty() {
            log::warn!("Subgroup {subgroup} is empty; writing header only");
        }
        match arg.format {
            ExportFormat::Xlsx => write_xlsx(&path, &stem, &dataset, &records)?,
            ExportFormat::Csv => write_csv(&path, delimiter, &dataset, &records)?,
        }
        log::info!("Wrote {} rows of {subgroup} to {}", records.len(), path.display());
    }
    Ok(())
}

/// File-system and worksheet safe name of a subgroup.
fn file_stem(subgroup: &Subgroup) -> String {
    subgroup
        .name()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn write_xlsx(
    path: &Path,
    sheet_name: &str,
    dataset: &Dataset,
    records: &[&PatientRecord],
) -> anyhow::Result<()> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Output path is not valid UTF-8: {}", path.display()))?;
    let sheet_name = sheet_name
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect::<String>();

    let mut workbook = Workbook::create(path_str);
    let mut sheet = workbook.create_sheet(&sheet_name);
    workbook
        .write_sheet(&mut sheet, |writer| {
            writer.append_row(Row::from_iter(dataset.headers.iter().map(String::as_str)))?;
            for record in records {
                writer.append_row(Row::from_iter(record.fields.iter().map(String::as_str)))?;
            }
            Ok(())
        })
        .with_context(|| format!("Failed to write worksheet: {}", path.display()))?;
    workbook
        .close()
        .with_context(|| format!("Failed to save workbook: {}", path.display()))?;
    Ok(())
}

fn write_csv(
    path: &Path,
    delimiter: u8,
    dataset: &Dataset,
    records: &[&PatientRecord],
) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    writer
        .write_record(&dataset.headers)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;
    for record in records {
        writer
            .write_record(&record.fields)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use egfr_cohort::config::DatasetConfig;

    use super::*;

    const SAMPLE: &str = "\
№;EGFR type;Возр;Пол;Статус курения
1;ex19del;64;ж;не курит
2;WT;71;м;курит
3;G719X+S768I;48;ж;
";

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(&Subgroup::RareDouble), "rare-double");
        assert_eq!(
            file_stem(&Subgroup::Marker("T790M".to_owned())),
            "marker_T790M"
        );
    }

    #[test]
    fn test_csv_keeps_original_columns() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap();
        let records = dataset.select(&Subgroup::Mutated).collect::<Vec<_>>();

        let dir = std::env::temp_dir().join(format!("egfr-export-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mutated.csv");
        write_csv(&path, b';', &dataset, &records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                "№;EGFR type;Возр;Пол;Статус курения",
                "1;ex19del;64;ж;не курит",
                "3;G719X+S768I;48;ж;",
            ]
        );
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Xlsx.to_string(), "xlsx");
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
    }
}
