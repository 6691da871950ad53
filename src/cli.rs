use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "grade-report")]
#[command(about = "Split a grade sheet into per-teacher report CSVs and prepare them for mailing")]
#[command(version)]
pub struct CliArgs {
    /// Grade sheet CSV (first line is the header, copied into every report)
    #[arg(long, short = 'g', value_name = "PATH", default_value = "data/grade.csv")]
    pub grades: PathBuf,

    /// Teacher assignment CSV: subject code, subject name, grade-level, class, group, teacher, email
    #[arg(long, short = 't', value_name = "PATH", default_value = "data/teacher.csv")]
    pub teachers: PathBuf,

    /// Mail settings (JSON, or TOML when the file ends in .toml)
    /// A missing settings file skips the mail phase
    #[arg(long, short = 's', value_name = "PATH", default_value = "data/setting.json")]
    pub settings: PathBuf,

    /// Directory for report files and error.csv
    #[arg(long, short = 'o', value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Text encoding of both input files (e.g. "big5", "windows-1252"); default UTF-8
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Start every exported CSV with a UTF-8 byte-order mark so Excel detects the encoding
    #[arg(long)]
    pub excel_bom: bool,

    /// Remove the output directory before writing (so reruns do not mix old files)
    #[arg(long)]
    pub clean: bool,

    /// Never send mail, even if the settings enable it
    #[arg(long)]
    pub no_mail: bool,

    /// Write one .eml file per recipient into this directory instead of a dry run
    #[arg(long, value_name = "DIR")]
    pub outbox: Option<PathBuf>,

    /// Write a JSON summary of the run to this path
    #[arg(long, value_name = "PATH")]
    pub json_summary: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref label) = self.encoding
            && label.trim().is_empty()
        {
            return Err("--encoding needs a label such as \"utf-8\" or \"big5\"".to_string());
        }

        if let Some(ref outbox) = self.outbox
            && outbox == &self.output_dir
        {
            return Err("--outbox must differ from --output-dir (mail files would be mixed with reports)".to_string());
        }

        if self.grades == self.teachers {
            return Err("--grades and --teachers point to the same file".to_string());
        }

        Ok(())
    }

    /// Should the mail phase run at all?
    pub fn mail_allowed(&self) -> bool {
        !self.no_mail
    }
}
