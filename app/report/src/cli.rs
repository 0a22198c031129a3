//! FILENAME: app/report/src/cli.rs
// PURPOSE: Command-line arguments and their translation into a report definition.

use clap::{Parser, ValueEnum};
use crosstab_engine::{
    MaskConfig, MaskRule, NoDataGrouping, NoDataMode, NoDataSkip, ReportDefinition,
    SortDirection, SortMode, SortRequest,
};
use std::fs;
use std::path::PathBuf;
use crate::error::AppError;

#[derive(Parser, Debug, Clone)]
#[command(name = "crosstab-report", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding one sub-directory per mapset
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Layers to cross-tabulate, as name or name@mapset
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub map: Vec<String>,

    /// Units to report (mi, me, k, a, h, c, p or full names)
    #[arg(short, long, value_delimiter = ',')]
    pub units: Vec<String>,

    /// Row ordering, applied in turn; the last key is the primary one
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub sort: Vec<SortArg>,

    #[arg(long, value_enum, default_value_t = DirectionArg::Asc)]
    pub direction: DirectionArg,

    /// Raster whose cells decide which cells are excluded
    #[arg(long)]
    pub mask: Option<String>,

    /// Mask value that excludes a cell (default: no-data)
    #[arg(long, value_enum)]
    pub mask_rule: Option<MaskRuleArg>,

    /// Exclude cells whose mask value equals this category
    #[arg(long, conflicts_with = "mask_rule")]
    pub mask_value: Option<i64>,

    /// Keep only the cells the mask rule would exclude
    #[arg(long)]
    pub invert_mask: bool,

    /// Do not report cells where any layer is no-data
    #[arg(short = 'n', conflicts_with = "skip_all_no_data")]
    pub skip_any_no_data: bool,

    /// Do not report cells where every layer is no-data
    #[arg(short = 'a')]
    pub skip_all_no_data: bool,

    /// Report no-data cells under each layer's raw no-data code
    #[arg(long)]
    pub null_as_category: bool,

    /// Group a cell under the all-no-data tuple if any layer is no-data
    #[arg(long)]
    pub collapse_no_data: bool,

    /// Report definition in JSON; flags given here override it
    #[arg(long)]
    pub definition: Option<PathBuf>,

    /// Code printed for no-data cells
    #[arg(long)]
    pub null_code: Option<String>,

    /// Label printed for no-data cells
    #[arg(long)]
    pub null_label: Option<String>,

    /// Scientific notation for every unit column
    #[arg(short = 'e', long)]
    pub scientific: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Plain-text line width
    #[arg(long, default_value_t = 79)]
    pub page_width: usize,

    /// Omit the plain-text header block
    #[arg(long)]
    pub no_header: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    None,
    Count,
    Area,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MaskRuleArg {
    NoData,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => SortMode::None,
            SortArg::Count => SortMode::ByCount,
            SortArg::Area => SortMode::ByArea,
            SortArg::Category => SortMode::ByCategory,
        }
    }
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Ascending,
            DirectionArg::Desc => SortDirection::Descending,
        }
    }
}

impl Cli {
    /// Loads `--definition` if given, then applies every flag that was set.
    pub fn definition(&self) -> Result<ReportDefinition, AppError> {
        let mut definition = match &self.definition {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| AppError::Definition {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&text)?
            }
            None => ReportDefinition::new(),
        };

        if !self.units.is_empty() {
            definition.units = self.units.clone();
        }
        if !self.sort.is_empty() {
            let direction = SortDirection::from(self.direction);
            definition.sort = self
                .sort
                .iter()
                .map(|mode| SortRequest::new(SortMode::from(*mode), direction))
                .collect();
        }

        if self.skip_any_no_data {
            definition.no_data.skip = NoDataSkip::AnyLayer;
        } else if self.skip_all_no_data {
            definition.no_data.skip = NoDataSkip::AllLayers;
        }
        if self.null_as_category {
            definition.no_data.mode = NoDataMode::AsCategory;
        }
        if self.collapse_no_data {
            definition.no_data.grouping = NoDataGrouping::WholeTuple;
        }

        let rule = match (self.mask_value, self.mask_rule) {
            (Some(value), _) => Some(MaskRule::Value(value)),
            (None, Some(MaskRuleArg::Zero)) => Some(MaskRule::Zero),
            (None, Some(MaskRuleArg::NoData)) => Some(MaskRule::NoData),
            (None, None) => None,
        };
        if let Some(rule) = rule {
            definition.mask.rule = rule;
        }
        if self.invert_mask {
            definition.mask = MaskConfig {
                inverse: true,
                ..definition.mask
            };
        }

        if let Some(code) = &self.null_code {
            definition.no_data_code = code.clone();
        }
        if let Some(label) = &self.null_label {
            definition.no_data_label = label.clone();
        }
        definition.scientific |= self.scientific;

        Ok(definition)
    }
}
