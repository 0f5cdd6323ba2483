//! Charts command - print the static size charts.

use anyhow::Result;
use clap::Args;
use fitsize_core::stages::{chart_for, SizeChart};
use fitsize_core::Gender;

use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the charts command
#[derive(Args, Clone)]
pub struct ChartsArgs {
    /// Only print the chart for this gender (0 = male, 1 = female)
    #[arg(long)]
    pub gender: Option<i64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Run the charts command.
pub fn run(args: &ChartsArgs, config: &AppConfig) -> Result<()> {
    let charts = selected(args.gender)?;
    let pretty = args.pretty || config.output.pretty.unwrap_or(false);
    JsonOutput::stdout(pretty).write(&charts)
}

fn selected(gender: Option<i64>) -> Result<Vec<&'static SizeChart>> {
    Ok(match gender {
        Some(code) => vec![chart_for(Gender::from_code(code)?)],
        None => Gender::ALL.iter().map(|g| chart_for(*g)).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_genders_by_default() {
        let charts = selected(None).unwrap();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].gender, Gender::Male);
    }

    #[test]
    fn test_single_gender() {
        let charts = selected(Some(1)).unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].pants[0].size, 26);
    }

    #[test]
    fn test_unknown_gender_rejected() {
        assert!(selected(Some(7)).is_err());
    }
}
