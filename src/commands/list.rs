use crate::args::ListArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult, Result};
use crate::output::OutputDir;
use crate::Config;
use std::path::PathBuf;

/// Handles the `budget-charts list` command.
pub fn list(config: Config, args: &ListArgs) -> Result<Out<Vec<PathBuf>>> {
    let output = OutputDir::new(args.output_dir().unwrap_or(config.output_dir()));
    let charts = output.charts().pub_result(ErrorType::Io)?;
    let mut message = format!(
        "{} charts in '{}'",
        charts.len(),
        output.path().display()
    );
    for chart in &charts {
        if let Some(name) = chart.file_name() {
            message.push_str(&format!("\n  {}", name.to_string_lossy()));
        }
    }
    Ok(Out::new(message, charts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_list_sorted_by_name() {
        let env = TestEnv::new();
        let dir = env.make_dir("output");
        for name in ["March-expenses.png", "January-deposits.png", "February-expenses.png"] {
            std::fs::write(dir.join(name), "x").unwrap();
        }
        let out = list(Config::default(), &ListArgs::new(Some(dir.clone()))).unwrap();
        let names: Vec<String> = out
            .structure()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            ["February-expenses.png", "January-deposits.png", "March-expenses.png"]
        );
        assert!(out.message().starts_with("3 charts"));
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let env = TestEnv::new();
        let config = Config::default().with_output_dir(env.root().join("never-created"));
        let out = list(config, &ListArgs::new(None)).unwrap();
        assert!(out.structure().unwrap().is_empty());
    }
}
