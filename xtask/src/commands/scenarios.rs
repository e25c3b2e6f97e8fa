use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use xshell::{Shell, cmd};

#[derive(Args)]
pub struct Scenarios {
    /// Directory holding `*.toml` / `*.json` scenario files
    #[arg(long, default_value = "scenarios")]
    dir: PathBuf,
}

impl Scenarios {
    pub fn bundled() -> Self {
        Self {
            dir: PathBuf::from("scenarios"),
        }
    }

    pub fn run(&self, sh: &Shell) -> Result<()> {
        let mut files: Vec<PathBuf> = sh
            .read_dir(&self.dir)
            .with_context(|| format!("failed to list {}", self.dir.display()))?
            .into_iter()
            .filter(|p| matches!(p.extension().and_then(|e| e.to_str()), Some("toml" | "json")))
            .collect();
        files.sort();

        if files.is_empty() {
            anyhow::bail!("no scenarios found in {}", self.dir.display());
        }

        let mut failed = Vec::new();
        for file in &files {
            eprintln!("Simulating {}...", file.display());
            let output = cmd!(sh, "cargo run -p glide --quiet -- simulate {file} --format json")
                .quiet()
                .read()?;
            if !output.contains("\"settled\": true") {
                failed.push(file.display().to_string());
            }
        }

        if !failed.is_empty() {
            anyhow::bail!("scenarios did not settle: {}", failed.join(", "));
        }
        eprintln!("All {} scenarios settled", files.len());
        Ok(())
    }
}
