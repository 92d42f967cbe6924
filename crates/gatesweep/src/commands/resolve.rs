use anyhow::Context;
use colored::Colorize;
use gatesweep_config::Settings;
use gatesweep_core::{CompiledTemplate, resolve_stage_name};
use std::path::PathBuf;

pub fn handle(settings: &Settings, template: Option<PathBuf>) -> anyhow::Result<()> {
    let path = template.unwrap_or_else(|| settings.template_path());
    let template = CompiledTemplate::load(&path)
        .with_context(|| format!("Cannot load compiled template {}", path.display()))?;

    match resolve_stage_name(&template) {
        Some(stage) => println!("{}", stage),
        None => eprintln!(
            "{}",
            "No API Gateway stage declared in the compiled template".yellow()
        ),
    }

    Ok(())
}
