//! Command execution.

use crate::xml;
use crate::Commands;
use colored::Colorize;
use docflow_core::{discover, LoadStatus, TransitQuery, Workflow};
use std::fmt::Write as _;
use std::path::Path;

/// Executes a command and returns the formatted output.
pub async fn execute(cmd: Commands) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Convert { input, output } => {
            let source = tokio::fs::read_to_string(&input).await?;
            let value = xml::convert_str(&source)?;
            let json = serde_json::to_string_pretty(&value)?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, json.as_bytes()).await?;
                    Ok(format!("{} {}", "Wrote".green(), path.display()))
                }
                None => Ok(json),
            }
        }

        Commands::Inspect { file } => {
            let workflow = load_checked(&file).await?;
            let info = workflow.type_info();

            let mut out = String::new();
            writeln!(
                out,
                "{}",
                format!("{}/{} ({})", info.doctype.cyan(), info.subtype, info.status).bold()
            )?;
            if let Some(checksum) = workflow.checksum() {
                writeln!(out, "checksum: {}", checksum)?;
            }
            if let Some(module_path) = workflow.module_path() {
                writeln!(out, "module path: {}", module_path)?;
            }

            writeln!(out, "\n{}", "States".bold())?;
            for state in workflow.states() {
                writeln!(
                    out,
                    "  {} ({})",
                    state.name.cyan(),
                    state.title.as_deref().unwrap_or("-")
                )?;
            }

            writeln!(out, "\n{}", "Transitions".bold())?;
            for transition in workflow.transitions() {
                let mut notes = Vec::new();
                if transition.by_system {
                    notes.push("system".to_string());
                }
                if let Some(hook) = &transition.pre_transit {
                    notes.push(format!("pre: {}", hook));
                }
                if let Some(hook) = &transition.post_transit {
                    notes.push(format!("post: {}", hook));
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", notes.join(", "))
                };
                writeln!(
                    out,
                    "  {}: {} -> {}{}",
                    transition.name.cyan(),
                    transition.from,
                    transition.to,
                    suffix
                )?;
            }

            Ok(out.trim_end().to_string())
        }

        Commands::Check { file } => {
            let workflow = load_checked(&file).await?;
            let warnings = workflow.lint();

            if warnings.is_empty() {
                Ok(format!("{} {}", file.display(), "valid".green()))
            } else {
                let mut out = String::new();
                writeln!(
                    out,
                    "{} {} ({} warning(s))",
                    file.display(),
                    "valid".green(),
                    warnings.len()
                )?;
                for warning in warnings {
                    writeln!(out, "  {} {}", "warning:".yellow(), warning)?;
                }
                Ok(out.trim_end().to_string())
            }
        }

        Commands::Discover { dir } => {
            tracing::debug!("scanning {}", dir.display());
            let found = discover(&dir).await?;

            if found.is_empty() {
                return Ok("No valid workflow documents found".yellow().to_string());
            }

            let mut out = String::new();
            for item in found {
                let info = item.workflow.type_info();
                writeln!(
                    out,
                    "{}  {}/{}  ({} states, {} transitions)",
                    item.name.cyan(),
                    info.doctype,
                    info.subtype,
                    item.workflow.states().len(),
                    item.workflow.transitions().len()
                )?;
            }
            Ok(out.trim_end().to_string())
        }

        Commands::CanTransit {
            file,
            role,
            transition,
        } => {
            let workflow = load_checked(&file).await?;
            let decisions = workflow.can_role_transit(&[TransitQuery {
                role: role.clone(),
                transition: transition.clone(),
            }]);

            let allowed = decisions.first().map(|d| d.outcome).unwrap_or(false);
            if allowed {
                Ok(format!(
                    "{}: role '{}' may execute '{}'",
                    "Allowed".green(),
                    role,
                    transition
                ))
            } else {
                Ok(format!(
                    "{}: role '{}' may not execute '{}'",
                    "Denied".red(),
                    role,
                    transition
                ))
            }
        }
    }
}

/// Loads a document and turns a non-`Valid` status into a command error.
async fn load_checked(path: &Path) -> Result<Workflow, Box<dyn std::error::Error>> {
    let workflow = Workflow::load(path).await;
    match workflow.status() {
        LoadStatus::Valid => Ok(workflow),
        status => Err(format!("'{}': document status is {}", path.display(), status).into()),
    }
}
