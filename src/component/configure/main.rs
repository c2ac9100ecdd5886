use crate::config::WorkspaceConfig;
use crate::error::PipelineError;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::warn;
use rust_i18n::t;
use std::path::{Path, PathBuf};

/// 設定工作階段使用的目錄
pub struct ConfigureWorkspace<'a> {
    workspace: &'a mut WorkspaceConfig,
}

#[derive(Debug, Clone, Copy)]
enum DirectoryKind {
    Working,
    Source,
    Dest,
}

impl<'a> ConfigureWorkspace<'a> {
    pub fn new(workspace: &'a mut WorkspaceConfig) -> Self {
        Self { workspace }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            println!("{}", style(t!("config.title")).cyan().bold());
            self.print_current();
            println!("{}", style(t!("settings.esc_hint")).dim());

            let options = [
                t!("config.opt_working"),
                t!("config.opt_source"),
                t!("config.opt_dest"),
                t!("settings.back"),
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("config.prompt"))
                .items(&options)
                .default(0)
                .interact_opt()?;

            let kind = match selection {
                Some(0) => DirectoryKind::Working,
                Some(1) => DirectoryKind::Source,
                Some(2) => DirectoryKind::Dest,
                _ => return Ok(()),
            };

            let path: String = Input::new()
                .with_prompt(t!("config.path_prompt"))
                .interact_text()?;
            let path = PathBuf::from(path.trim());

            match self.apply(kind, &path) {
                Ok(accepted) => {
                    println!("{} {}\n", style(t!("config.accepted")).green(), accepted.display());
                }
                Err(e) => {
                    warn!("目錄設定失敗: {e}");
                    println!("{} {}\n", style("✗").red(), e);
                }
            }
        }
    }

    fn apply(&mut self, kind: DirectoryKind, path: &Path) -> Result<PathBuf, PipelineError> {
        let accepted = match kind {
            DirectoryKind::Working => self.workspace.set_working(path)?,
            DirectoryKind::Source => self.workspace.set_source(path)?,
            DirectoryKind::Dest => self.workspace.set_dest(path)?,
        };
        Ok(accepted.to_path_buf())
    }

    fn print_current(&self) {
        let show = |label: &str, value: Option<&Path>| match value {
            Some(path) => println!("  {label}: {}", style(path.display()).cyan()),
            None => println!("  {label}: {}", style(t!("config.unset")).dim()),
        };

        show(&t!("config.working"), self.workspace.working());
        show(&t!("config.source"), self.workspace.source());
        show(&t!("config.dest"), self.workspace.dest());
        println!();
    }
}
