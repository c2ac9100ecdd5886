use super::staging_planner::{SourceInventory, StagingPlan, StagingReport};
use super::video_selection::Validation;
use crate::config::{Session, TransferMode};
use crate::error::PipelineError;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rust_i18n::t;
use std::path::PathBuf;

/// 準備工作區：從來源目錄挑選照片與影片，搬到 `working/input`
pub struct SetupCommand<'a> {
    session: &'a Session,
}

impl<'a> SetupCommand<'a> {
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("setup.title")).cyan().bold());

        let workspace = &self.session.workspace;
        let source = workspace.require_source()?;
        let working = workspace.require_working()?;

        let mode = self.prompt_transfer_mode()?;

        println!("{}", style(t!("setup.scanning")).dim());
        let inventory = SourceInventory::scan(source)?;
        println!(
            "{}",
            style(t!(
                "setup.inventory",
                images = inventory.images().len(),
                videos = inventory.videos().len()
            ))
            .green()
        );
        println!();

        let images = self.prompt_images(&inventory)?;
        println!("{}\n", t!("setup.images_selected", count = style(images.len()).green()));

        let videos = self.prompt_videos(&inventory)?;
        println!("{}\n", t!("setup.videos_selected", count = style(videos.len()).green()));

        let plan = StagingPlan::new(images, videos, mode);
        let progress_bar = ProgressBar::new(plan.file_count() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message(t!("setup.transferring", mode = mode).into_owned());

        let report = plan.materialize(working, &progress_bar);
        progress_bar.finish_and_clear();
        self.print_result(&report?);

        Ok(())
    }

    fn prompt_transfer_mode(&self) -> Result<TransferMode> {
        let modes = [TransferMode::Copy, TransferMode::Move];
        let items = [t!("setup.mode_copy"), t!("setup.mode_move")];
        let default_index = modes
            .iter()
            .position(|&m| m == self.session.settings.transfer_mode)
            .unwrap_or(0);

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("setup.mode_prompt"))
            .items(&items)
            .default(default_index)
            .interact()?;

        Ok(modes[selection])
    }

    fn prompt_images(&self, inventory: &SourceInventory) -> Result<Vec<PathBuf>> {
        if inventory.images().is_empty() {
            return Ok(Vec::new());
        }

        let wants_images = Confirm::new()
            .with_prompt(t!("setup.images_confirm"))
            .default(true)
            .interact()?;
        if !wants_images {
            return Ok(Vec::new());
        }

        loop {
            let pattern: String = Input::new()
                .with_prompt(t!("setup.pattern_prompt"))
                .default("*".to_string())
                .interact_text()?;

            match inventory.select_images(Some(&pattern)) {
                Ok(images) => return Ok(images),
                Err(e) if e.is_recoverable() => {
                    println!("{} {}", style("✗").red(), e);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn prompt_videos(&self, inventory: &SourceInventory) -> Result<Vec<PathBuf>> {
        let available = inventory.videos().len();
        if available == 0 {
            return Ok(Vec::new());
        }

        let count: usize = Input::new()
            .with_prompt(t!("setup.video_count_prompt", max = available))
            .default(0)
            .validate_with(|n: &usize| -> Result<(), String> {
                if *n <= available {
                    Ok(())
                } else {
                    Err(PipelineError::InvalidCount {
                        requested: *n,
                        max: available,
                    }
                    .to_string())
                }
            })
            .interact_text()?;

        let mut selection = inventory.video_selection(count)?;
        if count > 0 {
            println!("{}", style(t!("setup.available_videos")).dim());
            for video in inventory.videos() {
                println!("  {} {}", style("•").dim(), video.name);
            }
        }

        while !selection.is_complete() {
            let candidate: String = Input::new()
                .with_prompt(t!(
                    "setup.video_prompt",
                    current = selection.selected().len() + 1,
                    total = selection.target()
                ))
                .interact_text()?;

            match selection.offer(&candidate) {
                Validation::Accepted(path) => {
                    println!("  {} {}", style("✓").green(), path.display());
                }
                Validation::Retry(reason) => {
                    println!(
                        "  {} {}",
                        style("✗").yellow(),
                        t!("setup.video_rejected", candidate = candidate.trim(), reason = reason)
                    );
                }
            }
        }

        Ok(selection.finalize()?)
    }

    fn print_result(&self, report: &StagingReport) {
        println!();
        println!("{}", style(t!("setup.done_title")).cyan().bold());
        println!(
            "  {}",
            t!(
                "setup.done_summary",
                mode = report.mode,
                images = style(report.images_staged).green(),
                videos = style(report.videos_staged).green()
            )
        );

        if !report.units.is_empty() {
            let names: Vec<_> = report.units.iter().map(ToString::to_string).collect();
            println!("  {}", t!("setup.units", units = style(names.join(", ")).cyan()));
        }

        info!(
            "setup 完成 - 照片: {}, 影片: {}",
            report.images_staged, report.videos_staged
        );
    }
}
