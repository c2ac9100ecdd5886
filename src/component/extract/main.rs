use super::set_extractor::{SetExtractor, SetOutcome};
use crate::config::Session;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rust_i18n::t;
use std::time::Duration;

/// 擷取影像集：每個輸入單元最多轉成一個 `output/set{i}`
pub struct ExtractCommand<'a> {
    session: &'a Session,
}

impl<'a> ExtractCommand<'a> {
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("extract.title")).cyan().bold());

        let mut extractor =
            SetExtractor::open(&self.session.workspace, self.session.settings.stride)?;

        let max_sets = extractor.max_sets();
        let set_count: usize = Input::new()
            .with_prompt(t!("extract.count_prompt", max = max_sets))
            .default(max_sets)
            .validate_with(|n: &usize| -> Result<(), String> {
                extractor
                    .validate_set_count(*n)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;

        let mut outcomes = Vec::with_capacity(set_count);
        for i in 0..set_count {
            // 只列出尚未使用的單元，已選過的無法再選
            let names: Vec<String> = extractor
                .available_names()
                .into_iter()
                .map(str::to_string)
                .collect();

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("extract.unit_prompt", current = i + 1, total = set_count))
                .items(&names)
                .default(0)
                .interact()?;

            let progress_bar = self.create_progress_bar(&names[selection]);
            let outcome = extractor.extract_next(&names[selection], &progress_bar);
            progress_bar.finish_and_clear();

            let outcome = outcome?;
            println!(
                "  {} {}",
                style("✓").green(),
                t!(
                    "extract.set_created",
                    unit = outcome.unit,
                    set = style(&outcome.set_name).cyan(),
                    count = outcome.files_written
                )
            );
            outcomes.push(outcome);
        }

        self.print_summary(&outcomes);
        Ok(())
    }

    fn create_progress_bar(&self, unit_name: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} {msg}")
                .expect("Invalid progress bar template"),
        );
        progress_bar.set_message(t!("extract.processing", unit = unit_name).into_owned());
        progress_bar.enable_steady_tick(Duration::from_millis(120));
        progress_bar
    }

    fn print_summary(&self, outcomes: &[SetOutcome]) {
        println!();
        println!("{}", style(t!("extract.summary_title")).cyan().bold());

        if outcomes.is_empty() {
            println!("  {}", style(t!("extract.nothing")).yellow());
            return;
        }

        for outcome in outcomes {
            let detail = outcome.frames_read.map_or_else(
                || t!("extract.detail_images"),
                |frames| {
                    t!(
                        "extract.detail_video",
                        frames = frames,
                        stride = self.session.settings.stride
                    )
                },
            );
            println!(
                "  {} {}",
                style("•").dim(),
                t!(
                    "extract.summary_line",
                    dir = outcome.set_dir.display(),
                    count = style(outcome.files_written).green(),
                    detail = detail
                )
            );
        }

        info!("extract 完成 - 影像集: {}", outcomes.len());
    }
}
