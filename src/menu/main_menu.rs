use crate::config::{Language, Session, TransferMode};
use crate::menu::handlers::{run_configure, run_extract, run_setup};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;

pub fn show_main_menu(term: &Term, session: &mut Session) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_config"),
        t!("main_menu.opt_setup"),
        t!("main_menu.opt_extract"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_configure(term, session)?;
            Ok(true)
        }
        Some(1) => {
            run_setup(term, session)?;
            Ok(true)
        }
        Some(2) => {
            run_extract(term, session)?;
            Ok(true)
        }
        Some(3) => {
            show_settings_menu(term, session)?;
            Ok(true)
        }
        Some(4) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單（只存在本次工作階段）
fn show_settings_menu(term: &Term, session: &mut Session) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("settings.esc_hint")).dim());

        let settings = &session.settings;
        let options = vec![
            t!("settings.opt_stride", stride = settings.stride),
            t!("settings.opt_transfer_mode", mode = settings.transfer_mode),
            t!("settings.opt_language", language = settings.language),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => {
                let stride: usize = Input::new()
                    .with_prompt(t!("settings.stride_prompt"))
                    .default(session.settings.stride)
                    .validate_with(|n: &usize| -> Result<(), String> {
                        if *n > 0 {
                            Ok(())
                        } else {
                            Err(t!("error.invalid_stride").into_owned())
                        }
                    })
                    .interact_text()?;
                session.settings.stride = stride;
            }
            Some(1) => {
                session.settings.transfer_mode = match session.settings.transfer_mode {
                    TransferMode::Copy => TransferMode::Move,
                    TransferMode::Move => TransferMode::Copy,
                };
            }
            Some(2) => show_language_menu(term, session)?,
            Some(3) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn show_language_menu(term: &Term, session: &mut Session) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let items: Vec<String> = Language::ALL.iter().map(ToString::to_string).collect();
    let default_index = Language::ALL
        .iter()
        .position(|&l| l == session.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - keep current language
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected = Language::ALL[selection];
    if selected != session.settings.language {
        session.settings.language = selected;
        rust_i18n::set_locale(selected.as_str());
    }

    Ok(())
}
