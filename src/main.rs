use anyhow::Result;
use console::{Term, style};
use log::{info, warn};
use picture_extractor::config::Session;
use picture_extractor::init;
use picture_extractor::menu::show_main_menu;
use rust_i18n::t;

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en-US");

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();

    // 工作階段設定只存在記憶體中
    let mut session = Session::default();
    rust_i18n::set_locale(session.settings.language.as_str());

    loop {
        match show_main_menu(&term, &mut session) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
