use crate::component::{ConfigureWorkspace, ExtractCommand, SetupCommand};
use crate::config::Session;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::warn;
use rust_i18n::t;

pub fn run_configure(term: &Term, session: &mut Session) -> Result<()> {
    let mut configure = ConfigureWorkspace::new(&mut session.workspace);

    if let Err(e) = configure.run() {
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
        pause(term)?;
    }

    Ok(())
}

pub fn run_setup(term: &Term, session: &Session) -> Result<()> {
    let setup = SetupCommand::new(session);

    if let Err(e) = setup.run() {
        warn!("setup 失敗: {e}");
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_extract(term: &Term, session: &Session) -> Result<()> {
    let extract = ExtractCommand::new(session);

    if let Err(e) = extract.run() {
        warn!("extract 失敗: {e}");
        eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
