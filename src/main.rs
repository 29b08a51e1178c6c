//! Demo launcher exercising every widget against the real terminal.

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::time::Duration;

use termkit::{
    AnsiSurface, Console, CrosstermKeys, Menu, MenuOption, Notification, NotifyMode, ProgressBar,
    ResolvedUi, Severity, TextPrompt, confirm_yes_no,
};

#[derive(Parser)]
#[command(name = "termkit", about = "Console widget demo launcher")]
struct Args {
    /// Override the configured menu width
    #[arg(short, long)]
    width: Option<u16>,
}

type DemoConsole = Console<AnsiSurface, CrosstermKeys>;

fn main() -> io::Result<()> {
    let args = Args::parse();

    // File logger - writes to termkit.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("termkit.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
    log::info!("termkit demo starting up");

    let config = termkit::load_config().map_err(io::Error::other)?;
    let mut ui = termkit::resolve(&config);
    if let Some(width) = args.width {
        ui.menu_width = width;
    }

    let mut console = Console::new(AnsiSurface::new()?, CrosstermKeys);
    let result = run_menu(&mut console, &ui);
    console.clear()?;
    result
}

fn run_menu(console: &mut DemoConsole, ui: &ResolvedUi) -> io::Result<()> {
    let context = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let prompt_ui = ui.clone();
    let progress_ui = ui.clone();
    let notify_ui = ui.clone();
    let confirm_ui = ui.clone();

    let mut menu = Menu::new(
        "termkit demo",
        vec![
            MenuOption::new('1', "Run a script (prompt + autocomplete)", move |console| {
                run_script_prompt(console, &prompt_ui)
            }),
            MenuOption::new('2', "Install dependencies (progress bar)", move |console| {
                run_progress_demo(console, &progress_ui)
            }),
            MenuOption::new('3', "Notifications (nested menu)", move |console| {
                run_notify_menu(console, &notify_ui)
            }),
            MenuOption::new('4', "Reset workspace (confirm)", move |console| {
                run_confirm_demo(console, &confirm_ui)
            }),
            MenuOption::new('0', "Exit", |_| Ok(())),
        ],
        ui,
    )
    .map_err(io::Error::other)?
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_context(context)
    .with_subtitle("every entry opens one widget")
    .with_shortcut('c', "Clear the screen", |console| console.clear())
    .map_err(io::Error::other)?;

    menu.show(console)
}

fn run_script_prompt(console: &mut DemoConsole, ui: &ResolvedUi) -> io::Result<()> {
    console.clear()?;
    let candidates = vec![
        "build".to_string(),
        "build:watch".to_string(),
        "test".to_string(),
        "test:unit".to_string(),
        "lint".to_string(),
        "lint:fix".to_string(),
        "serve".to_string(),
    ];
    let prompt = TextPrompt::new("Script", candidates, ui.theme.clone());
    let note = match prompt.prompt(console)? {
        Some(script) => Notification::new(
            format!("would run: npm run {script}"),
            Severity::Info,
            NotifyMode::Blocking,
            ui.theme.clone(),
        ),
        None => Notification::new(
            "cancelled",
            Severity::Warning,
            NotifyMode::Timed(Duration::from_millis(800)),
            ui.theme.clone(),
        ),
    };
    note.show(console)
}

fn run_progress_demo(console: &mut DemoConsole, ui: &ResolvedUi) -> io::Result<()> {
    console.clear()?;
    let packages = ["left-pad", "is-even", "chalk", "lodash", "express"];
    let mut bar = ProgressBar::new("install", packages.len() as u64, 24, ui.theme.clone())
        .map_err(io::Error::other)?;
    for package in packages {
        std::thread::sleep(Duration::from_millis(250));
        bar.increment(console, Some(package))?;
    }
    bar.complete(console, Some("all packages"))?;
    Notification::new(
        "install finished",
        Severity::Success,
        NotifyMode::Blocking,
        ui.theme.clone(),
    )
    .show(console)
}

fn run_notify_menu(console: &mut DemoConsole, ui: &ResolvedUi) -> io::Result<()> {
    let severities = [
        ('1', "Info", Severity::Info),
        ('2', "Success", Severity::Success),
        ('3', "Warning", Severity::Warning),
        ('4', "Error", Severity::Error),
    ];
    let mut options: Vec<MenuOption<AnsiSurface, CrosstermKeys>> = severities
        .into_iter()
        .map(|(key, label, severity)| {
            let theme = ui.theme.clone();
            MenuOption::new(key, label, move |console: &mut DemoConsole| {
                Notification::new(
                    format!("{label} notification"),
                    severity,
                    NotifyMode::Timed(Duration::from_millis(900)),
                    theme.clone(),
                )
                .show(console)
            })
        })
        .collect();
    options.push(MenuOption::new('0', "Back", |_| Ok(())));

    Menu::new("Notifications", options, ui)
        .map_err(io::Error::other)?
        .with_subtitle("banners erase themselves on dismissal")
        .show(console)
}

fn run_confirm_demo(console: &mut DemoConsole, ui: &ResolvedUi) -> io::Result<()> {
    console.clear()?;
    let yes = confirm_yes_no(console, "Reset the workspace?", false)?;
    let note = if yes {
        Notification::new(
            "workspace reset",
            Severity::Success,
            NotifyMode::Timed(Duration::from_millis(800)),
            ui.theme.clone(),
        )
    } else {
        Notification::new(
            "left untouched",
            Severity::Info,
            NotifyMode::Timed(Duration::from_millis(800)),
            ui.theme.clone(),
        )
    };
    note.show(console)
}
