mod error;
mod fixture;
mod report;

use std::cell::RefCell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use roasway_table::{TableCallbacks, TableEngine, TextMeasurer};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::CliError;
use crate::fixture::{PageFixture, ScriptedEvent};
use crate::report::{CallbackRecord, PageReport};

struct Args {
    page: PathBuf,
    log: PathBuf,
}

fn parse_args() -> Result<Args, CliError> {
    let mut args = std::env::args().skip(1);
    let mut page = None;
    let mut log = PathBuf::from("roasway.log");
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log" => log = args.next().map(PathBuf::from).ok_or(CliError::Usage)?,
            _ if page.is_none() => page = Some(PathBuf::from(arg)),
            _ => return Err(CliError::Usage),
        }
    }
    Ok(Args {
        page: page.ok_or(CliError::Usage)?,
        log,
    })
}

fn load(path: &Path) -> Result<PageFixture, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}

fn run() -> Result<(), CliError> {
    let args = parse_args()?;

    let log_file = File::create(&args.log).map_err(|source| CliError::Io {
        path: args.log.clone(),
        source,
    })?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let page = load(&args.page)?;
    let mut document = page.to_document();

    let fired: Rc<RefCell<Vec<CallbackRecord>>> = Rc::default();
    let callbacks = {
        let (resize, scroll, sticky) = (fired.clone(), fired.clone(), fired.clone());
        TableCallbacks::new()
            .on_resize(move |width, column| {
                resize.borrow_mut().push(CallbackRecord::Resize {
                    width,
                    column: column.to_string(),
                })
            })
            .on_scroll(move |scroll_left| {
                scroll
                    .borrow_mut()
                    .push(CallbackRecord::Scroll { scroll_left })
            })
            .on_sticky_adjust(move || sticky.borrow_mut().push(CallbackRecord::StickyAdjust))
    };

    let mut engine = TableEngine::initialize(
        &mut document,
        page.options.clone(),
        callbacks,
        Box::new(TextMeasurer::default()),
        page.viewport.into(),
    )?;

    // Virtual clock: only `wait` steps move time forward.
    let mut now = Instant::now();
    for step in &page.events {
        log::debug!("[cli] {step:?}");
        match step {
            ScriptedEvent::Frame => engine.animation_frame(&mut document),
            ScriptedEvent::Wait { ms } => {
                now += Duration::from_millis(*ms);
                engine.tick(&mut document, now);
            }
            other => {
                if let Some(event) = other.to_event() {
                    engine.dispatch(&mut document, event, now);
                }
            }
        }
    }
    if let Some(deadline) = engine.next_deadline() {
        engine.tick(&mut document, deadline);
    }

    let records = fired.borrow().clone();
    let report = PageReport::new(&engine, records);
    println!("{}", serde_json::to_string_pretty(&report)?);

    engine.destroy();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
