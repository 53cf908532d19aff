use crate::render;
use anyhow::Result;
use filebrowse::core::config::BrowserConfig;
use filebrowse::pages::explorer::{ExplorerEvent, ExplorerPage};
use filebrowse::services::alerts::{Alerts, ConsoleAlerts};
use filebrowse::services::fs::listing::FsLister;
use filebrowse::services::fs::opener::SystemOpener;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const HELP: &str = "\
commands:
  ls, reload         read the folder again and show it
  (empty line)       show the current listing without re-reading
  cd <n|path|..>     enter entry n, a path (relative to here), or the parent
  open <n>           open entry n (folders are entered)
  select <n>         select entry n; `open` with no argument uses it
  filter [text]      filter names by text; no text clears the filter
  back, forward, up  move through history or to the parent folder
  pwd                print the current folder
  help               this text
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Show,
    Reload,
    Cd(Target),
    Open(Option<usize>),
    Select(usize),
    Filter(Option<String>),
    Back,
    Forward,
    Up,
    Pwd,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Path(String),
    Parent,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> std::result::Result<BrowseCommand, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let index = |what: &str| {
            rest.parse::<usize>()
                .map_err(|_| format!("{what} expects an entry number, got `{rest}`"))
        };

        let command = match word {
            "" => BrowseCommand::Show,
            "ls" | "reload" | "refresh" => BrowseCommand::Reload,
            "cd" if rest.is_empty() => return Err("cd needs a target".into()),
            "cd" if rest == ".." => BrowseCommand::Cd(Target::Parent),
            "cd" => match rest.parse::<usize>() {
                Ok(ix) => BrowseCommand::Cd(Target::Index(ix)),
                Err(_) => BrowseCommand::Cd(Target::Path(rest.to_string())),
            },
            "open" if rest.is_empty() => BrowseCommand::Open(None),
            "open" => BrowseCommand::Open(Some(index("open")?)),
            "select" => BrowseCommand::Select(index("select")?),
            "filter" if rest.is_empty() => BrowseCommand::Filter(None),
            "filter" => BrowseCommand::Filter(Some(rest.to_string())),
            "back" => BrowseCommand::Back,
            "forward" => BrowseCommand::Forward,
            "up" => BrowseCommand::Up,
            "pwd" => BrowseCommand::Pwd,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(command)
    }
}

pub fn run(config: BrowserConfig) -> Result<()> {
    let alerts: Arc<dyn Alerts> = Arc::new(ConsoleAlerts::stderr());
    let start = config.resolve_start_path();
    let mut page = ExplorerPage::with_start_and_filter(
        start,
        config.filter().map(str::to_string),
        Arc::new(FsLister),
        Arc::new(SystemOpener),
        Arc::clone(&alerts),
    );

    let dirty = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&dirty);
    page.subscribe(move |event| {
        if matches!(
            event,
            ExplorerEvent::EntriesChanged | ExplorerEvent::CurrentPathChanged
        ) {
            flag.store(true, Ordering::Relaxed);
        }
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        if dirty.swap(false, Ordering::Relaxed) {
            show(&page, &mut stdout)?;
        }
        write!(stdout, "{}> ", page.current_path().display())?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let command = match BrowseCommand::parse(&line?) {
            Ok(command) => command,
            Err(message) => {
                alerts.show_information(&message);
                continue;
            }
        };
        tracing::debug!(?command, "browse command");

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Show => dirty.store(true, Ordering::Relaxed),
            BrowseCommand::Reload => page.reload(),
            BrowseCommand::Pwd => writeln!(stdout, "{}", page.current_path().display())?,
            BrowseCommand::Help => writeln!(stdout, "{HELP}")?,
            BrowseCommand::Back => {
                if !page.go_back() {
                    alerts.show_information("No earlier folder");
                }
            }
            BrowseCommand::Forward => {
                if !page.go_forward() {
                    alerts.show_information("No later folder");
                }
            }
            BrowseCommand::Up | BrowseCommand::Cd(Target::Parent) => {
                if !page.go_up() {
                    alerts.show_information("Already at the top");
                }
            }
            BrowseCommand::Cd(Target::Path(path)) => {
                let target = resolve(page.current_path(), &path);
                page.set_current_path(target);
            }
            BrowseCommand::Cd(Target::Index(ix)) => match page.entries().get(ix).cloned() {
                Some(entry) if entry.is_directory => {
                    page.activate(Some(&entry));
                }
                Some(entry) => alerts.show_information(&format!("{} is not a folder", entry.name)),
                None => alerts.show_information(&format!("No entry {ix}")),
            },
            BrowseCommand::Select(ix) => {
                if !page.select(Some(ix)) {
                    alerts.show_information(&format!("No entry {ix}"));
                }
            }
            BrowseCommand::Open(ix) => {
                if let Some(ix) = ix {
                    if !page.select(Some(ix)) {
                        alerts.show_information(&format!("No entry {ix}"));
                        continue;
                    }
                }
                if !page.activate(None) {
                    alerts.show_information("Nothing selected");
                }
            }
            BrowseCommand::Filter(text) => {
                page.set_filter_text(text);
            }
        }
    }
    Ok(())
}

fn show(page: &ExplorerPage, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", page.current_path().display())?;
    if let Some(filter) = page.filter_text().filter(|f| !f.is_empty()) {
        writeln!(out, "filter: {filter}")?;
    }
    write!(out, "{}", render::table(page.entries(), true))
}

fn resolve(cwd: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        cwd.join(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(BrowseCommand::parse("cd 3"), Ok(BrowseCommand::Cd(Target::Index(3))));
        assert_eq!(BrowseCommand::parse("cd .."), Ok(BrowseCommand::Cd(Target::Parent)));
        assert_eq!(
            BrowseCommand::parse("cd My Documents"),
            Ok(BrowseCommand::Cd(Target::Path("My Documents".into())))
        );
        assert_eq!(BrowseCommand::parse("  back "), Ok(BrowseCommand::Back));
        assert_eq!(BrowseCommand::parse(""), Ok(BrowseCommand::Show));
    }

    #[test]
    fn ls_and_reload_read_the_folder_again() {
        assert_eq!(BrowseCommand::parse("ls"), Ok(BrowseCommand::Reload));
        assert_eq!(BrowseCommand::parse("reload"), Ok(BrowseCommand::Reload));
        assert_eq!(BrowseCommand::parse(" refresh "), Ok(BrowseCommand::Reload));
    }

    #[test]
    fn parses_filter_and_open() {
        assert_eq!(
            BrowseCommand::parse("filter *.*"),
            Ok(BrowseCommand::Filter(Some("*.*".into())))
        );
        assert_eq!(BrowseCommand::parse("filter"), Ok(BrowseCommand::Filter(None)));
        assert_eq!(BrowseCommand::parse("open"), Ok(BrowseCommand::Open(None)));
        assert_eq!(BrowseCommand::parse("open 2"), Ok(BrowseCommand::Open(Some(2))));
        assert!(BrowseCommand::parse("open two").is_err());
        assert!(BrowseCommand::parse("cd").is_err());
        assert!(BrowseCommand::parse("rm -rf").is_err());
    }

    #[test]
    fn relative_targets_join_the_current_folder() {
        let cwd = Path::new("/home/user");
        assert_eq!(resolve(cwd, "Documents"), Path::new("/home/user/Documents"));
        assert_eq!(resolve(cwd, "/etc"), Path::new("/etc"));
    }
}
