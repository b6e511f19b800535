//! Markdown reference pages for a command tree.
//!
//! One page per command, named after its path joined with `_`
//! (`myapp_db_migrate.md`), each linking to its parent and children.

use std::io::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use clap::{Arg, Command, value_parser};
use tracing::debug;

use crate::ServiceError;

pub(super) const DOCS_COMMAND: &str = "gendocs";
const DIRECTORY_ARG: &str = "directory";

/// The `gendocs DIRECTORY` subcommand.
pub(super) fn command() -> Command {
    Command::new(DOCS_COMMAND)
        .about("Generate Markdown documentation for every command")
        .arg(
            Arg::new(DIRECTORY_ARG)
                .required(true)
                .value_parser(value_parser!(Utf8PathBuf))
                .help("Output directory, created when missing"),
        )
}

/// The directory given to `gendocs`.
pub(super) fn directory(matches: &clap::ArgMatches) -> Option<&Utf8Path> {
    matches
        .get_one::<Utf8PathBuf>(DIRECTORY_ARG)
        .map(Utf8PathBuf::as_path)
}

/// Writes a page for `command` and every visible subcommand below it.
pub(super) fn write_tree(
    mut command: Command,
    out_dir: &Utf8Path,
) -> Result<Vec<Utf8PathBuf>, ServiceError> {
    command.build();
    let dir = ensure_dir(out_dir)?;
    let mut written = Vec::new();
    write_page(&dir, out_dir, &command, None, &[], &mut written)?;
    Ok(written)
}

fn write_page<'c>(
    dir: &Dir,
    out_dir: &Utf8Path,
    command: &'c Command,
    parent: Option<&Command>,
    parents: &[&'c str],
    written: &mut Vec<Utf8PathBuf>,
) -> Result<(), ServiceError> {
    let mut path = parents.to_vec();
    path.push(command.get_name());

    let file_name = page_name(&path);
    let file_path = out_dir.join(&file_name);
    let content = render_page(command, parent, &path);
    let io_error = |source| ServiceError::Docs {
        path: file_path.clone(),
        source,
    };
    let mut file = dir
        .open_with(
            &file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)?;
    debug!(path = %file_path, "wrote command reference");
    written.push(file_path);

    for sub in visible_subcommands(command) {
        write_page(dir, out_dir, sub, Some(command), &path, written)?;
    }
    Ok(())
}

fn render_page(command: &Command, parent: Option<&Command>, path: &[&str]) -> String {
    let mut page = format!("## {}\n\n", path.join(" "));
    if let Some(about) = command.get_about() {
        page.push_str(&format!("{about}\n\n"));
    }
    let help = command.clone().render_long_help();
    page.push_str(&format!(
        "### Synopsis\n\n```\n{}\n```\n",
        help.to_string().trim_end()
    ));

    let children: Vec<&Command> = visible_subcommands(command).collect();
    if parent.is_none() && children.is_empty() {
        return page;
    }
    page.push_str("\n### SEE ALSO\n\n");
    if let (Some(up), Some((_, parent_path))) = (parent, path.split_last()) {
        page.push_str(&see_also(up, parent_path));
    }
    for child in children {
        let mut child_path = path.to_vec();
        child_path.push(child.get_name());
        page.push_str(&see_also(child, &child_path));
    }
    page
}

fn see_also(command: &Command, path: &[&str]) -> String {
    let about = command
        .get_about()
        .map(ToString::to_string)
        .unwrap_or_default();
    format!("* [{}]({}) - {about}\n", path.join(" "), page_name(path))
}

fn page_name(path: &[&str]) -> String {
    format!("{}.md", path.join("_"))
}

fn visible_subcommands(command: &Command) -> impl Iterator<Item = &Command> {
    command
        .get_subcommands()
        .filter(|sub| !sub.is_hide_set() && sub.get_name() != "help")
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, ServiceError> {
    let io_error = |source| ServiceError::Docs {
        path: path.to_path_buf(),
        source,
    };
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)
        }
        Err(open_err) => Err(io_error(open_err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Command {
        Command::new("myapp")
            .about("Does the thing")
            .subcommand(Command::new("serve").about("Starts the server"))
            .subcommand(
                Command::new("db")
                    .about("Database tasks")
                    .subcommand(Command::new("migrate").about("Applies migrations")),
            )
            .subcommand(Command::new("internal").hide(true))
    }

    #[test]
    fn names_pages_after_the_command_path() {
        assert_eq!(page_name(&["myapp", "db", "migrate"]), "myapp_db_migrate.md");
    }

    #[test]
    fn root_page_links_children() {
        let mut command = tree();
        command.build();
        let page = render_page(&command, None, &["myapp"]);
        assert!(page.starts_with("## myapp\n\nDoes the thing\n"), "{page}");
        assert!(page.contains("* [myapp serve](myapp_serve.md) - Starts the server"));
        assert!(page.contains("* [myapp db](myapp_db.md) - Database tasks"));
        assert!(!page.contains("internal"), "{page}");
    }

    #[test]
    fn child_page_links_its_parent() {
        let mut command = tree();
        command.build();
        let db = command.find_subcommand("db").expect("db registered");
        let page = render_page(db, Some(&command), &["myapp", "db"]);
        assert!(page.contains("* [myapp](myapp.md) - Does the thing"), "{page}");
        assert!(page.contains("* [myapp db migrate](myapp_db_migrate.md)"), "{page}");
        assert!(page.contains("Usage: myapp db"), "{page}");
    }

    #[test]
    fn writes_one_page_per_visible_command() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let root = Utf8Path::from_path(temp.path())
            .ok_or_else(|| anyhow::anyhow!("temporary path is not UTF-8"))?
            .join("docs");
        let written = write_tree(tree(), &root)?;
        let names: Vec<&str> = written.iter().filter_map(|path| path.file_name()).collect();
        assert_eq!(
            names,
            ["myapp.md", "myapp_serve.md", "myapp_db.md", "myapp_db_migrate.md"]
        );
        let migrate = std::fs::read_to_string(root.join("myapp_db_migrate.md"))?;
        assert!(migrate.starts_with("## myapp db migrate\n"));
        Ok(())
    }
}
