//! Output management and tree formatting.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use kiln_core::domain::{VirtualDirectory, VirtualFileTree, VirtualNode};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Writes human-facing lines to stdout, honouring `--quiet` and colour
/// settings.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable payload. Never suppressed.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        self.term.write_line(payload)
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

// ── Tree formatting ──────────────────────────────────────────────────────────

/// Box-drawing rendering of the tree, one node per line, directories with a
/// trailing `/`.
///
/// ```text
/// .
/// ├── .gitignore
/// ├── app/
/// │   └── page.tsx
/// └── package.json
/// ```
pub fn tree_lines(tree: &VirtualFileTree, color: bool) -> Vec<String> {
    let mut lines = vec![".".to_string()];
    push_children(tree.root(), "", color, &mut lines);
    lines
}

fn push_children(dir: &VirtualDirectory, prefix: &str, color: bool, out: &mut Vec<String>) {
    let children = dir.children();
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "\u{2514}\u{2500}\u{2500} " } else { "\u{251c}\u{2500}\u{2500} " };

        match child {
            VirtualNode::Directory(sub) => {
                let name = format!("{}/", sub.name());
                let name = if color { name.blue().bold().to_string() } else { name };
                out.push(format!("{prefix}{branch}{name}"));

                let nested = if last { "    " } else { "\u{2502}   " };
                push_children(sub, &format!("{prefix}{nested}"), color, out);
            }
            VirtualNode::File(file) => out.push(format!("{prefix}{branch}{}", file.name())),
        }
    }
}

/// Every file path, depth-first in tree order.
pub fn list_lines(tree: &VirtualFileTree) -> Vec<String> {
    tree.files().iter().map(|f| f.path().to_string()).collect()
}

/// `N files, M directories`
pub fn summary(tree: &VirtualFileTree) -> String {
    format!(
        "{} file{}, {} director{}",
        tree.file_count(),
        if tree.file_count() == 1 { "" } else { "s" },
        tree.directory_count(),
        if tree.directory_count() == 1 { "y" } else { "ies" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::domain::{FileContent, ProjectConfig};

    fn tree() -> VirtualFileTree {
        let mut tree = VirtualFileTree::new(ProjectConfig::builder("demo").build().unwrap());
        for path in [".gitignore", "app/page.tsx", "app/api/route.ts", "package.json"] {
            tree.insert_file(path, FileContent::Text(String::new()), path)
                .unwrap();
        }
        tree
    }

    #[test]
    fn tree_lines_draw_branches() {
        assert_eq!(
            tree_lines(&tree(), false),
            [
                ".",
                "├── .gitignore",
                "├── app/",
                "│   ├── page.tsx",
                "│   └── api/",
                "│       └── route.ts",
                "└── package.json",
            ]
        );
    }

    #[test]
    fn list_lines_are_full_paths() {
        assert_eq!(
            list_lines(&tree()),
            [".gitignore", "app/page.tsx", "app/api/route.ts", "package.json"]
        );
    }

    #[test]
    fn summary_pluralises() {
        assert_eq!(summary(&tree()), "4 files, 2 directories");
    }

    #[test]
    fn no_color_flag_reported() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
        };
        assert!(!OutputManager::new(&args, &AppConfig::default()).supports_color());
    }
}
