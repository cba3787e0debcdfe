// Man pages for `sitewatch` and every visible subcommand, written to
// `$OUT_DIR/man` as `sitewatch.1`, `sitewatch-alerts.1`,
// `sitewatch-alerts-list.1` and so on.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;

// The command tree only needs clap, clap_complete and humantime.
#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR not set"))?;
    let man_dir = PathBuf::from(out_dir).join("man");
    std::fs::create_dir_all(&man_dir)?;

    let root = cli::Cli::command();
    let mut pending = vec![(root.get_name().to_owned(), root)];
    while let Some((page_name, cmd)) = pending.pop() {
        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| (format!("{page_name}-{}", sub.get_name()), sub.clone())),
        );

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd.name(page_name.clone())).render(&mut page)?;
        std::fs::write(man_dir.join(format!("{page_name}.1")), page)?;
    }
    Ok(())
}
