extern crate clap;
use clap::*;

mod cmd_vgr;

fn main() -> anyhow::Result<()> {
    let app = Command::new("vgr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`vgr` - Variant Genome Refiner")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_vgr::annot::make_subcommand())
        .subcommand(cmd_vgr::offset::make_subcommand())
        .after_help(
            r###"Subcommands:

* annot  - Update annotation coordinates for a variant genome
* offset - Dump per-chromosome cumulative indel offsets

Variant genomes built from a reference by applying sample-specific indels
shift every downstream coordinate. These tools translate gene/transcript
annotations into a variant genome's coordinate space, one genome copy at
a time, honoring sex-chromosome ploidy.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("annot", sub_matches)) => cmd_vgr::annot::execute(sub_matches),
        Some(("offset", sub_matches)) => cmd_vgr::offset::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
