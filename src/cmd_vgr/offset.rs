use clap::*;
use std::io::Write;

use vgr::libs::indel::build_offsets;

pub fn make_subcommand() -> Command {
    Command::new("offset")
        .about("Dump per-chromosome cumulative indel offsets")
        .after_help(
            r###"
Reads an indel file and prints the rolling coordinate offset in effect at
each indel position, one row per indel. The offset is the signed sum of all
indel lengths at or before that position on the chromosome; it restarts at
zero for every chromosome.

Examples:
1. Inspect the offsets applied by `vgr annot`:
   vgr offset indels_1.txt

2. Save to a file:
   vgr offset indels_1.txt -o offsets.tsv

"###,
        )
        .arg(
            Arg::new("infile")
                .index(1)
                .num_args(1)
                .default_value("stdin")
                .help("Indel file: chrom:pos<TAB>D|I<TAB>length"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let reader = vgr::reader(args.get_one::<String>("infile").unwrap())?;
    let mut writer = vgr::writer(args.get_one::<String>("outfile").unwrap())?;

    let tables = build_offsets(reader)?;

    writer.write_all(b"#chrom\tposition\toffset\n")?;
    for (chrom, table) in &tables {
        for (pos, offset) in table.positions.iter().zip(table.offsets.iter()) {
            writer.write_fmt(format_args!("{}\t{}\t{}\n", chrom, pos, offset))?;
        }
    }

    Ok(())
}
