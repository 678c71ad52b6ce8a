use clap::*;
use std::io::{BufRead, Write};

use vgr::libs::annot::{self, AnnotFeature};
use vgr::libs::indel::{build_offsets, OffsetTable};
use vgr::libs::ploidy::{PloidyTable, Sex};

pub fn make_subcommand() -> Command {
    Command::new("annot")
        .about("Update annotation coordinates for a variant genome")
        .after_help(
            r###"
Translates a gene/transcript annotation from reference coordinates into the
coordinate space of a variant genome built by applying indels to the
reference. Each transcript bound and exon boundary moves by the cumulative
signed length of all indels at or before it on the same chromosome.

Chromosomes are filtered by ploidy: `--copy 2` keeps only chromosomes with
at least two copies for the sample's sex, so e.g. chromosome Y never appears
in a female sample's output and chromosome X is absent from a male sample's
second genome copy.

Input files:
* Annotation: 11 tab-delimited columns with a `#` header line:
  chrom  strand  txStart  txEnd  exonCount  exonStarts  exonEnds
  transcriptID  geneID  geneSymbol  biotype
  Features must be grouped by chromosome.
* Indels (--indel): no header, `chrom:pos<TAB>D|I<TAB>length` with 0-based
  positions, sorted by position within each chromosome. Sorting is a
  precondition and is not checked.
* Ploidy (--ploidy): header line, then `chrom<TAB>male_copies<TAB>female_copies`.

The log stream ends with the line `ALL DONE!` on success; downstream checks
use that sentinel to tell a finished run from a crashed one.

Examples:
1. First genome copy of a male sample:
   vgr annot annotation.txt --indel indels_1.txt --ploidy ploidy.txt \
       --sex male -o annotation_1.txt --log annot_1.log

2. Second genome copy, reading the annotation from stdin:
   cat annotation.txt | vgr annot --indel indels_2.txt --ploidy ploidy.txt \
       --sex female --copy 2

"###,
        )
        .arg(
            Arg::new("infile")
                .index(1)
                .num_args(1)
                .default_value("stdin")
                .help("Annotation file in reference coordinates"),
        )
        .arg(
            Arg::new("indel")
                .long("indel")
                .short('i')
                .num_args(1)
                .required(true)
                .help("Indel file for this genome copy"),
        )
        .arg(
            Arg::new("ploidy")
                .long("ploidy")
                .short('p')
                .num_args(1)
                .required(true)
                .help("Chromosome ploidy file"),
        )
        .arg(
            Arg::new("sex")
                .long("sex")
                .short('s')
                .num_args(1)
                .required(true)
                .value_parser(["male", "female"])
                .help("Sex of the sample"),
        )
        .arg(
            Arg::new("copy")
                .long("copy")
                .short('c')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(u32).range(1..=2))
                .help("Which genome copy to annotate (1 or 2)"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .num_args(1)
                .default_value("stderr")
                .help("Log filename. [stderr] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let sex: Sex = args.get_one::<String>("sex").unwrap().parse()?;
    let genome_copy = *args.get_one::<u32>("copy").unwrap();

    //----------------------------
    // Load indels and ploidy
    //----------------------------
    // The offset tables are built in full before any annotation line is
    // read; remapping never observes a partial table.
    let offset_tables = build_offsets(vgr::reader(args.get_one::<String>("indel").unwrap())?)?;
    let ploidy = PloidyTable::from_reader(vgr::reader(args.get_one::<String>("ploidy").unwrap())?)?;

    let reader = vgr::reader(infile)?;
    let mut writer = vgr::writer(args.get_one::<String>("outfile").unwrap())?;
    let mut log = vgr::log_writer(args.get_one::<String>("log").unwrap())?;

    //----------------------------
    // Process
    //----------------------------
    writer.write_fmt(format_args!("{}\n", annot::HEADER))?;

    let mut cur_chrom = String::new();
    let mut cur_table: Option<&OffsetTable> = None;
    let mut cur_eligible = false;

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let chrom = line.split('\t').next().unwrap_or("");

        // Features arrive grouped by chromosome; the offset table and the
        // eligibility verdict are refreshed once per transition.
        if chrom != cur_chrom {
            cur_chrom = chrom.to_string();
            cur_table = offset_tables.get(chrom).filter(|t| !t.is_empty());
            cur_eligible = ploidy.eligible(chrom, sex, genome_copy)?;

            if cur_table.is_some() {
                log.write_fmt(format_args!(
                    "Processing indels and features from chromosome {}.\n",
                    cur_chrom
                ))?;
            } else {
                log.write_fmt(format_args!("No indels on chromosome {}.\n", cur_chrom))?;
            }
        }

        if !cur_eligible {
            continue;
        }

        match cur_table {
            Some(table) => {
                let mut feature = AnnotFeature::parse(&line)?;
                feature.remap(table);
                writer.write_fmt(format_args!("{}\n", feature))?;
            }
            // No indels on this chromosome, coordinates stand as-is.
            None => writer.write_fmt(format_args!("{}\n", line))?,
        }
    }

    // Completion sentinel; its absence marks a partial run.
    log.write_all(b"\nALL DONE!\n")?;

    Ok(())
}
