use crate::libs::indel::OffsetTable;
use anyhow::{bail, Context};
use itertools::Itertools;

/// Output schema of the 11-column annotation format.
pub const HEADER: &str = "#chrom\tstrand\ttxStart\ttxEnd\texonCount\texonStarts\texonEnds\ttranscriptID\tgeneID\tgeneSymbol\tbiotype";

/// One transcript annotation record with its exon structure.
///
/// Coordinates are signed: remapping applies signed cumulative offsets and
/// deliberately does not clamp, so a pathological indel list produces a
/// negative coordinate in the output instead of an underflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotFeature {
    pub chrom: String,
    pub strand: char,
    pub tx_start: i64,
    pub tx_end: i64,
    pub exon_count: usize,
    pub exon_starts: Vec<i64>,
    pub exon_ends: Vec<i64>,
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_symbol: String,
    pub biotype: String,
}

impl AnnotFeature {
    /// Parses one 11-column annotation line.
    ///
    /// ```
    /// # use vgr::libs::annot::AnnotFeature;
    /// let line = "1\t+\t11869\t14409\t3\t11869,12613,13221\t12227,12721,14409\tENST00000456328\tENSG00000223972\tDDX11L1\tpseudogene";
    /// let feature = AnnotFeature::parse(line).unwrap();
    /// assert_eq!(feature.chrom, "1");
    /// assert_eq!(feature.exon_starts, vec![11869, 12613, 13221]);
    /// assert_eq!(feature.to_string(), line);
    /// ```
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line.trim_end_matches('\n').split('\t').collect();
        if fields.len() != 11 {
            bail!("invalid annotation line ({} fields): {}", fields.len(), line);
        }

        let strand = match fields[1] {
            "+" => '+',
            "-" => '-',
            _ => bail!("invalid strand: {}", fields[1]),
        };
        let tx_start: i64 = fields[2]
            .parse()
            .with_context(|| format!("invalid txStart: {}", fields[2]))?;
        let tx_end: i64 = fields[3]
            .parse()
            .with_context(|| format!("invalid txEnd: {}", fields[3]))?;
        let exon_count: usize = fields[4]
            .parse()
            .with_context(|| format!("invalid exonCount: {}", fields[4]))?;
        let exon_starts = parse_coord_list(fields[5])?;
        let exon_ends = parse_coord_list(fields[6])?;

        Ok(Self {
            chrom: fields[0].to_string(),
            strand,
            tx_start,
            tx_end,
            exon_count,
            exon_starts,
            exon_ends,
            transcript_id: fields[7].to_string(),
            gene_id: fields[8].to_string(),
            gene_symbol: fields[9].to_string(),
            biotype: fields[10].to_string(),
        })
    }

    /// Translates all coordinates into the variant genome's space.
    ///
    /// Each coordinate moves by the cumulative offset of its predecessor
    /// indel. When `txStart` and `txEnd` share the same predecessor, no
    /// indel boundary falls inside the transcript span, so every exon
    /// coordinate shares that single offset and per-exon searches are
    /// skipped. Otherwise each exon boundary is searched independently,
    /// as different exons may straddle different indels.
    pub fn remap(&mut self, table: &OffsetTable) {
        if table.is_empty() {
            return;
        }

        let i_start = table.predecessor(self.tx_start);
        let i_end = table.predecessor(self.tx_end);

        if i_start == i_end {
            let offset = match i_start {
                Some(idx) => table.offsets[idx],
                None => return,
            };
            self.tx_start += offset;
            self.tx_end += offset;
            for coord in self.exon_starts.iter_mut().chain(self.exon_ends.iter_mut()) {
                *coord += offset;
            }
        } else {
            self.tx_start += table.effective_offset(self.tx_start);
            self.tx_end += table.effective_offset(self.tx_end);
            for coord in self.exon_starts.iter_mut().chain(self.exon_ends.iter_mut()) {
                *coord += table.effective_offset(*coord);
            }
        }
    }
}

fn parse_coord_list(field: &str) -> anyhow::Result<Vec<i64>> {
    field
        .split(',')
        .map(|c| {
            c.parse::<i64>()
                .with_context(|| format!("invalid exon coordinate: {}", c))
        })
        .collect()
}

impl std::fmt::Display for AnnotFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.strand,
            self.tx_start,
            self.tx_end,
            self.exon_count,
            self.exon_starts.iter().join(","),
            self.exon_ends.iter().join(","),
            self.transcript_id,
            self.gene_id,
            self.gene_symbol,
            self.biotype,
        )
    }
}
