use anyhow::{bail, Context};
use indexmap::IndexMap;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

/// One indel record from a variant-genome indel file.
///
/// Positions are 0-based coordinates in the reference genome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indel {
    pub chrom: String,
    pub pos: i64,
    pub kind: IndelKind,
    pub len: i64,
}

impl Indel {
    /// Parses one line of an indel file: `chrom:pos<TAB>D|I<TAB>length`.
    ///
    /// ```
    /// # use vgr::libs::indel::{Indel, IndelKind};
    /// let indel = Indel::parse("1:134937\tD\t2").unwrap();
    /// assert_eq!(indel.chrom, "1");
    /// assert_eq!(indel.pos, 134937);
    /// assert_eq!(indel.kind, IndelKind::Deletion);
    /// assert_eq!(indel.len, 2);
    /// ```
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            bail!("invalid indel line: {}", line);
        }

        let (chrom, pos) = fields[0]
            .split_once(':')
            .with_context(|| format!("invalid indel locus: {}", fields[0]))?;
        let pos: i64 = pos
            .parse()
            .with_context(|| format!("invalid indel position: {}", pos))?;

        let kind = match fields[1] {
            "I" => IndelKind::Insertion,
            "D" => IndelKind::Deletion,
            _ => bail!("invalid indel type: {}", fields[1]),
        };

        let len: i64 = fields[2]
            .trim_end()
            .parse()
            .with_context(|| format!("invalid indel length: {}", fields[2]))?;

        Ok(Self {
            chrom: chrom.to_string(),
            pos,
            kind,
            len,
        })
    }

    /// Signed contribution to the rolling offset.
    pub fn shift(&self) -> i64 {
        match self.kind {
            IndelKind::Insertion => self.len,
            IndelKind::Deletion => -self.len,
        }
    }
}

/// Cumulative coordinate offsets for one chromosome.
///
/// `positions` holds indel positions in strictly increasing order;
/// `offsets[i]` is the running sum of signed indel lengths up to and
/// including `positions[i]`. The running sum is not monotonic, so lookups
/// go through predecessor search rather than interpolation.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    pub positions: Vec<i64>,
    pub offsets: Vec<i64>,
}

impl OffsetTable {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the rightmost position `<= coord`, or `None` when `coord`
    /// precedes every indel on the chromosome.
    pub fn predecessor(&self, coord: i64) -> Option<usize> {
        let idx = self.positions.partition_point(|&pos| pos <= coord);
        idx.checked_sub(1)
    }

    /// The cumulative offset in effect at `coord`; 0 before the first indel.
    pub fn effective_offset(&self, coord: i64) -> i64 {
        match self.predecessor(coord) {
            Some(idx) => self.offsets[idx],
            None => 0,
        }
    }
}

/// Builds per-chromosome offset tables from an indel stream.
///
/// The input must already be grouped by chromosome and strictly increasing
/// in position within each chromosome; this precondition is not checked,
/// and an unsorted file yields wrong offsets. The rolling offset resets to
/// 0 at the first indel of each chromosome. A chromosome absent from the
/// stream gets no table, i.e. the identity mapping.
pub fn build_offsets(reader: impl BufRead) -> anyhow::Result<IndexMap<String, OffsetTable>> {
    let mut tables: IndexMap<String, OffsetTable> = IndexMap::new();
    let mut rolling = 0i64;
    let mut cur_chrom = String::new();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let indel = Indel::parse(&line)?;

        if cur_chrom != indel.chrom {
            rolling = 0;
            cur_chrom = indel.chrom.clone();
        }
        rolling += indel.shift();

        let table = tables.entry(indel.chrom).or_default();
        table.positions.push(indel.pos);
        table.offsets.push(rolling);
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indel() {
        let indel = Indel::parse("chrX:100\tI\t5").unwrap();
        assert_eq!(indel.chrom, "chrX");
        assert_eq!(indel.pos, 100);
        assert_eq!(indel.kind, IndelKind::Insertion);
        assert_eq!(indel.shift(), 5);

        assert!(Indel::parse("chrX\tI\t5").is_err());
        assert!(Indel::parse("chrX:100\tX\t5").is_err());
        assert!(Indel::parse("chrX:100\tI").is_err());
        assert!(Indel::parse("chrX:abc\tI\t5").is_err());
    }

    #[test]
    fn test_build_offsets_rolling() {
        let input = "\
1:100\tI\t5
1:200\tD\t3
1:300\tD\t10
2:50\tI\t7
";
        let tables = build_offsets(input.as_bytes()).unwrap();
        assert_eq!(tables.len(), 2);

        let t1 = &tables["1"];
        assert_eq!(t1.positions, vec![100, 200, 300]);
        assert_eq!(t1.offsets, vec![5, 2, -8]);

        // Accumulator restarts on the new chromosome.
        let t2 = &tables["2"];
        assert_eq!(t2.positions, vec![50]);
        assert_eq!(t2.offsets, vec![7]);
    }

    #[test]
    fn test_predecessor() {
        let table = OffsetTable {
            positions: vec![100, 200],
            offsets: vec![5, 2],
        };

        assert_eq!(table.predecessor(99), None);
        assert_eq!(table.predecessor(100), Some(0));
        assert_eq!(table.predecessor(150), Some(0));
        assert_eq!(table.predecessor(200), Some(1));
        assert_eq!(table.predecessor(10_000), Some(1));

        assert_eq!(table.effective_offset(99), 0);
        assert_eq!(table.effective_offset(100), 5);
        assert_eq!(table.effective_offset(250), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = OffsetTable::default();
        assert!(table.is_empty());
        assert_eq!(table.predecessor(0), None);
        assert_eq!(table.effective_offset(12345), 0);
    }
}
