use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => bail!("invalid sex: {} (expected male or female)", s),
        }
    }
}

/// Chromosome copy counts per sex, loaded from a chromosome ploidy file.
///
/// The file is tab-delimited with a header line, then
/// `chrom<TAB>male_copies<TAB>female_copies` rows. Entries keep file order.
#[derive(Debug, Clone, Default)]
pub struct PloidyTable {
    entries: IndexMap<String, (u32, u32)>,
}

impl PloidyTable {
    /// ```
    /// # use vgr::libs::ploidy::{PloidyTable, Sex};
    /// let input = "#chrom\tmale\tfemale\n1\t2\t2\nX\t1\t2\nY\t1\t0\n";
    /// let table = PloidyTable::from_reader(input.as_bytes()).unwrap();
    /// assert_eq!(table.copies("X", Sex::Male), Some(1));
    /// assert_eq!(table.copies("Y", Sex::Female), Some(0));
    /// assert_eq!(table.copies("MT", Sex::Male), None);
    /// ```
    pub fn from_reader(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = IndexMap::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            // First line is the header.
            if i == 0 || line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.trim_end().split('\t').collect();
            if fields.len() != 3 {
                bail!("malformed ploidy line: {}", line);
            }
            let male: u32 = fields[1]
                .parse()
                .with_context(|| format!("malformed ploidy line: {}", line))?;
            let female: u32 = fields[2]
                .parse()
                .with_context(|| format!("malformed ploidy line: {}", line))?;

            entries.insert(fields[0].to_string(), (male, female));
        }

        Ok(Self { entries })
    }

    pub fn copies(&self, chrom: &str, sex: Sex) -> Option<u32> {
        self.entries.get(chrom).map(|&(male, female)| match sex {
            Sex::Male => male,
            Sex::Female => female,
        })
    }

    /// Whether `chrom` carries at least `genome_copy` copies for this sex.
    ///
    /// Genome copy 2 of a female sample must drop chromosome Y entirely,
    /// rather than emit coordinates for a copy that does not exist. A
    /// chromosome missing from the table signals a ploidy file that does
    /// not match the annotation, which is an error rather than a skip.
    pub fn eligible(&self, chrom: &str, sex: Sex, genome_copy: u32) -> anyhow::Result<bool> {
        let copies = self
            .copies(chrom, sex)
            .ok_or_else(|| anyhow!("chromosome {} not present in ploidy file", chrom))?;
        Ok(copies >= genome_copy)
    }
}
