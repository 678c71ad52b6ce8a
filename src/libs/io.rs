use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens an input for buffered reading.
///
/// `stdin` reads from standard input; a `.gz` suffix enables transparent
/// decompression.
///
/// ```
/// use std::io::BufRead;
/// let reader = vgr::reader("tests/annot/indels_1.txt").unwrap();
/// assert_eq!(reader.lines().count(), 4);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Opens an output for buffered writing. `stdout` writes to standard output.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Opens a log stream. Like [`writer`], but also accepts `stderr`.
pub fn log_writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    if output == "stderr" {
        Ok(Box::new(BufWriter::new(std::io::stderr())))
    } else {
        writer(output)
    }
}
