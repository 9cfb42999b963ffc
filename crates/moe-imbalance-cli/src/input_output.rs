use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
};

use moe_imbalance::{
    SampleBatch,
    TextRecord,
    dataset::{read_jsonl_records, read_text_lines},
};

fn squash_standard_io(path: &Option<String>) -> Option<String> {
    match path {
        Some(p) if p == "-" => None,
        Some(p) => Some(p.clone()),
        None => None,
    }
}

/// A display label for an input source.
pub fn source_label(source: &Option<String>) -> String {
    squash_standard_io(source).unwrap_or_else(|| "<stdin>".to_string())
}

/// The samples of one input.
#[derive(Debug)]
pub enum Samples {
    /// Raw text lines.
    Texts(Vec<String>),

    /// JSONL records.
    Records(Vec<TextRecord>),
}

impl Samples {
    /// View as a sample batch.
    pub fn batch(&self) -> SampleBatch<'_> {
        match self {
            Samples::Texts(texts) => SampleBatch::Texts(texts),
            Samples::Records(records) => SampleBatch::Records(records),
        }
    }
}

/// Input argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Input files; "-" may be used to indicate stdin. Reads stdin when none are given.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Treat each input line as a raw text sample, rather than a JSONL record.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub lines: bool,
}

impl InputArgs {
    /// The input sources, in order; `None` is stdin.
    pub fn sources(&self) -> Vec<Option<String>> {
        if self.inputs.is_empty() {
            return vec![None];
        }
        self.inputs.iter().map(|p| Some(p.clone())).collect()
    }

    /// Open a reader for a source.
    pub fn open_reader(
        &self,
        source: &Option<String>,
    ) -> Result<Box<dyn BufRead>, Box<dyn std::error::Error>> {
        Ok(match squash_standard_io(source) {
            None => Box::new(BufReader::new(std::io::stdin().lock())),
            Some(p) => Box::new(BufReader::new(File::open(p)?)),
        })
    }

    /// Read the samples of a source.
    pub fn read_samples(
        &self,
        source: &Option<String>,
    ) -> Result<Samples, Box<dyn std::error::Error>> {
        let reader = self.open_reader(source)?;
        Ok(if self.lines {
            Samples::Texts(read_text_lines(reader)?)
        } else {
            Samples::Records(read_jsonl_records(reader)?)
        })
    }
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Optional output file; "-" may be used to indicate stdout.
    #[clap(long, default_value = None)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// Open a writer for the output.
    pub fn open_writer(&self) -> Result<Box<dyn std::io::Write>, Box<dyn std::error::Error>> {
        Ok(match squash_standard_io(&self.output) {
            Some(p) => Box::new(BufWriter::new(File::create(p)?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}
