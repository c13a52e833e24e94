use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use docintel_core::{
    load_recognizer, render, DisabledRecognizer, ExtractionPipeline, RecognizerConfig,
    Recognizer, StructuredRecord,
};

use super::ExtractArgs;

pub fn run(args: &ExtractArgs) -> Result<()> {
    let pipeline = ExtractionPipeline::new(recognizer(args)?);

    let mut stdout = std::io::stdout().lock();
    for path in &args.paths {
        let record = extract_one(&pipeline, path)?;
        let rendered = render(&record, args.format)?;
        writeln!(stdout, "{rendered}")?;

        if args.stats {
            eprint!("{}", stats_table(path, &record));
        }
    }

    Ok(())
}

fn recognizer(args: &ExtractArgs) -> Result<Arc<dyn Recognizer>> {
    if args.skip_ner {
        tracing::info!("entity recognition disabled");
        return Ok(Arc::new(DisabledRecognizer));
    }

    let mut config = RecognizerConfig::from_env();
    if let Some(dir) = &args.model_dir {
        config = config.with_model_dir(dir);
    }
    load_recognizer(&config).context("loading NER model (pass --skip-ner to run pattern extraction only)")
}

fn extract_one(pipeline: &ExtractionPipeline, path: &Path) -> Result<StructuredRecord> {
    if !path.is_file() {
        bail!("file not found: {}", path.display());
    }

    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let format = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    pipeline
        .extract(&data, format)
        .with_context(|| format!("extracting {}", path.display()))
}

fn stats_table(path: &Path, record: &StructuredRecord) -> String {
    let mut out = format!("{}\n", path.display());
    for (field, count) in record.breakdown() {
        out.push_str(&format!("  {field:<14} {count:>4}\n"));
    }
    out.push_str(&format!("  {:<14} {:>4}\n", "total", record.total()));
    out
}
