use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::process;

use rehydrate_chunking::{ChunkingOptions, ChunkingStrategy};
use rehydrate_elements::elements_to_json;
use rehydrate_partition::{normalize_timestamp, DocumentStream, JsonInput, Pipeline};

use crate::config::Config;
use crate::{report_error, ChunkStrategyArg, OutputFormat};

/// Arguments of `rehydrate partition`.
#[derive(Debug, Default)]
pub(crate) struct PartitionArgs {
    pub file: Option<PathBuf>,
    pub text: Option<String>,
    pub stdin: bool,
    pub no_metadata: bool,
    pub metadata_filename: Option<String>,
    pub last_modified: Option<String>,
    pub infer_timestamp: bool,
    pub chunk: Option<ChunkStrategyArg>,
    pub max_characters: Option<usize>,
    pub new_after_n_chars: Option<usize>,
    pub overlap: Option<usize>,
    pub parent_ids: bool,
}

pub(crate) fn cmd_partition(args: &PartitionArgs, config: &Config, output: OutputFormat, quiet: bool) {
    let pipeline = match build_pipeline(args, config) {
        Ok(p) => p,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut stdin_buf: Option<Cursor<Vec<u8>>> = None;
    if args.stdin {
        let mut bytes = Vec::new();
        if let Err(e) = std::io::stdin().read_to_end(&mut bytes) {
            report_error(&format!("error reading stdin: {}", e), output, quiet);
            process::exit(1);
        }
        stdin_buf = Some(Cursor::new(bytes));
    }

    let stream: Option<&mut dyn DocumentStream> = match stdin_buf.as_mut() {
        Some(cursor) => Some(cursor),
        None => None,
    };
    let input = JsonInput {
        path: args.file.as_deref(),
        stream,
        text: args.text.as_deref(),
    };

    match pipeline.run(input) {
        Ok(elements) => {
            tracing::info!(elements = elements.len(), "rehydrated");
            println!("{}", elements_to_json(&elements));
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

/// Merge command-line flags over the loaded config. Flags win.
pub(crate) fn build_pipeline(args: &PartitionArgs, config: &Config) -> Result<Pipeline, String> {
    if args.infer_timestamp && args.stdin {
        return Err(
            "--infer-timestamp cannot be used with --stdin: standard input has no modification time"
                .to_string(),
        );
    }

    let mut partition = config.partition.clone();
    if args.no_metadata {
        partition.include_metadata = false;
    }
    if args.infer_timestamp {
        partition.infer_timestamp_from_stream = true;
    }
    if let Some(name) = &args.metadata_filename {
        partition.metadata_filename = Some(name.clone());
    }
    if let Some(ts) = &args.last_modified {
        let normalized = normalize_timestamp(ts).ok_or_else(|| {
            format!(
                "invalid --last-modified '{}': expected YYYY-MM-DDTHH:MM:SS or RFC 3339",
                ts
            )
        })?;
        partition.metadata_last_modified = Some(normalized);
    }

    let chunking = match (args.chunk, config.chunking.clone()) {
        (None, None) => {
            let sizes = [
                ("--max-characters", args.max_characters),
                ("--new-after-n-chars", args.new_after_n_chars),
                ("--overlap", args.overlap),
            ];
            if let Some((flag, _)) = sizes.iter().find(|(_, v)| v.is_some()) {
                return Err(format!(
                    "{} requires chunking: pass --chunk or add a [chunking] section to the config",
                    flag
                ));
            }
            None
        }
        (Some(strategy), None) => Some(ChunkingOptions::new(
            strategy.into(),
            args.max_characters.unwrap_or(ChunkingOptions::default().max_characters),
        )),
        (strategy, Some(mut opts)) => {
            if let Some(strategy) = strategy {
                opts.strategy = strategy.into();
            }
            if let Some(max) = args.max_characters {
                opts.max_characters = max;
                opts.new_after_n_chars = opts.new_after_n_chars.min(max);
            }
            Some(opts)
        }
    };
    let chunking = chunking.map(|mut opts| {
        if let Some(n) = args.new_after_n_chars {
            opts.new_after_n_chars = n;
        }
        if let Some(n) = args.overlap {
            opts.overlap = n;
        }
        opts
    });

    let mut pipeline = Pipeline::new(partition)
        .with_parent_ids(args.parent_ids || config.normalize.assign_parent_ids);
    if let Some(opts) = chunking {
        pipeline = pipeline.with_chunking(opts);
    }
    Ok(pipeline)
}

impl From<ChunkStrategyArg> for ChunkingStrategy {
    fn from(arg: ChunkStrategyArg) -> Self {
        match arg {
            ChunkStrategyArg::Basic => ChunkingStrategy::Basic,
            ChunkStrategyArg::ByTitle => ChunkingStrategy::ByTitle,
        }
    }
}
