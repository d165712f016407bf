use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, error, info, LevelFilter};
use tap::Pipe;
use ttfs_repacker::{
    decode_container, decode_package, encode_container, encode_package, format_size,
    ttfs::{looks_like_container, LENGTH_TERMINATOR},
    Container, DecodeOptions, EncodeOptions, Package,
};

#[derive(Debug, Parser)]
#[command(name = "ttfs-repacker", version, about = "Inspect and rewrite TT package descriptions")]
struct Cli {
    /// Log debug output (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the packages of a packages.dat or .tpi file.
    List {
        #[command(flatten)]
        input: InputArgs,
        /// Print every file entry too.
        #[arg(short, long)]
        files: bool,
    },

    /// Decode and encode again, recomputing every length field.
    Repack {
        #[command(flatten)]
        input: InputArgs,
        output: PathBuf,
        /// Byte written on top of each container blob length.
        #[arg(long, default_value_t = LENGTH_TERMINATOR)]
        terminator: u8,
    },

    /// Write one package of a packages.dat as a standalone .tpi file.
    ExtractTpi {
        input: PathBuf,
        /// Zero-based package index.
        index: usize,
        output: PathBuf,
        #[arg(long)]
        lenient: bool,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = Kind::Auto)]
    kind: Kind,

    /// Skip unknown chunks and ignore declared chunk lengths.
    #[arg(long)]
    lenient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Container if the file starts with a package tag, TPI otherwise.
    Auto,
    Ttfs,
    Tpi,
}

#[derive(Debug)]
enum Document {
    Container(Container),
    Package(Package),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    match cli.cmd {
        Command::List { input, files } => {
            match load(&input.input, input.kind, input.lenient)? {
                Document::Container(container) => container
                    .packages
                    .iter()
                    .enumerate()
                    .for_each(|(i, package)| print_package(Some(i), package, files)),
                Document::Package(package) => print_package(None, &package, files),
            }
        }
        Command::Repack {
            input,
            output,
            terminator,
        } => {
            let bytes = match load(&input.input, input.kind, input.lenient)? {
                Document::Container(container) => encode_container(
                    &container,
                    EncodeOptions {
                        length_terminator: terminator,
                    },
                ),
                Document::Package(package) => encode_package(&package),
            }
            .context("Unable to encode")?;

            write_output(&output, &bytes)?;
        }
        Command::ExtractTpi {
            input,
            index,
            output,
            lenient,
        } => {
            let container = decode_container(&read_input(&input)?, decode_options(lenient))
                .with_context(|| format!("Unable to decode {}", input.display()))?;
            ensure!(
                index < container.package_count(),
                "Package index {index} out of range, {} holds {} packages",
                input.display(),
                container.package_count()
            );

            let package = &container.packages[index];
            info!("extracting {} ({})", package.name, package.id);
            encode_package(package)
                .context("Unable to encode package")?
                .pipe(|bytes| write_output(&output, &bytes))?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    info!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn decode_options(lenient: bool) -> DecodeOptions {
    if lenient {
        DecodeOptions::lenient()
    } else {
        DecodeOptions::default()
    }
}

fn load(path: &Path, kind: Kind, lenient: bool) -> anyhow::Result<Document> {
    let data = read_input(path)?;
    let options = decode_options(lenient);

    let kind = match kind {
        Kind::Auto if looks_like_container(&data) => Kind::Ttfs,
        Kind::Auto => Kind::Tpi,
        kind => kind,
    };
    debug!("decoding {} as {kind:?} with {options:?}", path.display());

    let document = match kind {
        Kind::Tpi => decode_package(&data, options).map(Document::Package),
        _ => decode_container(&data, options).map(Document::Container),
    }
    .with_context(|| format!("Unable to decode {}", path.display()))?;

    if let Document::Container(container) = &document {
        debug!("{} packages decoded", container.package_count());
    }

    Ok(document)
}

fn print_package(index: Option<usize>, package: &Package, files: bool) {
    let prefix = index.map(|i| format!("#{i} ")).unwrap_or_default();
    println!(
        "{prefix}{} {} v{} by {} [{}] {} files, {}",
        package.id,
        package.name,
        package.version,
        package.owner,
        package.kind,
        package.file_count(),
        format_size(package.total_size() as i64, 2),
    );

    if files {
        for file in &package.files {
            println!("    {:<40} {}", file.full_name(), format_size(file.size as i64, 2));
        }
    }
}

fn write_output(output: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut writer = std::fs::File::create(output)
        .with_context(|| format!("Unable to create {}", output.display()))?
        .pipe(BufWriter::new);

    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Unable to write {}", output.display()))
        .inspect_err(|_| {
            std::fs::remove_file(output)
                .inspect_err(|e| error!("{e}"))
                .ok();
        })?;

    info!("wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
