//! `qs` CLI — parse, build and rewrite URL query strings from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Query string → JSON
//! qs parse '?tag[]=a&tag[]=b&q=x%20y' --array-format bracket
//!
//! # JSON → query string (stdin → stdout)
//! echo '{"q":"x y","tag":["a","b"]}' | qs stringify --array-format index
//!
//! # Split a URL, or build one from {"url": ..., "query": {...}}
//! qs parse-url 'https://x.test/p?a=1'
//! qs stringify-url -i link.json
//!
//! # Rewrite the query of an address and print the result
//! echo '{"page":2}' | qs update --url 'https://x.test/p?q=rust'
//! qs remove-keys --url 'https://x.test/p?a=1&b=2' a
//! qs remove --url 'https://x.test/p?a=1#top'
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qs_core::{
    ArrayFormat, MemoryAddress, ParseOptions, ParsedUrl, QueryObject, StringifyOptions,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "qs", version, about = "URL query string CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query string into a JSON object
    Parse {
        /// Query string (reads --input or stdin if omitted)
        query: Option<String>,
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Serialize a JSON object into a query string
    Stringify {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        encode: EncodeArgs,
    },
    /// Split a URL into its base and parsed query (JSON output)
    ParseUrl {
        /// URL (reads --input or stdin if omitted)
        url: Option<String>,
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Build a URL from a JSON {"url": ..., "query": {...}} document
    StringifyUrl {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        encode: EncodeArgs,
    },
    /// Print the parsed query of an address
    Get {
        #[command(flatten)]
        address: AddressArgs,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Replace the query of an address with a JSON object
    Set {
        #[command(flatten)]
        address: AddressArgs,
        /// JSON object file (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        encode: EncodeArgs,
    },
    /// Merge a JSON object over the query of an address
    Update {
        #[command(flatten)]
        address: AddressArgs,
        /// JSON object file (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        encode: EncodeArgs,
    },
    /// Drop the whole query (and fragment) from an address
    Remove {
        #[command(flatten)]
        address: AddressArgs,
    },
    /// Delete keys from the query of an address
    RemoveKeys {
        #[command(flatten)]
        address: AddressArgs,
        /// Keys to delete
        #[arg(required = true)]
        keys: Vec<String>,
        #[command(flatten)]
        encode: EncodeArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct AddressArgs {
    /// Absolute address to operate on
    #[arg(long)]
    url: String,
}

#[derive(Args)]
struct DecodeArgs {
    /// Sequence convention: none, bracket, index or comma
    #[arg(long, default_value = "none")]
    array_format: ArrayFormat,
    /// Keep percent-escapes instead of decoding them
    #[arg(long)]
    no_decode: bool,
}

impl DecodeArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions {
            decode: !self.no_decode,
            array_format: self.array_format,
        }
    }
}

#[derive(Args)]
struct EncodeArgs {
    /// Sequence convention: none, bracket, index or comma
    #[arg(long, default_value = "none")]
    array_format: ArrayFormat,
    /// Emit keys and values without percent-encoding
    #[arg(long)]
    no_encode: bool,
    /// Emit null values as `key=null` instead of skipping them
    #[arg(long)]
    keep_null: bool,
    /// Emit empty strings as `key=` instead of skipping them
    #[arg(long)]
    keep_empty_string: bool,
}

impl EncodeArgs {
    fn options(&self) -> StringifyOptions {
        StringifyOptions {
            encode: !self.no_encode,
            array_format: self.array_format,
            skip_null: !self.keep_null,
            skip_empty_string: !self.keep_empty_string,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { query, io, decode } => {
            let query = positional_or_input(query, io.input.as_deref())?;
            let object = qs_core::parse(&query, &decode.options());
            let pretty = serde_json::to_string_pretty(&object)?;
            write_output(io.output.as_deref(), &pretty)?;
        }
        Commands::Stringify { io, encode } => {
            let object = read_object(io.input.as_deref())?;
            let query = qs_core::stringify(&object, &encode.options());
            write_output(io.output.as_deref(), &query)?;
        }
        Commands::ParseUrl { url, io, decode } => {
            let url = positional_or_input(url, io.input.as_deref())?;
            let parsed = qs_core::parse_url(&url, &decode.options());
            let pretty = serde_json::to_string_pretty(&parsed)?;
            write_output(io.output.as_deref(), &pretty)?;
        }
        Commands::StringifyUrl { io, encode } => {
            let json = read_input(io.input.as_deref())?;
            let parsed: ParsedUrl = serde_json::from_str(&json)
                .context("Input must be a JSON object like {\"url\": ..., \"query\": {...}}")?;
            let url = qs_core::stringify_url(&parsed, &encode.options());
            write_output(io.output.as_deref(), &url)?;
        }
        Commands::Get { address, decode } => {
            let port = open_address(&address)?;
            let object = qs_core::get(&port, &decode.options())?;
            let pretty = serde_json::to_string_pretty(&object)?;
            write_output(None, &pretty)?;
        }
        Commands::Set {
            address,
            input,
            encode,
        } => {
            let mut port = open_address(&address)?;
            let object = read_object(input.as_deref())?;
            qs_core::set(&mut port, &object, &encode.options())
                .context("Failed to set the query")?;
            write_output(None, port.href())?;
        }
        Commands::Update {
            address,
            input,
            encode,
        } => {
            let mut port = open_address(&address)?;
            let updates = read_object(input.as_deref())?;
            qs_core::update(&mut port, &updates, &encode.options())
                .context("Failed to update the query")?;
            write_output(None, port.href())?;
        }
        Commands::Remove { address } => {
            let mut port = open_address(&address)?;
            qs_core::remove(&mut port).context("Failed to remove the query")?;
            write_output(None, port.href())?;
        }
        Commands::RemoveKeys {
            address,
            keys,
            encode,
        } => {
            let mut port = open_address(&address)?;
            qs_core::remove_keys(&mut port, keys.as_slice(), &encode.options())
                .context("Failed to remove query keys")?;
            write_output(None, port.href())?;
        }
    }

    Ok(())
}

fn open_address(args: &AddressArgs) -> Result<MemoryAddress> {
    MemoryAddress::parse(&args.url).with_context(|| format!("Invalid --url: {}", args.url))
}

/// Use the positional argument if given, otherwise the input file or stdin
/// with trailing line endings removed.
fn positional_or_input(positional: Option<String>, input: Option<&str>) -> Result<String> {
    match positional {
        Some(value) => Ok(value),
        None => Ok(read_input(input)?
            .trim_end_matches(['\n', '\r'])
            .to_string()),
    }
}

fn read_object(path: Option<&str>) -> Result<QueryObject> {
    let json = read_input(path)?;
    serde_json::from_str(&json)
        .context("Input must be a flat JSON object of strings, numbers, booleans, nulls or arrays of those")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
