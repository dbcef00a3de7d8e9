// Sat Jan 17 2026 - Alex

use super::args::{BitsArgs, Command, FindArgs, ModuleArgs, PeekArgs, ScalarType};
use crate::config::Config;
use crate::pattern::Signature;
use crate::platform::{self, MemoryProtection, MemoryRegion, PlatformError};
use crate::stream::{BitStream, FileStream, MemoryStream, Reader, SeekOrigin, Stream, StreamError};
use colored::Colorize;
use memmap2::MmapOptions;
use std::fs::{self, File};

pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn execute(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Find(find_args) => self.handle_find(find_args),
            Command::Module(module_args) => self.handle_module(module_args),
            Command::Peek(peek_args) => self.handle_peek(peek_args),
            Command::Bits(bits_args) => self.handle_bits(bits_args),
        }
    }

    pub fn setup_logging(&self) {
        env_logger::Builder::new()
            .filter_level(self.config.level_filter())
            .format_timestamp(None)
            .init();
    }

    fn resolve_signature(&self, text: Option<&str>, name: Option<&str>) -> anyhow::Result<Signature> {
        match (text, name) {
            (Some(text), _) => Ok(Signature::parse(text)?),
            (None, Some(name)) => Ok(self.config.signature(name)?),
            (None, None) => Err(anyhow::anyhow!("No signature given")),
        }
    }

    fn handle_find(&self, args: FindArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let signature = self.resolve_signature(args.signature.as_deref(), args.name.as_deref())?;

        println!("{} Scanning {} for {}", "[*]".blue(), args.file.display(), signature);

        let file = File::open(&args.file)?;
        let mut mapped = unsafe { MmapOptions::new().map_copy(&file)? };

        let Some(offset) = signature.find_in(&mapped) else {
            println!("{} No match", "[-]".yellow());
            return Ok(());
        };

        println!("{} Match at offset {:#x}", "[+]".green(), offset);

        let mut stream = MemoryStream::new(&mut mapped[..]);
        let context = self.read_context(&mut stream, offset, signature.len())?;
        println!("  {}", format_hex(&context.bytes, context.start, offset, signature.len()));
        Ok(())
    }

    fn read_context(&self, stream: &mut MemoryStream<'_>, offset: usize, len: usize) -> Result<Context, StreamError> {
        let start = offset.saturating_sub(self.config.context_bytes);
        let end = offset
            .saturating_add(len)
            .saturating_add(self.config.context_bytes)
            .min(stream.len());

        let bytes = stream.temporarily_seek(start as i64, SeekOrigin::Start, |s| s.read(end - start))?;
        Ok(Context { start, bytes })
    }

    fn handle_module(&self, args: ModuleArgs) -> anyhow::Result<()> {
        let name = args.name.as_deref().or(self.config.default_module.as_deref());
        let region = platform::module_region(name)?;

        println!("{} {}", "[+]".green(), name.unwrap_or("<main executable>").bold());
        println!("  Region: {}", region);
        println!("  Size: {:#x} bytes", region.len());
        match platform::query_protection(region.base()) {
            Ok(protection) => println!("  Protection: {}", protection),
            Err(e) => log::warn!("Could not query protection at {:#x}: {}", region.base(), e),
        }

        let Some(text) = args.signature else {
            return Ok(());
        };
        let signature = Signature::parse(&text)?;

        let mut found = None;
        for run in readable_runs(&region)? {
            // Each run lies inside one module and was readable when queried.
            let bytes = unsafe { run.as_slice() };
            if let Some(offset) = signature.find_in(bytes) {
                found = Some(run.base() + offset);
                break;
            }
        }

        match found {
            Some(address) => println!(
                "{} {} at {:#x} (module offset {:#x})",
                "[+]".green(),
                signature,
                address,
                address - region.base()
            ),
            None => println!("{} {} not found", "[-]".yellow(), signature),
        }
        Ok(())
    }

    fn handle_peek(&self, args: PeekArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut stream = FileStream::open(&args.file)?;
        stream.seek(args.offset as i64, SeekOrigin::Start)?;

        let mut reader = Reader::new(&mut stream);
        for _ in 0..args.count {
            let at = reader.stream().index()?;
            let value = decode_scalar(&mut reader, args.value_type)?;
            println!("  {:#010x}  {}", at, value.cyan());
        }
        Ok(())
    }

    fn handle_bits(&self, args: BitsArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut bits = BitStream::from_vec(fs::read(&args.file)?);
        bits.seek(args.bit_offset, SeekOrigin::Start)?;

        for _ in 0..args.count {
            let at = bits.current_bit();
            let value: u64 = bits.read_bits(args.width)?;
            println!(
                "  bit {:>8}  {:0width$b}  {:#x}",
                at,
                value,
                value,
                width = args.width as usize
            );
        }
        Ok(())
    }
}

struct Context {
    start: usize,
    bytes: Vec<u8>,
}

fn decode_scalar<S: Stream + ?Sized>(reader: &mut Reader<'_, S>, value_type: ScalarType) -> Result<String, StreamError> {
    let text = match value_type {
        ScalarType::U8 => reader.read::<u8>()?.to_string(),
        ScalarType::I8 => reader.read::<i8>()?.to_string(),
        ScalarType::U16 => reader.read::<u16>()?.to_string(),
        ScalarType::I16 => reader.read::<i16>()?.to_string(),
        ScalarType::U32 => reader.read::<u32>()?.to_string(),
        ScalarType::I32 => reader.read::<i32>()?.to_string(),
        ScalarType::U64 => reader.read::<u64>()?.to_string(),
        ScalarType::I64 => reader.read::<i64>()?.to_string(),
        ScalarType::F32 => reader.read::<f32>()?.to_string(),
        ScalarType::F64 => reader.read::<f64>()?.to_string(),
    };
    Ok(text)
}

/// Splits `region` into maximal runs that are currently readable.
fn readable_runs(region: &MemoryRegion) -> Result<Vec<MemoryRegion>, PlatformError> {
    let runs = merge_readable(&platform::query_regions(region)?);
    log::debug!("{} has {} readable run(s)", region, runs.len());
    Ok(runs)
}

/// Joins address-ordered pieces into contiguous readable runs.
fn merge_readable(pieces: &[(MemoryRegion, MemoryProtection)]) -> Vec<MemoryRegion> {
    let mut runs: Vec<MemoryRegion> = Vec::new();
    for (piece, protection) in pieces {
        if !protection.can_read() || piece.is_empty() {
            continue;
        }
        match runs.last_mut() {
            Some(run) if run.end() == piece.base() => {
                *run = MemoryRegion::new(run.base(), run.len() + piece.len());
            }
            _ => runs.push(*piece),
        }
    }
    runs
}

fn format_hex(bytes: &[u8], start: usize, match_at: usize, match_len: usize) -> String {
    bytes
        .iter()
        .enumerate()
        .map(|(i, byte)| {
            let text = format!("{:02X}", byte);
            let at = start + i;
            if at >= match_at && at < match_at + match_len {
                text.green().bold().to_string()
            } else {
                text.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
