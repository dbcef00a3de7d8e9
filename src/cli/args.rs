// Sat Jan 17 2026 - Alex

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memprobe")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Byte, bit and signature probing for files and loaded modules", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the first match of a signature in a file
    Find(FindArgs),
    /// Show the region of a module loaded in this process
    Module(ModuleArgs),
    /// Decode native scalars from a file
    Peek(PeekArgs),
    /// Read bit fields from a file
    Bits(BitsArgs),
}

#[derive(Parser, Debug)]
pub struct FindArgs {
    pub file: PathBuf,

    #[arg(short, long)]
    pub signature: Option<String>,

    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ModuleArgs {
    pub name: Option<String>,

    #[arg(short, long)]
    pub signature: Option<String>,
}

#[derive(Parser, Debug)]
pub struct PeekArgs {
    pub file: PathBuf,

    #[arg(short, long, default_value = "0")]
    pub offset: u64,

    #[arg(short = 't', long = "type", value_enum, default_value = "u32")]
    pub value_type: ScalarType,

    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

#[derive(Parser, Debug)]
pub struct BitsArgs {
    pub file: PathBuf,

    #[arg(short, long, default_value = "0")]
    pub bit_offset: i64,

    #[arg(short, long, default_value = "8")]
    pub width: u32,

    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl FindArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.signature.is_none() && self.name.is_none() {
            return Err("Either --signature or --name must be specified".to_string());
        }
        if self.signature.is_some() && self.name.is_some() {
            return Err("Cannot specify both --signature and --name".to_string());
        }
        if !self.file.exists() {
            return Err(format!("Input file does not exist: {:?}", self.file));
        }
        Ok(())
    }
}

impl PeekArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("Count must be at least 1".to_string());
        }
        Ok(())
    }
}

impl BitsArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.width > 64 {
            return Err(format!("Width must be between 1 and 64, got {}", self.width));
        }
        if self.count == 0 {
            return Err("Count must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find() {
        let args = Args::try_parse_from(["memprobe", "find", "a.bin", "-s", "DE AD ? EF"]).unwrap();
        match args.command {
            Command::Find(find) => {
                assert_eq!(find.signature.as_deref(), Some("DE AD ? EF"));
                assert!(find.name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_peek_with_globals() {
        let args = Args::try_parse_from([
            "memprobe", "peek", "a.bin", "--type", "i16", "-n", "3", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        match args.command {
            Command::Peek(peek) => {
                assert_eq!(peek.value_type, ScalarType::I16);
                assert_eq!(peek.count, 3);
                assert_eq!(peek.offset, 0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bits_validate() {
        let args = Args::try_parse_from(["memprobe", "bits", "a.bin", "-w", "65"]).unwrap();
        let Command::Bits(bits) = args.command else {
            panic!("expected bits");
        };
        assert!(bits.validate().is_err());
    }

    #[test]
    fn test_find_requires_one_source() {
        let find = FindArgs {
            file: PathBuf::from("a.bin"),
            signature: Some("90".to_string()),
            name: Some("nop".to_string()),
        };
        assert!(find.validate().unwrap_err().contains("both"));
    }
}
