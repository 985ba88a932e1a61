mod encoder;
mod error;
mod labels;
mod lexer;
mod rom;
mod token;

use arch::minstr::MicroInstruction;
use color_print::{cformat, cprintln};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    input: String,

    /// Output file (stdout if omitted)
    output: Option<String>,

    /// Emit raw packed binary instead of Logisim hex text
    #[clap(short, long)]
    raw: bool,

    /// Dump the assembled words with decoded fields
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    let args: Args = Args::parse();

    let src = match std::fs::read_to_string(&args.input) {
        Ok(src) => src,
        Err(e) => {
            cprintln!("<red,bold>error</>: failed to read {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let rom = match encoder::assemble(&src) {
        Ok(rom) => rom,
        Err(err) => {
            report(&err, &args.input, &src);
            std::process::exit(1);
        }
    };

    if args.dump {
        dump(&rom);
    }

    if let Err(e) = write_output(&rom, args.raw, args.output.as_deref()) {
        let target = args.output.as_deref().unwrap_or("stdout");
        cprintln!("<red,bold>error</>: failed to write {}: {}", target, e);
        std::process::exit(1);
    }
}

/// Diagnostic pointing at the offending source line.
fn report(err: &error::Error, path: &str, src: &str) {
    cprintln!("<red,bold>error</>: {}", err);
    cprintln!("     <blue>--></> <underline>{}:{}:{}</>", path, err.line, err.col);
    cprintln!("      <blue>|</>");
    let raw = src.lines().nth(err.line as usize - 1).unwrap_or("");
    cprintln!(" <blue>{:>4} |</> {}", err.line, raw);
    cprintln!("      <blue>|</>");
}

fn write_output(rom: &rom::Rom, raw: bool, path: Option<&str>) -> std::io::Result<()> {
    use std::io::Write;
    let bytes = if raw {
        rom.to_raw()
    } else {
        rom.to_logisim().into_bytes()
    };
    match path {
        Some(path) => std::fs::write(path, bytes),
        None => std::io::stdout().write_all(&bytes),
    }
}

/// Annotated listing of every non-zero ROM word.
fn dump(rom: &rom::Rom) {
    println!("addr | word  | fields");
    println!("-----+-------+-------------------------------------------");
    for (slot, w) in rom.words().iter().enumerate() {
        if w.word() != 0 {
            println!("{}", describe(slot as u8, *w));
        }
    }
}

fn describe(slot: u8, w: MicroInstruction) -> String {
    if w.is_seq() {
        cformat!(
            "  <blue>{:02X}</> | {:05X} | <green>seq</> cond={} next=x{:02X}",
            slot,
            w.word(),
            w.cond(),
            w.next_addr()
        )
    } else {
        cformat!(
            "  <blue>{:02X}</> | {:05X} | <green>op</>  mw={} aa={} mb={} ba={} mf={} fs=x{:X} da={} rw={}",
            slot,
            w.word(),
            u8::from(w.mem_write()),
            w.a_addr(),
            u8::from(w.const_sel()),
            w.b_addr(),
            u8::from(w.mem_result()),
            w.fn_sel(),
            w.dest(),
            u8::from(w.reg_write())
        )
    }
}
