//! Inspect a PPM file and optionally re-encode it.
//!
//! ```text
//! zenppm <input> [-o <output>] [--ascii | --binary] [--clamp | --wrap]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::process::ExitCode;

use zenppm::{DecodeRequest, EncodeRequest, PpmFormat, SamplePolicy, Unstoppable};

const USAGE: &str = "usage: zenppm <input> [-o <output>] [--ascii | --binary] [--clamp | --wrap]";

struct Args {
    input: String,
    output: Option<String>,
    format: Option<PpmFormat>,
    policy: SamplePolicy,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut input = None;
    let mut output = None;
    let mut format = None;
    let mut policy = SamplePolicy::Reject;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                output = Some(args.next().ok_or("-o needs a path")?);
            }
            "--ascii" => format = Some(PpmFormat::Ascii),
            "--binary" => format = Some(PpmFormat::Binary),
            "--clamp" => policy = SamplePolicy::Clamp,
            "--wrap" => policy = SamplePolicy::Wrap,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
            path => {
                if input.replace(path.to_string()).is_some() {
                    return Err("more than one input file given".to_string());
                }
            }
        }
    }

    Ok(Args {
        input: input.ok_or("missing input file")?,
        output,
        format,
        policy,
    })
}

fn run(args: Args) -> Result<(), String> {
    let file = File::open(&args.input).map_err(|e| format!("unable to open {}: {e}", args.input))?;
    let decoded = DecodeRequest::from_reader(BufReader::new(file))
        .with_sample_policy(args.policy)
        .decode(Unstoppable)
        .map_err(|e| format!("{}: {e}", args.input))?;

    let header = decoded.header;
    println!(
        "{}: P{} {}x{} max color {}",
        args.input,
        header.format().tag(),
        header.width(),
        header.height(),
        header.max_color()
    );

    let Some(output) = args.output else {
        return Ok(());
    };
    let request = match args.format {
        Some(format) => EncodeRequest::ppm(format),
        None => EncodeRequest::new(),
    };
    let file = File::create(&output).map_err(|e| format!("unable to create {output}: {e}"))?;
    let mut writer = BufWriter::new(file);
    request
        .encode_to_writer(&header, decoded.pixels(), &mut writer, Unstoppable)
        .map_err(|e| format!("{output}: {e}"))?;
    writer.flush().map_err(|e| format!("{output}: {e}"))?;
    log::info!("wrote {output}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            if msg != USAGE {
                eprintln!("{USAGE}");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn input_only() {
        let a = args(&["in.ppm"]).unwrap();
        assert_eq!(a.input, "in.ppm");
        assert!(a.output.is_none());
        assert_eq!(a.policy, SamplePolicy::Reject);
    }

    #[test]
    fn conversion_flags() {
        let a = args(&["--binary", "in.ppm", "-o", "out.ppm", "--clamp"]).unwrap();
        assert_eq!(a.output.as_deref(), Some("out.ppm"));
        assert_eq!(a.format, Some(PpmFormat::Binary));
        assert_eq!(a.policy, SamplePolicy::Clamp);
    }

    #[test]
    fn usage_errors() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.ppm", "b.ppm"]).is_err());
        assert!(args(&["a.ppm", "-o"]).is_err());
        assert!(args(&["--fast", "a.ppm"]).is_err());
    }
}
