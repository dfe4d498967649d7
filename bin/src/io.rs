use std::io::Read;

use anyhow::Context;
use fa_algebra::Automaton;

pub fn to_file_or_stdout(maybe_file_name: Option<&str>, output: &str) -> anyhow::Result<()> {
    if let Some(file_name) = maybe_file_name {
        tracing::debug!("Output file name specified: {:?}", file_name);
        std::fs::write(file_name, output)
            .with_context(|| format!("unable to write to {file_name}"))?;
    } else {
        println!("{output}");
    }
    Ok(())
}

/// Reads the named file, or stdin for `None` and `-`.
pub fn from_file_or_stdin(maybe_file_name: Option<&str>) -> anyhow::Result<String> {
    match maybe_file_name {
        Some(f) if f != "-" => {
            std::fs::read_to_string(f).with_context(|| format!("unable to read {f}"))
        }
        _ => {
            tracing::debug!("No input files specified, using stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("error when reading from stdin")?;
            Ok(buf)
        }
    }
}

pub fn automaton(maybe_file_name: Option<&str>) -> anyhow::Result<Automaton> {
    let text = from_file_or_stdin(maybe_file_name)?;
    let aut = Automaton::from_description(&text).with_context(|| {
        format!(
            "unable to parse automaton from {}",
            maybe_file_name.unwrap_or("stdin")
        )
    })?;
    tracing::debug!("Parsed {} {} with {} states", aut.kind(), aut.name(), aut.size());
    Ok(aut)
}
