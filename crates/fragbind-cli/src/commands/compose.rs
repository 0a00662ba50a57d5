use crate::cli::ComposeArgs;
use crate::error::Result;
use fragbind::core::io::{system::SystemFile, xyz};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub async fn run(args: ComposeArgs) -> Result<()> {
    info!("Loading system from {:?}", &args.input);
    let system = SystemFile::load(&args.input)?;

    let complex = system.complex.compose(&system.fragments)?;
    info!(
        "Composed '{}' from {} fragment(s) with {} atoms and {} bonds.",
        complex.name(),
        system.fragments.len(),
        complex.atom_count(),
        complex.bonds().len()
    );

    let mut writer = BufWriter::new(File::create(&args.output)?);
    xyz::write_xyz(&complex, &mut writer)?;
    writer.flush()?;

    println!(
        "✓ Complex '{}' ({}, charge {}, multiplicity {}) written to: {}",
        complex.name(),
        complex.molecular_formula()?,
        complex.charge(),
        complex.multiplicity(),
        args.output.display()
    );
    Ok(())
}
