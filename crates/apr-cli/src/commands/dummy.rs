use crate::cli::DummyArgs;
use crate::error::{CliError, Result};
use apr_restraints::core::io::source::StructureSource;
use apr_restraints::engine::plumed::{PlumedConfigBuilder, PlumedWriter};
use tracing::info;

pub fn run(args: DummyArgs) -> Result<()> {
    let writer = writer_for(&args)?;
    let file = writer.window_file(&args.window);

    info!("Appending dummy atom restraints to {:?}", file);
    writer.add_dummy_atom_restraints(StructureSource::Path(&args.structure), &args.window, None)?;

    println!("✓ Dummy atom restraints appended to: {}", file.display());
    Ok(())
}

fn writer_for(args: &DummyArgs) -> Result<PlumedWriter> {
    let mut builder = PlumedConfigBuilder::new();
    if let Some(path) = &args.path {
        builder = builder.path(path.clone());
    }
    if let Some(name) = &args.file_name {
        builder = builder.file_name(name.clone());
    }
    if let Some(k) = args.force_constant {
        builder = builder.dummy_force_constant(k);
    }
    let config = builder.build().map_err(|e| CliError::Config(e.to_string()))?;
    Ok(PlumedWriter::new(config))
}
