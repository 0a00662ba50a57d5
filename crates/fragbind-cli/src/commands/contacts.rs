use crate::cli::ContactsArgs;
use crate::error::{CliError, Result};
use fragbind::core::catalog::{
    CdrRegion, InteractionType, InterfaceContact, InterfaceContactCatalog,
};
use std::fmt::Write as _;
use tracing::info;

pub async fn run(args: ContactsArgs) -> Result<()> {
    let region = args
        .region
        .as_deref()
        .map(str::parse::<CdrRegion>)
        .transpose()
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let interaction = args
        .interaction
        .as_deref()
        .map(str::parse::<InteractionType>)
        .transpose()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    info!("Loading contact catalog from {:?}", &args.input);
    let catalog = InterfaceContactCatalog::load(&args.input)?;
    info!("Loaded {} contact(s).", catalog.len());

    print!("{}", summarize(&catalog, region, interaction));
    Ok(())
}

fn summarize(
    catalog: &InterfaceContactCatalog,
    region: Option<CdrRegion>,
    interaction: Option<InteractionType>,
) -> String {
    let selected: Vec<&InterfaceContact> = catalog
        .contacts()
        .iter()
        .filter(|c| region.is_none_or(|r| c.region == r))
        .filter(|c| interaction.is_none_or(|i| c.interaction == i))
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} of {} contact(s) selected:",
        selected.len(),
        catalog.len()
    );
    for contact in &selected {
        let _ = writeln!(out, "  {}", contact);
    }

    let _ = writeln!(out, "Interaction counts:");
    for (kind, count) in catalog.interaction_counts() {
        let _ = writeln!(out, "  {:<16} {}", kind.label(), count);
    }
    if let Some(closest) = catalog.closest() {
        let _ = writeln!(out, "Closest contact: {}", closest);
    }
    out
}
