use book_catalog::{Catalog, Config};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;
    let listing = catalog.listing()?;
    info!(
        "{} books in {} collections",
        listing.len(),
        catalog.len()
    );

    let output = config.format.render(listing.as_slice())?;
    println!("{}", output.trim_end());
    Ok(())
}
